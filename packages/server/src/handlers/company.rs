use axum::{
    Json,
    extract::{Path, State},
};
use common::profile::CompanyProfile;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::query::AppQuery;
use crate::models::company::{CompanyListResponse, CompanySearchQuery};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Companies",
    operation_id = "listCompanies",
    summary = "Search the company directory",
    description = "Lists companies alphabetically, filtered by a case-insensitive substring match on name, category and services.",
    params(CompanySearchQuery),
    responses(
        (status = 200, description = "Matching companies", body = CompanyListResponse),
        (status = 400, description = "Invalid query string (VALIDATION_ERROR)", body = ErrorBody),
        (status = 502, description = "Backend unreachable (BACKEND_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(q = query.q.as_deref().unwrap_or("")))]
pub async fn list_companies(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CompanySearchQuery>,
) -> Result<Json<CompanyListResponse>, AppError> {
    let data = state
        .directory
        .search(query.q.as_deref().unwrap_or_default())
        .await?;
    let total = data.len() as u64;
    info!(total, "Directory searched");
    Ok(Json(CompanyListResponse { data, total }))
}

#[utoipa::path(
    get,
    path = "/{slug}",
    tag = "Companies",
    operation_id = "getCompanyProfile",
    summary = "Get a company's public profile",
    description = "Returns the company with its images, active products, weekly hours and approved reviews.",
    params(("slug" = String, Path, description = "Company slug")),
    responses(
        (status = 200, description = "Company profile", body = CompanyProfile),
        (status = 404, description = "Unknown slug (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Backend unreachable (BACKEND_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_company(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CompanyProfile>, AppError> {
    let profile = state.directory.profile(&slug).await?;
    Ok(Json(profile))
}
