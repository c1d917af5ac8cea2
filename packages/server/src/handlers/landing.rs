use axum::Json;
use common::landing::{LandingContent, landing_content};
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/landing",
    tag = "Landing",
    operation_id = "getLanding",
    summary = "Landing page content",
    description = "Returns the static hero, FAQ and success-story sections of the landing page.",
    responses(
        (status = 200, description = "Landing content", body = LandingContent),
    ),
)]
#[instrument]
pub async fn get_landing() -> Json<LandingContent> {
    Json(landing_content())
}
