use common::search::DirectoryEntry;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompanySearchQuery {
    /// Case-insensitive match against name, category and services. Blank
    /// or absent lists every company.
    #[param(example = "software")]
    pub q: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CompanyListResponse {
    pub data: Vec<DirectoryEntry>,
    /// Number of matching companies.
    #[schema(example = 3)]
    pub total: u64,
}
