//! Read-only access for the public pages: directory search and profiles.

use std::sync::Arc;

use common::company::Company;
use common::hours::BusinessHours;
use common::image::CompanyImage;
use common::product::Product;
use common::profile::CompanyProfile;
use common::review::Review;
use common::search::{DirectoryEntry, search};
use tracing::instrument;

use crate::backend::table::{select, select_one};
use crate::backend::{BackendError, Direction, Query, TableStore};

#[derive(Clone)]
pub struct Directory {
    tables: Arc<dyn TableStore>,
}

impl Directory {
    pub fn new(tables: Arc<dyn TableStore>) -> Self {
        Self { tables }
    }

    /// Every listed company, alphabetically.
    pub async fn entries(&self) -> Result<Vec<DirectoryEntry>, BackendError> {
        let query = Query::new().order_by("company_name", Direction::Asc);
        let companies: Vec<Company> = select(self.tables.as_ref(), &query).await?;
        Ok(companies.iter().map(DirectoryEntry::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<DirectoryEntry>, BackendError> {
        let entries = self.entries().await?;
        Ok(search(&entries, query).into_iter().cloned().collect())
    }

    /// Public profile for `slug`, with the company's images, products,
    /// hours and reviews fetched concurrently.
    #[instrument(skip(self))]
    pub async fn profile(&self, slug: &str) -> Result<CompanyProfile, BackendError> {
        let tables = self.tables.as_ref();
        let company: Company = select_one(tables, &Query::new().eq("slug", slug))
            .await?
            .ok_or_else(|| BackendError::NotFound(format!("company `{slug}`")))?;

        let by_company = Query::new().eq("company_id", &company.id);
        let ordered = by_company
            .clone()
            .order_by("display_order", Direction::Asc);
        let images_query = ordered.clone();
        let hours_query = by_company.clone().order_by("day_of_week", Direction::Asc);
        let reviews_query = by_company
            .eq("is_approved", true)
            .order_by("created_at", Direction::Desc);

        let (images, products, hours, reviews) = tokio::try_join!(
            select::<CompanyImage>(tables, &images_query),
            select::<Product>(tables, &ordered),
            select::<BusinessHours>(tables, &hours_query),
            select::<Review>(tables, &reviews_query),
        )?;

        Ok(CompanyProfile::assemble(
            company, &images, &products, hours, &reviews,
        ))
    }
}
