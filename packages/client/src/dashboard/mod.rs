//! The signed-in owner's session: local copies of the company's links,
//! products, images, reviews, hours and theme, kept in step with the
//! backend one confirmed mutation at a time.
//!
//! Every mutation follows the same shape: validate locally, call the
//! backend, and only on success patch the local list. Failures are
//! logged, surfaced through the [`Notifier`] and leave local state as it
//! was. Link edits are the exception: they apply locally at once and are
//! persisted as a whole list.

mod error;
mod hours;
mod images;
mod links;
mod products;
mod reviews;
mod theme;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use common::company::Company;
use common::config::DashboardConfig;
use common::hours::{BusinessHours, WeekHours};
use common::image::{CompanyImage, ImageKind};
use common::link::initial_links;
use common::link_list::LinkList;
use common::product::Product;
use common::review::Review;
use common::sync::{CrudList, Record};
use common::theme::ThemeSelection;
use tracing::{error, info, instrument, warn};

pub use error::{ActionError, LoadError, Redirect};

use crate::backend::table::{select, select_one};
use crate::backend::{AuthUser, BackendError, Collaborators, Direction, Query, TableStore};
use crate::notify::Notifier;

pub struct Dashboard {
    backend: Collaborators,
    notifier: Arc<dyn Notifier>,
    settings: DashboardConfig,
    bucket: String,
    user: AuthUser,
    company: Company,
    links: LinkList,
    products: CrudList<Product>,
    images: CrudList<CompanyImage>,
    reviews: CrudList<Review>,
    hours: WeekHours,
    theme: ThemeSelection,
    uploading: Option<ImageKind>,
    saving_theme: bool,
}

/// Load one of the company's secondary lists. A failure is logged and
/// yields an empty list so the rest of the dashboard still opens.
fn or_empty<T>(table: &'static str, result: Result<Vec<T>, BackendError>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        error!(table, error = %e, "Failed to load dashboard data");
        Vec::new()
    })
}

/// The company's secondary tables as one fetch.
struct Lists {
    products: Vec<Product>,
    images: Vec<CompanyImage>,
    reviews: Vec<Review>,
    hours: Vec<BusinessHours>,
}

async fn fetch_lists(tables: &dyn TableStore, company_id: &str) -> Lists {
    let by_company = Query::new().eq("company_id", company_id);
    let ordered = by_company
        .clone()
        .order_by("display_order", Direction::Asc);
    let reviews_query = by_company
        .clone()
        .order_by("created_at", Direction::Desc);
    let hours_query = by_company.order_by("day_of_week", Direction::Asc);

    let (products, images, reviews, hours) = tokio::join!(
        select::<Product>(tables, &ordered),
        select::<CompanyImage>(tables, &ordered),
        select::<Review>(tables, &reviews_query),
        select::<BusinessHours>(tables, &hours_query),
    );
    Lists {
        products: or_empty(Product::TABLE, products),
        images: or_empty(CompanyImage::TABLE, images),
        reviews: or_empty(Review::TABLE, reviews),
        hours: or_empty(BusinessHours::TABLE, hours),
    }
}

impl Dashboard {
    /// Open the dashboard for the signed-in account.
    ///
    /// Fails with [`LoadError::Unauthenticated`] when nobody is signed in
    /// and with [`LoadError::NoCompany`] when the account owns no company.
    #[instrument(skip_all)]
    pub async fn load(
        backend: Collaborators,
        notifier: Arc<dyn Notifier>,
        settings: DashboardConfig,
        bucket: &str,
    ) -> Result<Self, LoadError> {
        let user = match backend.auth.current_user().await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(LoadError::Unauthenticated),
            Err(e) => {
                warn!(error = %e, "Could not resolve current user");
                return Err(LoadError::Unauthenticated);
            }
        };

        let tables = backend.tables.as_ref();
        let company: Company = select_one(tables, &Query::new().eq("user_id", &user.id))
            .await?
            .ok_or(LoadError::NoCompany)?;

        let lists = fetch_lists(tables, &company.id).await;

        let links = LinkList::new(initial_links(&company));
        let theme = ThemeSelection::new(
            company.selected_theme.as_deref(),
            company.custom_color.as_deref(),
        );
        let hours = WeekHours::from_rows(&company.id, lists.hours);

        info!(user = %user.id, company = %company.id, links = links.len(), "Dashboard loaded");

        Ok(Self {
            products: CrudList::new(lists.products),
            images: CrudList::new(lists.images),
            reviews: CrudList::new(lists.reviews),
            hours,
            links,
            theme,
            backend,
            notifier,
            settings,
            bucket: bucket.to_string(),
            user,
            company,
            uploading: None,
            saving_theme: false,
        })
    }

    /// Re-read the company row and every list from the backend. Unsaved
    /// link edits and an unsaved theme are discarded.
    #[instrument(skip(self), fields(company = %self.company.id))]
    pub async fn reload(&mut self) -> Result<(), ActionError> {
        const ACTION: &str = "reload the dashboard";
        let query = Query::new().eq("id", &self.company.id);
        let result = select_one::<Company>(self.backend.tables.as_ref(), &query).await;
        let company = result
            .map_err(|e| self.report(ACTION, e.into()))?
            .ok_or_else(|| {
                let what = format!("company `{}`", self.company.id);
                self.report(ACTION, ActionError::NotFound(what))
            })?;
        let lists = fetch_lists(self.backend.tables.as_ref(), &company.id).await;

        self.links = LinkList::new(initial_links(&company));
        self.theme = ThemeSelection::new(
            company.selected_theme.as_deref(),
            company.custom_color.as_deref(),
        );
        self.hours = WeekHours::from_rows(&company.id, lists.hours);
        self.products.replace_all(lists.products);
        self.images.replace_all(lists.images);
        self.reviews.replace_all(lists.reviews);
        self.company = company;
        info!(links = self.links.len(), products = self.products.len(), "Dashboard reloaded");
        Ok(())
    }

    pub fn user(&self) -> &AuthUser {
        &self.user
    }

    pub fn company(&self) -> &Company {
        &self.company
    }

    pub async fn sign_out(self) -> Result<(), BackendError> {
        self.backend.auth.sign_out().await?;
        info!(user = %self.user.id, "Signed out");
        Ok(())
    }

    /// Log a failed action and tell the user. Returns the error for `?`.
    fn report(&self, action: &str, err: ActionError) -> ActionError {
        let message = match &err {
            ActionError::Validation(e) => {
                warn!(action, error = %e, "Rejected invalid input");
                e.to_string()
            }
            ActionError::Backend(e) => {
                error!(action, error = %e, "Backend call failed");
                format!("Could not {action}. Please try again.")
            }
            ActionError::NotFound(what) => {
                warn!(action, what = %what, "Target not found");
                format!("Could not {action}: {what} not found.")
            }
            ActionError::Busy => format!("Could not {action}: {err}."),
            ActionError::Cancelled => return err,
        };
        self.notifier.alert(&message);
        err
    }

    /// Ask the user to confirm; a refusal becomes [`ActionError::Cancelled`].
    fn confirm(&self, prompt: &str) -> Result<(), ActionError> {
        if self.notifier.confirm(prompt) {
            Ok(())
        } else {
            Err(ActionError::Cancelled)
        }
    }
}
