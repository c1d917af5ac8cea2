use common::review::{Review, ReviewSummary};
use common::sync::CrudList;
use serde_json::json;
use tracing::{info, instrument};

use super::{ActionError, Dashboard};
use crate::backend::table;

impl Dashboard {
    pub fn reviews(&self) -> &CrudList<Review> {
        &self.reviews
    }

    pub fn review_summary(&self) -> ReviewSummary {
        ReviewSummary::of(self.reviews.items())
    }

    /// Publish a review on the public profile.
    pub async fn approve_review(&mut self, id: &str) -> Result<(), ActionError> {
        self.set_review_approval(id, true).await
    }

    /// Take a review off the public profile without deleting it.
    pub async fn hide_review(&mut self, id: &str) -> Result<(), ActionError> {
        self.set_review_approval(id, false).await
    }

    #[instrument(skip(self))]
    async fn set_review_approval(&mut self, id: &str, approved: bool) -> Result<(), ActionError> {
        if !self.reviews.contains(id) {
            return Err(self.report(
                "update the review",
                ActionError::NotFound(format!("review `{id}`")),
            ));
        }
        table::update::<Review>(
            self.backend.tables.as_ref(),
            id,
            &json!({ "is_approved": approved }),
        )
        .await
        .map_err(|e| self.report("update the review", e.into()))?;
        self.reviews.update(id, |r| r.is_approved = approved);
        info!(review = id, approved, "Review moderated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_review(&mut self, id: &str) -> Result<Review, ActionError> {
        let Some(author) = self.reviews.get(id).map(|r| r.author_name.clone()) else {
            return Err(self.report(
                "delete the review",
                ActionError::NotFound(format!("review `{id}`")),
            ));
        };
        self.confirm(&format!("Delete the review by {author}?"))?;
        table::delete::<Review>(self.backend.tables.as_ref(), id)
            .await
            .map_err(|e| self.report("delete the review", e.into()))?;
        let removed = self
            .reviews
            .remove(id)
            .ok_or_else(|| ActionError::NotFound(format!("review `{id}`")))?;
        info!(review = id, "Review deleted");
        Ok(removed)
    }
}
