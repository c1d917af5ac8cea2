use chrono::Utc;
use common::company::Company;
use common::link::LinkItem;
use common::link_list::{EditDraft, LinkList, Removal};
use serde_json::json;
use tracing::{info, instrument};

use super::{ActionError, Dashboard};
use crate::backend::table;

impl Dashboard {
    pub fn links(&self) -> &LinkList {
        &self.links
    }

    pub fn toggle_link(&mut self, id: &str) -> bool {
        self.links.toggle_active(id)
    }

    pub fn start_link_edit(&mut self, id: &str) -> Option<EditDraft> {
        self.links.start_edit(id)
    }

    pub fn cancel_link_edit(&mut self) {
        self.links.cancel_edit();
    }

    pub fn commit_link_edit(&mut self, id: &str, title: &str, url: &str) -> bool {
        self.links.commit_edit(id, title, url)
    }

    pub fn duplicate_link(&mut self, id: &str) -> Option<LinkItem> {
        self.links.duplicate(id).cloned()
    }

    /// Remove a link after the user confirms.
    pub fn remove_link(&mut self, id: &str) -> Result<LinkItem, ActionError> {
        let notifier = self.notifier.clone();
        let removal = self.links.remove(id, |link| {
            notifier.confirm(&format!("Delete the link \"{}\"?", link.title))
        });
        match removal {
            Removal::Removed(link) => Ok(link),
            Removal::Declined => Err(ActionError::Cancelled),
            Removal::NotFound => Err(self.report(
                "remove the link",
                ActionError::NotFound(format!("link `{id}`")),
            )),
        }
    }

    pub fn begin_link_drag(&mut self, index: usize) -> bool {
        self.links.begin_drag(index)
    }

    pub fn link_drag_over(&mut self, index: usize) -> bool {
        self.links.drag_over(index)
    }

    /// Drop the dragged link and persist the resulting order.
    pub async fn end_link_drag(&mut self) -> Result<bool, ActionError> {
        if !self.links.end_drag() {
            return Ok(false);
        }
        self.save_links().await?;
        Ok(true)
    }

    /// Move the link at `from` to `to` in one step and persist the order.
    /// Same-index and out-of-range moves change nothing and save nothing.
    pub async fn move_link(&mut self, from: usize, to: usize) -> Result<bool, ActionError> {
        if !self.links.begin_drag(from) {
            return Ok(false);
        }
        if !self.links.drag_over(to) {
            self.links.end_drag();
            return Ok(false);
        }
        self.end_link_drag().await
    }

    /// Write the whole link list, in its current order, to the company row.
    ///
    /// On failure the local list keeps its edits; only the stored copy
    /// lags behind.
    #[instrument(skip(self), fields(company = %self.company.id))]
    pub async fn save_links(&mut self) -> Result<(), ActionError> {
        let items = self.links.items().to_vec();
        let now = Utc::now();
        let patch = json!({ "links": items, "updated_at": now });
        table::update::<Company>(self.backend.tables.as_ref(), &self.company.id, &patch)
            .await
            .map_err(|e| self.report("save your links", e.into()))?;
        info!(count = items.len(), "Links saved");
        self.company.links = Some(items);
        self.company.updated_at = now;
        Ok(())
    }
}
