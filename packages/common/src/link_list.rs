//! Ordered, drag-reorderable link list.
//!
//! The sequence order itself is the persisted ordering signal. All state of
//! an editing/dragging session (the single "editing" slot and the tracked
//! drag index) lives on the list instance.

use uuid::Uuid;

use crate::link::LinkItem;

/// Suffix appended to the title of a duplicated link.
pub const COPY_SUFFIX: &str = " (copy)";

/// Prefilled values for an inline edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub title: String,
    pub url: String,
}

/// Result of a confirmed removal.
#[derive(Debug, Clone, PartialEq)]
pub enum Removal {
    Removed(LinkItem),
    Declined,
    NotFound,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkList {
    items: Vec<LinkItem>,
    editing: Option<String>,
    dragging: Option<usize>,
}

impl LinkList {
    pub fn new(items: Vec<LinkItem>) -> Self {
        Self {
            items,
            editing: None,
            dragging: None,
        }
    }

    pub fn items(&self) -> &[LinkItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&LinkItem> {
        self.items.iter().find(|l| l.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|l| l.id == id)
    }

    /// Id of the entry currently in edit mode.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Index the in-progress drag currently sits at.
    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    /// Flip the active flag of `id`. Returns `false` if `id` is absent.
    pub fn toggle_active(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|l| l.id == id) {
            Some(link) => {
                link.is_active = !link.is_active;
                true
            }
            None => false,
        }
    }

    /// Put `id` in edit mode, replacing any other edit session.
    pub fn start_edit(&mut self, id: &str) -> Option<EditDraft> {
        let link = self.get(id)?;
        let draft = EditDraft {
            title: link.title.clone(),
            url: link.url.clone(),
        };
        self.editing = Some(id.to_string());
        Some(draft)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Write `title`/`url` to the entry being edited and leave edit mode.
    ///
    /// Rejected (returns `false`, nothing changes) unless `id` is the entry
    /// currently in edit mode.
    pub fn commit_edit(&mut self, id: &str, title: &str, url: &str) -> bool {
        if self.editing.as_deref() != Some(id) {
            return false;
        }
        let Some(link) = self.items.iter_mut().find(|l| l.id == id) else {
            self.editing = None;
            return false;
        };
        link.title = title.to_string();
        link.url = url.to_string();
        self.editing = None;
        true
    }

    /// Append a copy of `id` with a fresh id and a zeroed click counter.
    pub fn duplicate(&mut self, id: &str) -> Option<&LinkItem> {
        let source = self.get(id)?;
        let mut copy = source.clone();
        copy.id = self.fresh_id(&source.id);
        copy.title = format!("{}{COPY_SUFFIX}", source.title);
        copy.clicks = 0;
        self.items.push(copy);
        self.items.last()
    }

    fn fresh_id(&self, source: &str) -> String {
        loop {
            let candidate = format!("copy-{source}-{}", Uuid::new_v4().simple());
            if self.get(&candidate).is_none() {
                return candidate;
            }
        }
    }

    /// Remove `id` once `confirm` agrees. The edit session ends if it
    /// pointed at the removed entry.
    pub fn remove(&mut self, id: &str, confirm: impl FnOnce(&LinkItem) -> bool) -> Removal {
        let Some(index) = self.position(id) else {
            return Removal::NotFound;
        };
        if !confirm(&self.items[index]) {
            return Removal::Declined;
        }
        let removed = self.items.remove(index);
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        self.dragging = None;
        Removal::Removed(removed)
    }

    /// Move the entry at `from` to `to`. No-op when the indices are equal or
    /// out of range.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.items.len() || to >= self.items.len() {
            return false;
        }
        let link = self.items.remove(from);
        self.items.insert(to, link);
        true
    }

    /// Pick up the entry at `index`. Cancels any edit session without saving.
    pub fn begin_drag(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.editing = None;
        self.dragging = Some(index);
        true
    }

    /// The dragged entry hovers over `index`: move it there immediately and
    /// track the new position so the next hover composes.
    pub fn drag_over(&mut self, index: usize) -> bool {
        let Some(from) = self.dragging else {
            return false;
        };
        if !self.reorder(from, index) {
            return false;
        }
        self.dragging = Some(index);
        true
    }

    /// Drop. Clears the tracked index without further mutation and reports
    /// whether a drag was in progress.
    pub fn end_drag(&mut self) -> bool {
        self.dragging.take().is_some()
    }
}
