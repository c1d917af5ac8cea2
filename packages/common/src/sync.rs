use serde::Serialize;
use serde::de::DeserializeOwned;

/// A typed row of a backend table.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const TABLE: &'static str;
}

/// Anything addressable by a string id.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Local cache of a backend table.
///
/// Only ever patched by id after a successful backend call, or replaced
/// wholesale on reload. It is never reconciled against the backend otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct CrudList<T> {
    items: Vec<T>,
}

impl<T> Default for CrudList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> CrudList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn append(&mut self, item: T) {
        self.items.push(item);
    }

    /// Swap in `item` for the entry with the same id. Returns `false` when
    /// no such entry exists.
    pub fn replace(&mut self, item: T) -> bool {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Apply `patch` to the entry with `id`. Returns `false` when absent.
    pub fn update(&mut self, id: &str, patch: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                patch(item);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        value: u32,
    }

    impl Identified for Row {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn row(id: &str, value: u32) -> Row {
        Row {
            id: id.into(),
            value,
        }
    }

    #[test]
    fn replace_only_touches_matching_id() {
        let mut list = CrudList::new(vec![row("a", 1), row("b", 2)]);
        assert!(list.replace(row("b", 20)));
        assert!(!list.replace(row("z", 0)));
        assert_eq!(list.items(), &[row("a", 1), row("b", 20)]);
    }

    #[test]
    fn remove_preserves_order_of_remainder() {
        let mut list = CrudList::new(vec![row("a", 1), row("b", 2), row("c", 3)]);
        assert_eq!(list.remove("b"), Some(row("b", 2)));
        assert_eq!(list.remove("b"), None);
        assert_eq!(list.items(), &[row("a", 1), row("c", 3)]);
    }

    #[test]
    fn update_missing_id_is_noop() {
        let mut list = CrudList::new(vec![row("a", 1)]);
        assert!(!list.update("x", |r| r.value = 9));
        assert!(list.update("a", |r| r.value = 9));
        assert_eq!(list.get("a").map(|r| r.value), Some(9));
    }
}
