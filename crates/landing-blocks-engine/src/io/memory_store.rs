use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::io::{PageStore, StoreError, sort_summaries};
use crate::models::{PageId, PageRecord, PageSummary};

/// In-process page store
///
/// Clones share the same pages. `fail_next_saves` makes the following saves
/// fail with `StoreError::Unavailable`, which is how tests exercise the
/// unsaved-changes path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pages: Arc<RwLock<HashMap<PageId, PageRecord>>>,
    failing_saves: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` calls to `save_page` fail
    pub fn fail_next_saves(&self, count: usize) {
        self.failing_saves.store(count, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.pages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.read().is_empty()
    }

    fn take_failure(&self) -> bool {
        self.failing_saves
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl PageStore for MemoryStore {
    async fn save_page(&self, record: &PageRecord) -> Result<(), StoreError> {
        if self.take_failure() {
            return Err(StoreError::Unavailable("injected save failure".to_string()));
        }
        self.pages.write().insert(record.id, record.clone());
        Ok(())
    }

    async fn load_page(&self, id: &PageId) -> Result<PageRecord, StoreError> {
        self.pages
            .read()
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound(*id))
    }

    async fn list_pages(&self) -> Result<Vec<PageSummary>, StoreError> {
        let mut summaries: Vec<_> = self.pages.read().values().map(PageSummary::from).collect();
        sort_summaries(&mut summaries);
        Ok(summaries)
    }

    async fn delete_page(&self, id: &PageId) -> Result<(), StoreError> {
        self.pages
            .write()
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> PageRecord {
        PageRecord {
            id: PageId::new(),
            title: title.to_string(),
            blocks: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_clones_share_pages() {
        let store = MemoryStore::new();
        let other = store.clone();
        let page = record("Shared");

        store.save_page(&page).await.unwrap();

        assert_eq!(other.load_page(&page.id).await.unwrap(), page);
        assert_eq!(other.len(), 1);
    }

    #[tokio::test]
    async fn test_injected_failures_are_consumed() {
        let store = MemoryStore::new();
        store.fail_next_saves(2);
        let page = record("Flaky");

        assert!(matches!(
            store.save_page(&page).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.save_page(&page).await.is_err());
        assert!(store.save_page(&page).await.is_ok());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let store = MemoryStore::new();
        let zebra = record("Zebra");
        let apple = record("Apple");
        store.save_page(&zebra).await.unwrap();
        store.save_page(&apple).await.unwrap();

        let titles: Vec<_> = store
            .list_pages()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Apple", "Zebra"]);

        store.delete_page(&zebra.id).await.unwrap();
        assert!(matches!(
            store.load_page(&zebra.id).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_page(&zebra.id).await,
            Err(StoreError::NotFound(_))
        ));
    }
}
