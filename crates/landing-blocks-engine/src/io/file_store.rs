use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::io::{PageStore, StoreError, page_path, sort_summaries};
use crate::models::{PageId, PageRecord, PageSummary};

/// Pages stored as pretty-printed JSON files, one per page, in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read_record(path: &Path) -> Result<PageRecord, StoreError> {
        let content = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl PageStore for FileStore {
    async fn save_page(&self, record: &PageRecord) -> Result<(), StoreError> {
        let path = page_path(&self.root, &record.id);

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(record)?;
        fs::write(&path, content).await?;
        log::debug!("wrote page {} to {}", record.id, path.display());
        Ok(())
    }

    async fn load_page(&self, id: &PageId) -> Result<PageRecord, StoreError> {
        let path = page_path(&self.root, id);
        if !fs::try_exists(&path).await? {
            return Err(StoreError::NotFound(*id));
        }
        Self::read_record(&path).await
    }

    async fn list_pages(&self) -> Result<Vec<PageSummary>, StoreError> {
        if !fs::try_exists(&self.root).await? {
            return Err(StoreError::InvalidPagesDir(
                "pages directory not found".to_string(),
            ));
        }

        let mut summaries = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            match Self::read_record(&path).await {
                Ok(record) => summaries.push(PageSummary::from(&record)),
                Err(e) => log::warn!("skipping unreadable page file {}: {e}", path.display()),
            }
        }

        sort_summaries(&mut summaries);
        Ok(summaries)
    }

    async fn delete_page(&self, id: &PageId) -> Result<(), StoreError> {
        let path = page_path(&self.root, id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound(*id)),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::Document;
    use crate::models::BlockKind;
    use crate::tests::{create_test_file, create_test_pages_dir};
    use pretty_assertions::assert_eq;

    fn sample_record(title: &str) -> PageRecord {
        let mut doc = Document::new(title);
        doc.add_block(BlockKind::Hero);
        doc.add_block(BlockKind::Features);
        doc.to_record()
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let pages_dir = create_test_pages_dir();
        let store = FileStore::new(pages_dir.path());
        let record = sample_record("Home");

        store.save_page(&record).await.unwrap();
        let loaded = store.load_page(&record.id).await.unwrap();

        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_save_creates_missing_root() {
        let pages_dir = create_test_pages_dir();
        let store = FileStore::new(pages_dir.path().join("nested").join("pages"));
        let record = sample_record("Nested");

        store.save_page(&record).await.unwrap();

        assert!(page_path(store.root(), &record.id).exists());
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_page() {
        let pages_dir = create_test_pages_dir();
        let store = FileStore::new(pages_dir.path());
        let mut record = sample_record("Draft");
        store.save_page(&record).await.unwrap();

        record.title = "Final".to_string();
        record.blocks.pop();
        store.save_page(&record).await.unwrap();

        let loaded = store.load_page(&record.id).await.unwrap();
        assert_eq!(loaded.title, "Final");
        assert_eq!(loaded.blocks.len(), 1);
    }

    #[tokio::test]
    async fn test_load_missing_page() {
        let pages_dir = create_test_pages_dir();
        let store = FileStore::new(pages_dir.path());
        let id = PageId::new();

        let result = store.load_page(&id).await;
        assert!(matches!(result, Err(StoreError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_load_corrupt_page_is_serialization_error() {
        let pages_dir = create_test_pages_dir();
        let id = PageId::new();
        create_test_file(&pages_dir, &format!("{id}.json"), "{ not json");
        let store = FileStore::new(pages_dir.path());

        let result = store.load_page(&id).await;
        assert!(matches!(result, Err(StoreError::Serialize(_))));
    }

    #[tokio::test]
    async fn test_list_skips_foreign_and_broken_files() {
        let pages_dir = create_test_pages_dir();
        let store = FileStore::new(pages_dir.path());
        store.save_page(&sample_record("Pricing")).await.unwrap();
        store.save_page(&sample_record("About")).await.unwrap();
        create_test_file(&pages_dir, "notes.txt", "not a page");
        create_test_file(&pages_dir, "broken.json", "[]");

        let pages = store.list_pages().await.unwrap();

        let titles: Vec<_> = pages.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["About", "Pricing"]);
        assert!(pages.iter().all(|p| p.block_count == 2));
    }

    #[tokio::test]
    async fn test_list_missing_root_fails() {
        let store = FileStore::new("/this/path/does/not/exist");
        let result = store.list_pages().await;
        assert!(result.unwrap_err().to_string().contains("pages directory"));
    }

    #[tokio::test]
    async fn test_delete_page() {
        let pages_dir = create_test_pages_dir();
        let store = FileStore::new(pages_dir.path());
        let record = sample_record("Temporary");
        store.save_page(&record).await.unwrap();

        store.delete_page(&record.id).await.unwrap();

        assert!(matches!(
            store.delete_page(&record.id).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(store.list_pages().await.unwrap().is_empty());
    }
}
