use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::models::{PageId, PageRecord, PageSummary};

pub mod file_store;
pub mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// Failures of the persistence collaborator
///
/// A failed save leaves the document dirty so the user can retry.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Page not found: {0}")]
    NotFound(PageId),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Invalid pages directory: {0}")]
    InvalidPagesDir(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// External storage for pages
///
/// The store receives `{id, title, blocks}` snapshots; it never sees editor
/// state such as the selection or the dirty flag.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Create or overwrite the stored page with the same id
    async fn save_page(&self, record: &PageRecord) -> Result<(), StoreError>;

    async fn load_page(&self, id: &PageId) -> Result<PageRecord, StoreError>;

    /// All stored pages, ordered by title then id
    async fn list_pages(&self) -> Result<Vec<PageSummary>, StoreError>;

    async fn delete_page(&self, id: &PageId) -> Result<(), StoreError>;
}

pub fn validate_pages_dir(path: &Path) -> Result<(), StoreError> {
    if !path.exists() || !path.is_dir() {
        return Err(StoreError::InvalidPagesDir(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    Ok(())
}

/// Absolute path of the JSON file holding page `id` under `pages_root`
pub fn page_path(pages_root: &Path, id: &PageId) -> PathBuf {
    relative_path::RelativePathBuf::from(format!("{id}.json")).to_path(pages_root)
}

pub(crate) fn sort_summaries(summaries: &mut [PageSummary]) {
    summaries.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::create_test_pages_dir;

    #[test]
    fn test_validate_pages_dir_exists() {
        let pages_dir = create_test_pages_dir();
        assert!(validate_pages_dir(pages_dir.path()).is_ok());
    }

    #[test]
    fn test_validate_pages_dir_not_exists() {
        let result = validate_pages_dir(Path::new("/nonexistent/path"));
        assert!(matches!(result, Err(StoreError::InvalidPagesDir(_))));
    }

    #[test]
    fn test_validate_pages_dir_rejects_file() {
        let pages_dir = create_test_pages_dir();
        let file = pages_dir.path().join("page.json");
        std::fs::write(&file, "{}").unwrap();

        assert!(validate_pages_dir(&file).is_err());
    }

    #[test]
    fn test_page_path_is_json_file_under_root() {
        let id = PageId::new();
        let path = page_path(Path::new("/srv/pages"), &id);
        assert_eq!(path, PathBuf::from(format!("/srv/pages/{id}.json")));
    }

    #[test]
    fn test_summaries_sorted_by_title() {
        let mut summaries = vec![
            PageSummary {
                id: PageId::new(),
                title: "Pricing".to_string(),
                block_count: 2,
            },
            PageSummary {
                id: PageId::new(),
                title: "About".to_string(),
                block_count: 0,
            },
        ];

        sort_summaries(&mut summaries);

        let titles: Vec<_> = summaries.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["About", "Pricing"]);
    }
}
