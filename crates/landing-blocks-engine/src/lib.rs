pub mod editing;
pub mod form;
pub mod io;
pub mod models;
pub mod render;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{Cmd, ContentPatch, Direction, Document, EditError, Patch, SaveTicket};
pub use io::{FileStore, MemoryStore, PageStore, StoreError};
pub use models::{Block, BlockContent, BlockId, BlockKind, PageId, PageRecord, PageSummary};
