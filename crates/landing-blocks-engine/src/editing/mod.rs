/*!
 * # Block Editing Core
 *
 * The editor keeps one landing page in memory as an ordered list of typed
 * blocks and exposes a small set of atomic mutations over it.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: `Document`
 * - `Document` owns the page title, the blocks in render order, the transient
 *   selection and the dirty flag
 * - Every mutation either applies completely or returns an `EditError` and
 *   leaves the document untouched
 *
 * ### 2. Command-Based Editing
 * - Each mutation is also expressible as a `Cmd`, applied with
 *   `Document::apply`, which reports what changed as a `Patch`
 * - UI event handlers build commands; tests drive the methods directly
 *
 * ### 3. Typed Content
 * - Block content is a `BlockContent` variant per kind; partial updates are
 *   `ContentPatch` values merged shallowly into it
 * - Loose key/value edits from forms go through `ContentPatch::from_json`
 *
 * ### 4. Explicit Save Boundary
 * - `Document::save` snapshots `{title, blocks}` into a `SaveTicket`, hands it
 *   to a `PageStore` and clears the dirty flag only when nothing changed while
 *   the store was busy
 *
 * ## Usage Pattern
 *
 * ```rust
 * use landing_blocks_engine::editing::{Cmd, Direction, Document};
 * use landing_blocks_engine::models::BlockKind;
 *
 * let mut doc = Document::new("Spring launch");
 * let hero = doc.add_block(BlockKind::Hero).id.clone();
 * doc.add_block(BlockKind::Cta);
 *
 * let patch = doc
 *     .apply(Cmd::MoveBlock { id: hero, direction: Direction::Down })
 *     .unwrap();
 * assert!(patch.changed);
 * assert!(doc.is_dirty());
 * ```
 */

pub mod commands;
pub mod content_patch;
pub mod document;
pub mod patch;
pub mod save;

pub use commands::{Cmd, Direction};
pub use content_patch::{
    ContentPatch, CtaPatch, FeaturesPatch, HeroPatch, ImagePatch, TestimonialPatch, TextPatch,
};
pub use document::Document;
pub use patch::Patch;
pub use save::SaveTicket;

use crate::models::{BlockId, BlockKind};

/// Errors raised by document mutations
///
/// All of them mean the caller held a stale or malformed reference; the
/// document is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("Block not found: {0}")]
    NotFound(BlockId),
    #[error("Cannot apply {patch} content to a {block} block")]
    KindMismatch { block: BlockKind, patch: BlockKind },
    #[error("Unknown field '{field}' for {kind} block")]
    UnknownField { kind: BlockKind, field: String },
    #[error("Feature item {index} out of range ({len} items)")]
    ItemOutOfRange { index: usize, len: usize },
    #[error("Invalid value for {kind} block: {message}")]
    InvalidValue { kind: BlockKind, message: String },
}
