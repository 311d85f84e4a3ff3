use crate::editing::{Cmd, ContentPatch, Direction, EditError, Patch};
use std::collections::HashSet;

use crate::models::{Block, BlockId, BlockKind, PageId, PageRecord};

/// One landing page open in the editor
///
/// Document holds everything the editor needs while a page is being worked on:
///
/// ## 1. Ordered blocks
/// - **Render order**: `blocks` is rendered top to bottom in insertion/move order
/// - **Unique ids**: no two blocks share an id at any instant
/// - **Typed content**: each block's content always carries its kind's fields
///
/// ## 2. Transient selection
/// - At most one selected block, always one that exists
/// - Deleting the selected block clears the selection
/// - Selecting never dirties the document
///
/// ## 3. Dirty tracking
/// - **Clean** on creation and after a successful save
/// - **Dirty** after any mutation that changed title, content or order
/// - **Version**: bumped on each such mutation, used to detect edits made
///   while a save was in flight
///
/// ## Usage Pattern
///
/// ```rust
/// # use landing_blocks_engine::editing::{Document, HeroPatch};
/// # use landing_blocks_engine::models::BlockKind;
/// let mut doc = Document::new("Pricing page");
/// let id = doc.add_block(BlockKind::Hero).id.clone();
///
/// doc.update_block_content(
///     id.as_str(),
///     HeroPatch { heading: Some("Simple pricing".to_string()), ..Default::default() }.into(),
/// )
/// .unwrap();
///
/// assert_eq!(doc.selected(), Some(&id));
/// assert!(doc.is_dirty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub(crate) id: PageId,
    pub(crate) title: String,
    pub(crate) blocks: Vec<Block>,
    pub(crate) selected: Option<BlockId>,
    pub(crate) dirty: bool,
    pub(crate) version: u64,
}

impl Document {
    /// Create an empty, clean page with a fresh id
    pub fn new(title: impl Into<String>) -> Self {
        Self::from_record(PageRecord {
            id: PageId::new(),
            title: title.into(),
            blocks: Vec::new(),
        })
    }

    /// Open a persisted page; the document starts clean with nothing selected
    ///
    /// Pages written by older editors may repeat a block id. Every repeat
    /// after the first gets a fresh id so each block stays addressable.
    pub fn from_record(record: PageRecord) -> Self {
        let mut taken: HashSet<BlockId> = record.blocks.iter().map(|b| b.id.clone()).collect();
        let mut seen = HashSet::with_capacity(record.blocks.len());
        let mut blocks = Vec::with_capacity(record.blocks.len());

        for mut block in record.blocks.iter().cloned() {
            if !seen.insert(block.id.clone()) {
                let kind = block.kind();
                let same_kind = record.blocks.iter().filter(|b| b.kind() == kind).count();
                let fresh = free_block_id(kind, same_kind + 1, |id| taken.contains(id));
                log::warn!(
                    "page {}: duplicate block id {}, renamed to {fresh}",
                    record.id,
                    block.id
                );
                taken.insert(fresh.clone());
                seen.insert(fresh.clone());
                block.id = fresh;
            }
            blocks.push(block);
        }

        Self {
            id: record.id,
            title: record.title,
            blocks,
            selected: None,
            dirty: false,
            version: 0,
        }
    }

    /// The persistable part of the document
    pub fn to_record(&self) -> PageRecord {
        PageRecord {
            id: self.id,
            title: self.title.clone(),
            blocks: self.blocks.clone(),
        }
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    /// Internal/SEO title, never rendered on the page itself
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id == id)
    }

    pub fn selected(&self) -> Option<&BlockId> {
        self.selected.as_ref()
    }

    pub fn selected_block(&self) -> Option<&Block> {
        self.selected
            .as_ref()
            .and_then(|id| self.block(id.as_str()))
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Get the current version
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Rename the page. Returns whether the title actually changed.
    pub fn set_title(&mut self, title: impl Into<String>) -> bool {
        let title = title.into();
        if title == self.title {
            return false;
        }
        log::debug!("page {}: title set to {title:?}", self.id);
        self.title = title;
        self.touch();
        true
    }

    /// Append a block of `kind` with default content and select it
    pub fn add_block(&mut self, kind: BlockKind) -> &Block {
        let id = self.next_block_id(kind);
        log::debug!("page {}: adding block {id}", self.id);

        self.blocks.push(Block::new(id.clone(), kind.default_content()));
        self.selected = Some(id);
        self.touch();

        &self.blocks[self.blocks.len() - 1]
    }

    /// Shallow-merge `patch` into the content of block `id`
    pub fn update_block_content(&mut self, id: &str, patch: ContentPatch) -> Result<(), EditError> {
        let index = self.position(id)?;
        patch.apply_to(&mut self.blocks[index].content)?;
        log::debug!("page {}: updated content of block {id}", self.id);
        self.touch();
        Ok(())
    }

    /// Remove block `id`, clearing the selection if it pointed at it
    pub fn delete_block(&mut self, id: &str) -> Result<Block, EditError> {
        let index = self.position(id)?;
        let removed = self.blocks.remove(index);

        if self.selected.as_ref() == Some(&removed.id) {
            self.selected = None;
        }
        log::debug!("page {}: deleted block {id}", self.id);
        self.touch();
        Ok(removed)
    }

    /// Swap block `id` with its neighbour in `direction`
    ///
    /// Moving past either end is a no-op. Returns whether the order changed;
    /// only a change dirties the document.
    pub fn move_block(&mut self, id: &str, direction: Direction) -> Result<bool, EditError> {
        let index = self.position(id)?;
        let target = match direction {
            Direction::Up => index.saturating_sub(1),
            Direction::Down => (index + 1).min(self.blocks.len() - 1),
        };

        if target == index {
            return Ok(false);
        }

        self.blocks.swap(index, target);
        log::debug!("page {}: moved block {id} from {index} to {target}", self.id);
        self.touch();
        Ok(true)
    }

    /// Select block `id`, or clear the selection with `None`
    pub fn select_block(&mut self, id: Option<&str>) -> Result<(), EditError> {
        self.selected = match id {
            Some(id) => {
                let index = self.position(id)?;
                Some(self.blocks[index].id.clone())
            }
            None => None,
        };
        Ok(())
    }

    /// Apply a command to the document
    ///
    /// ```rust
    /// # use landing_blocks_engine::editing::{Cmd, Document};
    /// # use landing_blocks_engine::models::BlockKind;
    /// let mut doc = Document::new("Home");
    /// let patch = doc.apply(Cmd::AddBlock { kind: BlockKind::Text }).unwrap();
    ///
    /// assert_eq!(patch.block.as_ref().map(|id| id.as_str()), Some("text-1"));
    /// assert_eq!(patch.version, doc.version());
    /// ```
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        crate::editing::commands::apply_command(self, cmd)
    }

    pub(crate) fn position(&self, id: &str) -> Result<usize, EditError> {
        self.blocks
            .iter()
            .position(|block| block.id == id)
            .ok_or_else(|| EditError::NotFound(BlockId::from(id)))
    }

    /// `"{kind}-{n}"` where `n` is one more than the number of blocks of the
    /// same kind, skipping forward past ids that are already taken
    fn next_block_id(&self, kind: BlockKind) -> BlockId {
        let same_kind = self.blocks.iter().filter(|b| b.kind() == kind).count();
        free_block_id(kind, same_kind + 1, |id| self.block(id.as_str()).is_some())
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.version += 1;
    }
}

/// First `"{kind}-{n}"` with `n >= start` that `is_taken` rejects
fn free_block_id(kind: BlockKind, start: usize, is_taken: impl Fn(&BlockId) -> bool) -> BlockId {
    let mut n = start;
    loop {
        let candidate = BlockId::new(format!("{kind}-{n}"));
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
