use serde::{Deserialize, Serialize};

use crate::editing::{ContentPatch, Document, EditError, Patch};
use crate::models::{BlockId, BlockKind};

/// Direction a block moves in the page order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Commands that can be applied to the document
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    AddBlock {
        kind: BlockKind,
    },
    UpdateContent {
        id: BlockId,
        patch: ContentPatch,
    },
    DeleteBlock {
        id: BlockId,
    },
    MoveBlock {
        id: BlockId,
        direction: Direction,
    },
    Select {
        id: Option<BlockId>,
    },
    SetTitle {
        title: String,
    },
}

/// Run a command against the document and describe the outcome
pub(crate) fn apply_command(doc: &mut Document, cmd: Cmd) -> Result<Patch, EditError> {
    let (block, changed) = match cmd {
        Cmd::AddBlock { kind } => {
            let id = doc.add_block(kind).id.clone();
            (Some(id), true)
        }
        Cmd::UpdateContent { id, patch } => {
            doc.update_block_content(id.as_str(), patch)?;
            (Some(id), true)
        }
        Cmd::DeleteBlock { id } => {
            doc.delete_block(id.as_str())?;
            (Some(id), true)
        }
        Cmd::MoveBlock { id, direction } => {
            let moved = doc.move_block(id.as_str(), direction)?;
            (Some(id), moved)
        }
        Cmd::Select { id } => {
            doc.select_block(id.as_ref().map(BlockId::as_str))?;
            (id, false)
        }
        Cmd::SetTitle { title } => (None, doc.set_title(title)),
    };

    Ok(Patch {
        block,
        changed,
        new_selection: doc.selected().cloned(),
        version: doc.version(),
    })
}
