use crate::models::BlockId;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Block the command addressed or created, if any
    pub block: Option<BlockId>,
    /// Whether the page content or order changed
    pub changed: bool,
    pub new_selection: Option<BlockId>,
    pub version: u64,
}
