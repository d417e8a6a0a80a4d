//! Parser module: thin nodes, arena storage, and the recursive-descent state.

pub mod node;
pub mod node_arena;
mod state;
mod state_statements;
mod state_types;

pub use state::{ParseDiagnostic, ParserState};

/// Handle to a node in the [`node_arena::NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Sentinel for "no node".
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self.0 != u32::MAX
    }
}

/// Ordered child list. Order is load-bearing: it matches source declaration
/// order exactly.
pub type NodeList = Vec<NodeIndex>;

/// Modifier flags, combinable with `|`.
pub mod modifier_flags {
    pub const NONE: u32 = 0;
    pub const PUBLIC: u32 = 1;
    pub const PRIVATE: u32 = 2;
    pub const PROTECTED: u32 = 4;
    pub const STATIC: u32 = 8;
    pub const READONLY: u32 = 16;
    pub const EXPORT: u32 = 32;
    pub const DEFAULT: u32 = 64;
    pub const ABSTRACT: u32 = 128;
    pub const DECLARE: u32 = 256;
    pub const ASYNC: u32 = 512;
    pub const CONST: u32 = 1024;
}

/// Per-node flags (variable declaration kinds).
pub mod node_flags {
    pub const NONE: u32 = 0;
    pub const LET: u32 = 1;
    pub const CONST: u32 = 2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_index_sentinel() {
        let index = NodeIndex(0);
        assert!(index.is_some());
        assert!(!index.is_none());

        let none = NodeIndex::NONE;
        assert!(none.is_none());
        assert!(!none.is_some());
    }

    #[test]
    fn modifier_flags_values() {
        assert_eq!(modifier_flags::NONE, 0);
        assert_eq!(modifier_flags::PUBLIC, 1);
        assert_eq!(modifier_flags::EXPORT, 32);
        assert_eq!(modifier_flags::ABSTRACT, 128);
    }
}
