//! World storage: arenas, nodes, groups and discovery directories

pub mod arena;
pub mod directory;
pub mod groups;
pub mod objects;

pub use arena::{Arena, ArenaId};
pub use directory::Directory;
pub use groups::SocializeGroup;
pub use objects::{LedgerSlot, Node, NodeKind};
