//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod member;

pub use arena::{MemberTree, TreeNode};
pub use builder::{fold_edges, Adjacency, ForestBuilder};
pub use error::{DomainError, DomainResult};
pub use member::{Edge, Member, DEFAULT_KICKBACK_RATE};
