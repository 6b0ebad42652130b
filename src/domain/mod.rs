//! Domain layer: the org chart and its move history
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod history;
pub mod org_tree;

pub use arena::{EmployeeNode, OrgArena};
pub use builder::OrgBuilder;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use history::History;
pub use org_tree::{HistoryPolicy, OrgTree};
