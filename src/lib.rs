//! In-memory org chart with reparenting moves and undo/redo.
//!
//! ```
//! use orgtree::{Employee, OrgTree};
//!
//! let leader = Employee::new(1, "Ada").with_subordinates(vec![
//!     Employee::new(2, "Bob").with_subordinates(vec![Employee::new(3, "Cy")]),
//!     Employee::new(4, "Dee"),
//! ]);
//! let mut chart = OrgTree::new(leader).unwrap();
//!
//! chart.move_employee(2, 4).unwrap();
//! assert_eq!(chart.subordinate_ids(1).unwrap(), vec![4, 3]);
//! assert_eq!(chart.subordinate_ids(4).unwrap(), vec![2]);
//!
//! chart.undo().unwrap();
//! assert_eq!(chart.subordinate_ids(2).unwrap(), vec![3]);
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod tree_traits;
pub mod util;

pub use config::Settings;
pub use domain::{
    DomainError, DomainResult, Employee, EmployeeId, EmployeeNode, HistoryPolicy, MoveRecord,
    OrgTree,
};
pub use errors::{OrgTreeError, OrgTreeResult};
pub use tree_traits::TreeNodeConvert;
