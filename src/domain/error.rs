//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::EmployeeId;

/// Domain errors represent violated preconditions of chart operations.
///
/// Every variant is raised before the tree is touched, so a failed call
/// leaves the chart and both history stacks unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("employee not found: {0}")]
    EmployeeNotFound(EmployeeId),

    #[error("supervisor not found: {0}")]
    SupervisorNotFound(EmployeeId),

    #[error("no actions to undo")]
    NothingToUndo,

    #[error("no actions to redo")]
    NothingToRedo,

    #[error("duplicate employee id in chart: {0}")]
    DuplicateId(EmployeeId),

    #[error("the leader cannot be moved: {0}")]
    CannotMoveLeader(EmployeeId),

    #[error("employee cannot supervise themselves: {0}")]
    SelfSupervision(EmployeeId),

    #[error("inconsistent chart: {0}")]
    Inconsistent(String),
}

impl DomainError {
    /// True for both employee and supervisor lookup failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::EmployeeNotFound(_) | DomainError::SupervisorNotFound(_)
        )
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
