//! Domain entities: core data structures

use std::fmt;

use generational_arena::Index;

/// Unique numeric key of an employee.
pub type EmployeeId = u64;

/// An employee together with the subordinates reporting to them.
///
/// This is the owned, nested form of a chart: callers build one to hand a
/// hierarchy to [`crate::OrgTree::new`], and [`crate::OrgTree::to_employee`]
/// returns one as a structural snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub subordinates: Vec<Employee>,
}

impl Employee {
    pub fn new(id: EmployeeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            subordinates: Vec::new(),
        }
    }

    pub fn with_subordinates(mut self, subordinates: Vec<Employee>) -> Self {
        self.subordinates = subordinates;
        self
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// One recorded reparent operation.
///
/// Handles refer to live arena nodes, so replaying a record mutates the
/// current chart rather than a copy of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// The node that was moved
    pub employee: Index,
    /// Parent of the employee before the move
    pub old_supervisor: Index,
    /// Parent of the employee after the move
    pub new_supervisor: Index,
    /// Slot the employee occupied in the old supervisor's child list
    pub position: usize,
    /// The employee's child list at move time, promoted to the old supervisor
    pub subordinates: Vec<Index>,
}

impl MoveRecord {
    /// Same employee moved under the same supervisor, compared by handle.
    pub fn is_same_move(&self, employee: Index, new_supervisor: Index) -> bool {
        self.employee == employee && self.new_supervisor == new_supervisor
    }
}
