use std::collections::HashSet;
use std::mem;

use tracing::{debug, instrument};

use crate::domain::arena::OrgArena;
use crate::domain::entities::{Employee, EmployeeId};
use crate::domain::error::{DomainError, DomainResult};

/// Loads a nested [`Employee`] value into an [`OrgArena`].
#[derive(Debug, Default)]
pub struct OrgBuilder {
    seen_ids: HashSet<EmployeeId>,
}

impl OrgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the arena with `leader` as root, preserving child order.
    ///
    /// Fails with [`DomainError::DuplicateId`] if two employees share an id.
    #[instrument(level = "debug", skip(self, leader), fields(leader = leader.id))]
    pub fn build(&mut self, leader: Employee) -> DomainResult<OrgArena> {
        let mut tree = OrgArena::new();
        let mut stack = vec![(leader, None)];
        self.seen_ids.clear();

        while let Some((mut employee, parent_idx)) = stack.pop() {
            if !self.seen_ids.insert(employee.id) {
                return Err(DomainError::DuplicateId(employee.id));
            }

            let subordinates = mem::take(&mut employee.subordinates);
            let current_idx = tree.insert_node(employee.id, employee.name, parent_idx);

            // Reverse so the first subordinate is inserted first
            for subordinate in subordinates.into_iter().rev() {
                stack.push((subordinate, Some(current_idx)));
            }
        }

        debug!("built org chart with {} employees", tree.len());
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_preserves_order() {
        let leader = Employee::new(1, "root").with_subordinates(vec![
            Employee::new(2, "a").with_subordinates(vec![Employee::new(4, "c")]),
            Employee::new(3, "b"),
        ]);

        let tree = OrgBuilder::new().build(leader).unwrap();
        let root = tree.root().unwrap();
        let children: Vec<_> = tree
            .get_node(root)
            .unwrap()
            .subordinates
            .iter()
            .map(|&idx| tree.get_node(idx).unwrap().id)
            .collect();
        assert_eq!(children, vec![2, 3]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_build_rejects_duplicate_ids() {
        let leader = Employee::new(1, "root").with_subordinates(vec![
            Employee::new(2, "a"),
            Employee::new(2, "a again"),
        ]);

        let result = OrgBuilder::new().build(leader);
        assert_eq!(result.unwrap_err(), DomainError::DuplicateId(2));
    }

    #[test]
    fn test_builder_is_reusable() {
        let mut builder = OrgBuilder::new();
        builder.build(Employee::new(1, "first")).unwrap();
        let tree = builder.build(Employee::new(1, "second")).unwrap();
        assert_eq!(tree.len(), 1);
    }
}
