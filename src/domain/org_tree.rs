//! The org chart and its move/undo/redo engine

use std::collections::HashMap;
use std::mem;

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::domain::arena::{EmployeeNode, OrgArena};
use crate::domain::builder::OrgBuilder;
use crate::domain::entities::{Employee, EmployeeId, MoveRecord};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::history::History;

/// How moves interact with the undo/redo history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HistoryPolicy {
    /// When false, repeating the most recent move is a logged no-op.
    pub allow_redundant_moves: bool,
    /// When true, a new move discards all undone moves.
    pub clear_redo_on_move: bool,
}

impl Default for HistoryPolicy {
    fn default() -> Self {
        Self {
            allow_redundant_moves: true,
            clear_redo_on_move: true,
        }
    }
}

/// An org chart rooted at its leader, with undo/redo of reparent moves.
///
/// A move detaches an employee from their supervisor, promotes the
/// employee's direct reports to that supervisor, and attaches the employee
/// (without reports) under the new supervisor. Undo restores the exact prior
/// structure, including child order.
#[derive(Debug)]
pub struct OrgTree {
    arena: OrgArena,
    leader: Index,
    history: History,
    policy: HistoryPolicy,
}

impl OrgTree {
    /// Wraps the chart rooted at `leader` using the default history policy.
    pub fn new(leader: Employee) -> DomainResult<Self> {
        Self::with_policy(leader, HistoryPolicy::default())
    }

    #[instrument(level = "debug", skip(leader), fields(leader = leader.id))]
    pub fn with_policy(leader: Employee, policy: HistoryPolicy) -> DomainResult<Self> {
        let arena = OrgBuilder::new().build(leader)?;
        let leader = arena
            .root()
            .ok_or_else(|| DomainError::Inconsistent("chart has no root".to_string()))?;
        Ok(Self {
            arena,
            leader,
            history: History::new(),
            policy,
        })
    }

    /// Handle of the root employee; never changes.
    pub fn leader(&self) -> Index {
        self.leader
    }

    pub fn leader_id(&self) -> EmployeeId {
        self.node(self.leader).map(|n| n.id).unwrap_or_default()
    }

    pub fn policy(&self) -> HistoryPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: HistoryPolicy) {
        self.policy = policy;
    }

    pub fn arena(&self) -> &OrgArena {
        &self.arena
    }

    pub fn employee(&self, idx: Index) -> Option<&EmployeeNode> {
        self.arena.get_node(idx)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.arena.depth()
    }

    pub fn find_by_id(&self, id: EmployeeId) -> Option<Index> {
        self.arena.find_by_id(id, self.leader)
    }

    pub fn find_parent(&self, idx: Index) -> Option<Index> {
        self.arena.find_parent(idx, self.leader)
    }

    /// Id of the supervisor of `id`; None for the leader.
    pub fn supervisor_of(&self, id: EmployeeId) -> DomainResult<Option<EmployeeId>> {
        let idx = self
            .find_by_id(id)
            .ok_or(DomainError::EmployeeNotFound(id))?;
        Ok(self
            .find_parent(idx)
            .and_then(|parent| self.node(parent).map(|n| n.id)))
    }

    /// Ids of the direct reports of `id`, in stored order.
    pub fn subordinate_ids(&self, id: EmployeeId) -> DomainResult<Vec<EmployeeId>> {
        let idx = self
            .find_by_id(id)
            .ok_or(DomainError::EmployeeNotFound(id))?;
        let node = self.node_or_err(idx)?;
        Ok(node
            .subordinates
            .iter()
            .filter_map(|&child| self.node(child).map(|n| n.id))
            .collect())
    }

    pub fn can_undo(&self) -> bool {
        self.history.undo_len() > 0
    }

    pub fn can_redo(&self) -> bool {
        self.history.redo_len() > 0
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_len()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_len()
    }

    /// Forgets all recorded moves without touching the chart.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Moves `employee_id` under `supervisor_id`.
    ///
    /// The employee's direct reports are promoted to the employee's current
    /// supervisor. All lookups and checks happen before the chart is touched.
    ///
    /// # Errors
    ///
    /// * [`DomainError::EmployeeNotFound`] / [`DomainError::SupervisorNotFound`]
    ///   if either id is not in the chart.
    /// * [`DomainError::CannotMoveLeader`] if `employee_id` is the leader.
    /// * [`DomainError::SelfSupervision`] if both ids are the same.
    #[instrument(level = "debug", skip(self))]
    pub fn move_employee(
        &mut self,
        employee_id: EmployeeId,
        supervisor_id: EmployeeId,
    ) -> DomainResult<()> {
        let employee = self
            .find_by_id(employee_id)
            .ok_or(DomainError::EmployeeNotFound(employee_id))?;
        let new_supervisor = self
            .find_by_id(supervisor_id)
            .ok_or(DomainError::SupervisorNotFound(supervisor_id))?;

        if employee == self.leader {
            return Err(DomainError::CannotMoveLeader(employee_id));
        }
        if employee == new_supervisor {
            return Err(DomainError::SelfSupervision(employee_id));
        }

        if !self.policy.allow_redundant_moves
            && self
                .history
                .last_move()
                .is_some_and(|last| last.is_same_move(employee, new_supervisor))
        {
            info!(
                "move of {} under {} already recorded, skipping",
                employee_id, supervisor_id
            );
            return Ok(());
        }

        let record = self.apply_move(employee, new_supervisor)?;
        self.history
            .record_move(record, self.policy.clear_redo_on_move);
        Ok(())
    }

    /// Reverts the most recent move.
    #[instrument(level = "debug", skip(self))]
    pub fn undo(&mut self) -> DomainResult<()> {
        let record = self.history.pop_undo().ok_or(DomainError::NothingToUndo)?;
        let undone = self.revert_move(record)?;
        self.history.push_redo(undone);
        Ok(())
    }

    /// Re-applies the most recently undone move against the live chart.
    #[instrument(level = "debug", skip(self))]
    pub fn redo(&mut self) -> DomainResult<()> {
        let undone = self.history.pop_redo().ok_or(DomainError::NothingToRedo)?;
        let record = self.apply_move(undone.employee, undone.new_supervisor)?;
        self.history.push_undo(record);
        Ok(())
    }

    /// Structural snapshot of the chart as a nested [`Employee`] value.
    pub fn to_employee(&self) -> Employee {
        let mut built: HashMap<Index, Employee> = HashMap::with_capacity(self.arena.len());

        for (idx, node) in self.arena.iter_postorder() {
            let subordinates = node
                .subordinates
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            built.insert(
                idx,
                Employee {
                    id: node.id,
                    name: node.name.clone(),
                    subordinates,
                },
            );
        }

        built.remove(&self.leader).unwrap_or_default()
    }

    /// Detach `employee` from its current supervisor, promote its reports,
    /// attach it under `new_supervisor`.
    fn apply_move(&mut self, employee: Index, new_supervisor: Index) -> DomainResult<MoveRecord> {
        let old_supervisor = self
            .find_parent(employee)
            .ok_or_else(|| DomainError::Inconsistent("employee has no supervisor".to_string()))?;
        let position = self
            .node_or_err(old_supervisor)?
            .subordinates
            .iter()
            .position(|&child| child == employee)
            .ok_or_else(|| {
                DomainError::Inconsistent("employee missing from supervisor".to_string())
            })?;

        let subordinates = mem::take(&mut self.node_mut_or_err(employee)?.subordinates);

        let old = self.node_mut_or_err(old_supervisor)?;
        old.subordinates.remove(position);
        old.subordinates.extend(subordinates.iter().copied());

        self.node_mut_or_err(new_supervisor)?
            .subordinates
            .push(employee);

        debug!(
            "moved {:?} from {:?} to {:?}, promoted {} reports",
            employee,
            old_supervisor,
            new_supervisor,
            subordinates.len()
        );

        Ok(MoveRecord {
            employee,
            old_supervisor,
            new_supervisor,
            position,
            subordinates,
        })
    }

    /// Inverse of [`Self::apply_move`]. Returns the record with its
    /// subordinates handed back to the employee.
    fn revert_move(&mut self, mut record: MoveRecord) -> DomainResult<MoveRecord> {
        let employee = record.employee;

        let new = self.node_mut_or_err(record.new_supervisor)?;
        let slot = new
            .subordinates
            .iter()
            .rposition(|&child| child == employee)
            .ok_or_else(|| {
                DomainError::Inconsistent("employee missing from new supervisor".to_string())
            })?;
        new.subordinates.remove(slot);

        let promoted = &record.subordinates;
        let old = self.node_mut_or_err(record.old_supervisor)?;
        old.subordinates.retain(|child| !promoted.contains(child));
        let position = record.position.min(old.subordinates.len());
        old.subordinates.insert(position, employee);

        let restored = mem::take(&mut record.subordinates);
        self.node_mut_or_err(employee)?
            .subordinates
            .extend(restored);

        debug!(
            "restored {:?} under {:?} at position {}",
            employee, record.old_supervisor, position
        );
        Ok(record)
    }

    fn node(&self, idx: Index) -> Option<&EmployeeNode> {
        self.arena.get_node(idx)
    }

    fn node_or_err(&self, idx: Index) -> DomainResult<&EmployeeNode> {
        self.arena
            .get_node(idx)
            .ok_or_else(|| DomainError::Inconsistent(format!("dangling handle {:?}", idx)))
    }

    fn node_mut_or_err(&mut self, idx: Index) -> DomainResult<&mut EmployeeNode> {
        self.arena
            .get_node_mut(idx)
            .ok_or_else(|| DomainError::Inconsistent(format!("dangling handle {:?}", idx)))
    }
}
