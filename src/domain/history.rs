//! Undo/redo stacks of recorded moves

use tracing::trace;

use crate::domain::entities::MoveRecord;

/// Two LIFO stacks of [`MoveRecord`]s.
///
/// Every transfer moves exactly one record; records are never merged.
#[derive(Debug, Default)]
pub struct History {
    undo: Vec<MoveRecord>,
    redo: Vec<MoveRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fresh move, optionally invalidating the redo buffer.
    pub fn record_move(&mut self, record: MoveRecord, clear_redo: bool) {
        if clear_redo && !self.redo.is_empty() {
            trace!("discarding {} undone moves", self.redo.len());
            self.redo.clear();
        }
        self.undo.push(record);
    }

    /// Most recent recorded move, if any.
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.undo.last()
    }

    pub fn pop_undo(&mut self) -> Option<MoveRecord> {
        self.undo.pop()
    }

    pub fn push_undo(&mut self, record: MoveRecord) {
        self.undo.push(record);
    }

    pub fn pop_redo(&mut self) -> Option<MoveRecord> {
        self.redo.pop()
    }

    pub fn push_redo(&mut self, record: MoveRecord) {
        self.redo.push(record);
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use generational_arena::{Arena, Index};

    fn record(arena: &mut Arena<()>) -> MoveRecord {
        let handles: Vec<Index> = (0..3).map(|_| arena.insert(())).collect();
        MoveRecord {
            employee: handles[0],
            old_supervisor: handles[1],
            new_supervisor: handles[2],
            position: 0,
            subordinates: vec![],
        }
    }

    #[test]
    fn test_record_move_clears_redo_when_asked() {
        let mut arena = Arena::new();
        let mut history = History::new();
        history.push_redo(record(&mut arena));

        history.record_move(record(&mut arena), false);
        assert_eq!(history.redo_len(), 1);

        history.record_move(record(&mut arena), true);
        assert_eq!(history.redo_len(), 0);
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn test_stacks_are_lifo() {
        let mut arena = Arena::new();
        let mut history = History::new();
        let first = record(&mut arena);
        let second = record(&mut arena);

        history.record_move(first.clone(), true);
        history.record_move(second.clone(), true);
        assert_eq!(history.last_move(), Some(&second));
        assert_eq!(history.pop_undo(), Some(second));
        assert_eq!(history.pop_undo(), Some(first));
        assert_eq!(history.pop_undo(), None);
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::new();
        let mut history = History::new();
        history.push_undo(record(&mut arena));
        history.push_redo(record(&mut arena));
        history.clear();
        assert_eq!(history.undo_len(), 0);
        assert_eq!(history.redo_len(), 0);
    }
}
