use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::entities::EmployeeId;

/// Tree node in the arena-based org chart.
#[derive(Debug, Clone)]
pub struct EmployeeNode {
    /// Unique key of the employee
    pub id: EmployeeId,
    /// Display name
    pub name: String,
    /// Indices of direct reports in the arena, in stored order
    pub subordinates: Vec<Index>,
}

impl fmt::Display for EmployeeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Arena-based tree structure holding one org chart.
///
/// Uses generational arena for stable node handles: a handle identifies a
/// node regardless of its field values. Parents are not stored; the locator
/// walks the tree from the root instead.
#[derive(Debug)]
pub struct OrgArena {
    /// Arena storage for all tree nodes
    arena: Arena<EmployeeNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl Default for OrgArena {
    fn default() -> Self {
        Self::new()
    }
}

impl OrgArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, id: EmployeeId, name: String, parent: Option<Index>) -> Index {
        let node = EmployeeNode {
            id,
            name,
            subordinates: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.subordinates.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&EmployeeNode> {
        self.arena.get(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut EmployeeNode> {
        self.arena.get_mut(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order traversal from the root.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.root)
    }

    /// Pre-order traversal of the subtree below `start`, `start` included.
    pub fn iter_from(&self, start: Index) -> TreeIterator<'_> {
        TreeIterator::new(self, Some(start))
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Depth-first search for the node carrying `id`, starting at `start`.
    ///
    /// Children are visited in stored order. Ids are unique, so the result
    /// does not depend on traversal order.
    #[instrument(level = "trace", skip(self))]
    pub fn find_by_id(&self, id: EmployeeId, start: Index) -> Option<Index> {
        self.iter_from(start)
            .find(|(_, node)| node.id == id)
            .map(|(idx, _)| idx)
    }

    /// Depth-first search for the node whose direct reports contain `node`.
    ///
    /// Matches by handle. Returns None for `start` itself and for nodes
    /// outside the subtree.
    #[instrument(level = "trace", skip(self))]
    pub fn find_parent(&self, node: Index, start: Index) -> Option<Index> {
        self.iter_from(start)
            .find(|(_, candidate)| candidate.subordinates.contains(&node))
            .map(|(idx, _)| idx)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut max_depth = 0;
        let mut stack = vec![(root, 1)];

        while let Some((node_idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.get_node(node_idx) {
                for &child in &node.subordinates {
                    stack.push((child, depth + 1));
                }
            }
        }

        max_depth
    }
}

pub struct TreeIterator<'a> {
    arena: &'a OrgArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a OrgArena, start: Option<Index>) -> Self {
        Self {
            arena,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a EmployeeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.subordinates.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a OrgArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a OrgArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a EmployeeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.subordinates.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //      1
    //     / \
    //    2   3
    //    |
    //    4
    fn small_arena() -> (OrgArena, [Index; 4]) {
        let mut arena = OrgArena::new();
        let root = arena.insert_node(1, "root".into(), None);
        let a = arena.insert_node(2, "a".into(), Some(root));
        let b = arena.insert_node(3, "b".into(), Some(root));
        let c = arena.insert_node(4, "c".into(), Some(a));
        (arena, [root, a, b, c])
    }

    #[test]
    fn test_preorder_visits_children_in_stored_order() {
        let (arena, _) = small_arena();
        let ids: Vec<_> = arena.iter().map(|(_, n)| n.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_postorder_yields_children_first() {
        let (arena, _) = small_arena();
        let ids: Vec<_> = arena.iter_postorder().map(|(_, n)| n.id).collect();
        assert_eq!(ids, vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_find_by_id() {
        let (arena, [root, _, b, c]) = small_arena();
        assert_eq!(arena.find_by_id(4, root), Some(c));
        assert_eq!(arena.find_by_id(3, root), Some(b));
        assert_eq!(arena.find_by_id(99, root), None);
        // search is confined to the subtree below start
        assert_eq!(arena.find_by_id(4, b), None);
    }

    #[test]
    fn test_find_parent_matches_by_handle() {
        let mut arena = OrgArena::new();
        let root = arena.insert_node(1, "root".into(), None);
        let a = arena.insert_node(2, "twin".into(), Some(root));
        let b = arena.insert_node(2, "twin".into(), Some(a));

        assert_eq!(arena.find_parent(a, root), Some(root));
        assert_eq!(arena.find_parent(b, root), Some(a));
        assert_eq!(arena.find_parent(root, root), None);
    }

    #[test]
    fn test_depth_and_len() {
        let (arena, _) = small_arena();
        assert_eq!(arena.depth(), 3);
        assert_eq!(arena.len(), 4);
        assert_eq!(OrgArena::new().depth(), 0);
        assert!(OrgArena::new().is_empty());
    }
}
