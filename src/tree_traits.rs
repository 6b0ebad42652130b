use std::fmt;

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{OrgArena, OrgTree};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for OrgArena {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        let Some(root_idx) = self.root() else {
            return Tree::new("Empty tree".to_string());
        };
        let Some(root) = self.get_node(root_idx) else {
            return Tree::new("Empty tree".to_string());
        };
        let mut tree = Tree::new(root.to_string());

        fn build_tree(arena: &OrgArena, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = arena.get_node(node_idx) {
                for &child_idx in &node.subordinates {
                    if let Some(child) = arena.get_node(child_idx) {
                        let mut child_tree = Tree::new(child.to_string());
                        build_tree(arena, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        build_tree(self, root_idx, &mut tree);
        tree
    }
}

impl TreeNodeConvert for OrgTree {
    fn to_tree_string(&self) -> Tree<String> {
        self.arena().to_tree_string()
    }
}

impl fmt::Display for OrgTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Employee;

    #[test]
    fn test_render_chart() {
        let leader = Employee::new(1, "Ada").with_subordinates(vec![
            Employee::new(2, "Bob").with_subordinates(vec![Employee::new(4, "Dan")]),
            Employee::new(3, "Cy"),
        ]);
        let tree = OrgTree::new(leader).unwrap();

        let rendered = tree.to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "Ada (1)");
        assert!(lines[1].ends_with("Bob (2)"));
        assert!(lines[2].ends_with("Dan (4)"));
        assert!(lines[3].ends_with("Cy (3)"));
    }

    #[test]
    fn test_render_empty_arena() {
        assert_eq!(OrgArena::new().to_tree_string().to_string().trim(), "Empty tree");
    }
}
