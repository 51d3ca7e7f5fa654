use generational_arena::{Arena, Index};
use std::collections::HashMap;
use tracing::instrument;

use crate::domain::member::Member;

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Member payload for this node
    pub member: Member,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena
    pub children: Vec<Index>,
}

/// Arena-based tree holding one referral hierarchy.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Each tree represents one root member and its full downline. The tree is
/// built once and read-only afterwards.
#[derive(Debug)]
pub struct MemberTree {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl Default for MemberTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MemberTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, member: Member, parent: Option<Index>) -> Index {
        let node = TreeNode {
            member,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> PostOrderIterator {
        PostOrderIterator::new(self)
    }

    /// Locate the node holding the member with the given id.
    #[instrument(level = "trace", skip(self))]
    pub fn find_member(&self, id: &str) -> Option<Index> {
        self.iter()
            .find(|(_, node)| node.member.id == id)
            .map(|(idx, _)| idx)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects all leaf members (nodes with no children) in the tree.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_members(&self) -> Vec<&Member> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| &node.member)
            .collect()
    }

    /// Total commission for the subtree rooted at `idx`:
    /// direct commission plus the kickback share of the children's totals.
    ///
    /// Pure function of the subtree, recomputed from scratch on every call.
    /// Repeated calls over overlapping subtrees pay the recomputation cost
    /// each time; use [`commission_table`](Self::commission_table) when
    /// totals for every node are needed.
    pub fn total_commission(&self, idx: Index) -> f64 {
        match self.get_node(idx) {
            Some(node) => {
                let children_total: f64 = node
                    .children
                    .iter()
                    .map(|&child| self.total_commission(child))
                    .sum();
                node.member.direct_commission + node.member.kickback_rate * children_total
            }
            None => 0.0,
        }
    }

    /// Computes the total commission for every node in one post-order pass.
    ///
    /// Agrees node-for-node with [`total_commission`](Self::total_commission)
    /// but does O(n) total work instead of O(n) per queried node.
    #[instrument(level = "debug", skip(self))]
    pub fn commission_table(&self) -> HashMap<Index, f64> {
        let mut totals: HashMap<Index, f64> = HashMap::new();
        for (idx, node) in self.iter_postorder() {
            let children_total: f64 = node
                .children
                .iter()
                .map(|child| totals.get(child).copied().unwrap_or(0.0))
                .sum();
            let total =
                node.member.direct_commission + node.member.kickback_rate * children_total;
            totals.insert(idx, total);
        }
        totals
    }

    /// Lazy pre-order commission breakdown, one line per node.
    ///
    /// Each line shows `name (total = direct + kickback)` with amounts to
    /// two decimal places, indented by 4 spaces per depth level. Parents
    /// appear before their children, children in stored order.
    #[instrument(level = "trace", skip(self))]
    pub fn commission_lines(&self) -> CommissionLines {
        CommissionLines::new(self)
    }
}

pub struct TreeIterator<'a> {
    tree: &'a MemberTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a MemberTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a MemberTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a MemberTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, false));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
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

pub struct CommissionLines<'a> {
    tree: &'a MemberTree,
    stack: Vec<(Index, usize)>,
}

impl<'a> CommissionLines<'a> {
    fn new(tree: &'a MemberTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, 0));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for CommissionLines<'a> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, depth)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                for &child in node.children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }

                // Seed with +0.0: std's empty `Sum<f64>` identity is -0.0,
                // which would render a leaf's kickback as "-0.00".
                let children_total: f64 = node
                    .children
                    .iter()
                    .map(|&child| self.tree.total_commission(child))
                    .fold(0.0, |acc, total| acc + total);
                let kickback = node.member.kickback_rate * children_total;
                let total = node.member.direct_commission + kickback;

                let indent = " ".repeat(depth * 4);
                return Some(format!(
                    "{}{} ({:.2} = {:.2} + {:.2})",
                    indent, node.member.name, total, node.member.direct_commission, kickback
                ));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_tree() -> MemberTree {
        // A -> B -> C -> D
        let mut tree = MemberTree::new();
        let a = tree.insert_node(Member::new("a", "Alice", 100.0, 0.2), None);
        let b = tree.insert_node(Member::new("b", "Bob", 25.0, 0.2), Some(a));
        let c = tree.insert_node(Member::new("c", "Carol", 10.0, 0.2), Some(b));
        tree.insert_node(Member::new("d", "Dave", 5.0, 0.2), Some(c));
        tree
    }

    #[test]
    fn given_leaf_when_total_commission_then_equals_direct() {
        let mut tree = MemberTree::new();
        let root = tree.insert_node(Member::new("a", "Alice", 42.5, 0.2), None);
        assert_eq!(tree.total_commission(root), 42.5);
    }

    #[test]
    fn given_chain_when_total_commission_then_kickback_compounds() {
        let tree = chain_tree();
        let root = tree.root().unwrap();
        assert!((tree.total_commission(root) - 105.44).abs() < 1e-9);
    }

    #[test]
    fn given_chain_when_commission_table_then_matches_recursive_totals() {
        let tree = chain_tree();
        let table = tree.commission_table();
        for (idx, _) in tree.iter() {
            assert_eq!(table[&idx], tree.total_commission(idx));
        }
    }

    #[test]
    fn given_tree_when_iterating_preorder_then_parent_before_children() {
        let tree = chain_tree();
        let names: Vec<_> = tree.iter().map(|(_, n)| n.member.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol", "Dave"]);
    }

    #[test]
    fn given_tree_when_iterating_postorder_then_children_before_parent() {
        let tree = chain_tree();
        let names: Vec<_> = tree
            .iter_postorder()
            .map(|(_, n)| n.member.name.as_str())
            .collect();
        assert_eq!(names, vec!["Dave", "Carol", "Bob", "Alice"]);
    }

    #[test]
    fn given_chain_when_depth_then_counts_levels() {
        assert_eq!(chain_tree().depth(), 4);
    }

    #[test]
    fn given_branching_tree_when_leaf_members_then_returns_only_leaves() {
        let mut tree = MemberTree::new();
        let root = tree.insert_node(Member::new("a", "Alice", 1.0, 0.2), None);
        tree.insert_node(Member::new("b", "Bob", 2.0, 0.2), Some(root));
        tree.insert_node(Member::new("c", "Carol", 3.0, 0.2), Some(root));
        let leaves: Vec<_> = tree.leaf_members().iter().map(|m| m.id.clone()).collect();
        assert_eq!(leaves, vec!["b", "c"]);
    }
}
