//! Presentation-facing queries over a built forest.
//!
//! Supplies the per-member panel the visualization layer shows (identity,
//! direct commission, kickback percentage, immediate children) and the
//! termtree rendering used by the CLI.

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::MemberTree;

/// Immediate child row of the member detail panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildRow {
    pub id: String,
    pub name: String,
    pub direct_commission: f64,
}

/// Everything the presentation layer shows for one selected member.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDetails {
    pub id: String,
    pub name: String,
    pub direct_commission: f64,
    /// Kickback rate scaled to a percentage (0.2 -> 20.0)
    pub kickback_percent: f64,
    pub total_commission: f64,
    pub children: Vec<ChildRow>,
}

/// Look up one member across the forest and assemble its detail panel.
#[instrument(level = "debug", skip(forest))]
pub fn member_details(forest: &[MemberTree], id: &str) -> ApplicationResult<MemberDetails> {
    for tree in forest {
        if let Some(idx) = tree.find_member(id) {
            return Ok(details_at(tree, idx));
        }
    }
    Err(ApplicationError::MemberNotFound(id.to_string()))
}

/// Total commission for one member, searched across the forest.
#[instrument(level = "debug", skip(forest))]
pub fn total_commission(forest: &[MemberTree], id: &str) -> ApplicationResult<f64> {
    for tree in forest {
        if let Some(idx) = tree.find_member(id) {
            return Ok(tree.total_commission(idx));
        }
    }
    Err(ApplicationError::MemberNotFound(id.to_string()))
}

fn details_at(tree: &MemberTree, idx: Index) -> MemberDetails {
    // find_member guarantees the index is live
    let node = tree.get_node(idx).unwrap();
    let children = node
        .children
        .iter()
        .filter_map(|&child_idx| tree.get_node(child_idx))
        .map(|child| ChildRow {
            id: child.member.id.clone(),
            name: child.member.name.clone(),
            direct_commission: child.member.direct_commission,
        })
        .collect();

    MemberDetails {
        id: node.member.id.clone(),
        name: node.member.name.clone(),
        direct_commission: node.member.direct_commission,
        kickback_percent: node.member.kickback_rate * 100.0,
        total_commission: tree.total_commission(idx),
        children,
    }
}

pub trait ToTermTree {
    fn to_tree_string(&self) -> Tree<String>;
}

impl ToTermTree for MemberTree {
    /// Render the tree with `name (total)` labels, totals to two decimals.
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        match self.root() {
            Some(root_idx) => {
                let totals = self.commission_table();

                fn build(
                    tree: &MemberTree,
                    idx: Index,
                    totals: &std::collections::HashMap<Index, f64>,
                ) -> Tree<String> {
                    let node = tree.get_node(idx).unwrap();
                    let label = format!("{} ({:.2})", node.member.name, totals[&idx]);
                    let leaves: Vec<_> = node
                        .children
                        .iter()
                        .map(|&child| build(tree, child, totals))
                        .collect();
                    Tree::new(label).with_leaves(leaves)
                }

                build(self, root_idx, &totals)
            }
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Member;

    fn sample_forest() -> Vec<MemberTree> {
        let mut tree = MemberTree::new();
        let a = tree.insert_node(Member::new("a", "Alice", 100.0, 0.2), None);
        tree.insert_node(Member::new("b", "Bob", 25.0, 0.2), Some(a));
        tree.insert_node(Member::new("c", "Carol", 10.0, 0.25), Some(a));
        vec![tree]
    }

    #[test]
    fn given_forest_when_member_details_then_children_listed_in_order() {
        let forest = sample_forest();
        let details = member_details(&forest, "a").unwrap();

        assert_eq!(details.name, "Alice");
        assert_eq!(details.kickback_percent, 20.0);
        let child_ids: Vec<_> = details.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(child_ids, vec!["b", "c"]);
    }

    #[test]
    fn given_forest_when_unknown_id_then_member_not_found() {
        let forest = sample_forest();
        let err = member_details(&forest, "ghost").unwrap_err();
        assert!(matches!(err, ApplicationError::MemberNotFound(id) if id == "ghost"));
    }

    #[test]
    fn given_forest_when_total_commission_then_sums_all_children() {
        let forest = sample_forest();
        // 100 + 0.2 * (25 + 10)
        assert!((total_commission(&forest, "a").unwrap() - 107.0).abs() < 1e-9);
    }

    #[test]
    fn given_tree_when_rendering_then_labels_carry_totals() {
        let forest = sample_forest();
        let rendered = forest[0].to_tree_string().to_string();
        assert!(rendered.contains("Alice (107.00)"));
        assert!(rendered.contains("Bob (25.00)"));
    }
}
