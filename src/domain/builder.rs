//! Forest builder: wires flat member records and edge rows into linked trees.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::domain::arena::MemberTree;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::member::{Edge, Member};

/// Parent id mapped to its child ids, in edge input order.
pub type Adjacency = HashMap<String, Vec<String>>;

/// Fold raw `(parent, child)` edge rows into the adjacency mapping.
///
/// A repeated `(parent, child)` pair is a hard error, surfaced here while
/// the mapping is assembled and before any linkage occurs.
#[instrument(level = "debug", skip(edges))]
pub fn fold_edges(edges: &[Edge]) -> DomainResult<Adjacency> {
    let mut adjacency: Adjacency = HashMap::new();
    for edge in edges {
        let children = adjacency.entry(edge.parent.clone()).or_default();
        if children.contains(&edge.child) {
            return Err(DomainError::DuplicateEdge {
                parent: edge.parent.clone(),
                child: edge.child.clone(),
            });
        }
        children.push(edge.child.clone());
    }
    Ok(adjacency)
}

/// Constructs referral trees from flat member and edge records.
///
/// Two passes: index all members by id, then resolve edges. Every failure
/// mode (duplicate member id, duplicate edge, unknown id, cycle) is detected
/// deterministically before any tree is materialized.
pub struct ForestBuilder {
    member_index: HashMap<String, Member>,
    member_order: Vec<String>,
    adjacency: Adjacency,
}

impl Default for ForestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ForestBuilder {
    pub fn new() -> Self {
        Self {
            member_index: HashMap::new(),
            member_order: Vec::new(),
            adjacency: HashMap::new(),
        }
    }

    /// Build the forest: one tree per root member.
    ///
    /// A root is a member whose id never appears as a child id in any edge;
    /// members with no edges at all form single-node trees. Root order
    /// follows member input order, child order follows edge input order.
    ///
    /// The build is all-or-nothing: any error aborts with no partial forest.
    #[instrument(level = "debug", skip(self, members, edges))]
    pub fn build(&mut self, members: Vec<Member>, edges: &[Edge]) -> DomainResult<Vec<MemberTree>> {
        // Reset state for fresh build
        self.member_index.clear();
        self.member_order.clear();

        for member in members {
            if self.member_index.contains_key(&member.id) {
                return Err(DomainError::DuplicateMember(member.id));
            }
            self.member_order.push(member.id.clone());
            self.member_index.insert(member.id.clone(), member);
        }

        self.adjacency = fold_edges(edges)?;
        self.check_edge_ids(edges)?;
        self.check_acyclic()?;

        let roots = self.find_roots();
        debug!("building {} trees from {} members", roots.len(), self.member_order.len());

        let mut forest = Vec::with_capacity(roots.len());
        for root in roots {
            forest.push(self.build_tree(&root));
        }
        Ok(forest)
    }

    /// Every id named by an edge must resolve to a known member.
    fn check_edge_ids(&self, edges: &[Edge]) -> DomainResult<()> {
        for edge in edges {
            for id in [&edge.parent, &edge.child] {
                if !self.member_index.contains_key(id.as_str()) {
                    return Err(DomainError::UnknownId {
                        parent: edge.parent.clone(),
                        child: edge.child.clone(),
                        unknown: id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Three-color depth-first search over the adjacency mapping.
    ///
    /// Rejects cycles before any arena is built. A member referenced by two
    /// parents is not a cycle: the shared subtree is simply materialized
    /// under each referencing parent.
    fn check_acyclic(&self) -> DomainResult<()> {
        let mut state: HashMap<&str, VisitState> = HashMap::new();
        for id in &self.member_order {
            self.visit(id, &mut state)?;
        }
        Ok(())
    }

    fn visit<'a>(
        &'a self,
        id: &'a str,
        state: &mut HashMap<&'a str, VisitState>,
    ) -> DomainResult<()> {
        match state.get(id) {
            Some(VisitState::Done) => return Ok(()),
            Some(VisitState::InProgress) => {
                return Err(DomainError::CycleDetected(id.to_string()))
            }
            None => {}
        }
        state.insert(id, VisitState::InProgress);
        if let Some(children) = self.adjacency.get(id) {
            for child in children {
                self.visit(child, state)?;
            }
        }
        state.insert(id, VisitState::Done);
        Ok(())
    }

    /// Members whose id never appears as a child id.
    fn find_roots(&self) -> Vec<String> {
        let child_ids: HashSet<&str> = self
            .adjacency
            .values()
            .flatten()
            .map(String::as_str)
            .collect();

        self.member_order
            .iter()
            .filter(|id| !child_ids.contains(id.as_str()))
            .cloned()
            .collect()
    }

    fn build_tree(&self, root_id: &str) -> MemberTree {
        let mut tree = MemberTree::new();
        let mut stack = vec![(root_id.to_string(), None)];

        while let Some((current_id, parent_idx)) = stack.pop() {
            // check_edge_ids guarantees the lookup succeeds
            let member = self.member_index[&current_id].clone();
            let current_idx = tree.insert_node(member, parent_idx);

            // Reverse push keeps child insertion in edge input order
            if let Some(children) = self.adjacency.get(&current_id) {
                for child in children.iter().rev() {
                    stack.push((child.clone(), Some(current_idx)));
                }
            }
        }

        tree
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}
