//! Merged comparison tree of the correct and guessed paths.
//!
//! The tree is rooted at the lowest common ancestor and only contains the two
//! branches leading down to the compared names. Every node carries a
//! [`NodeRelation`]; word lists are never copied in.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::trace;

use crate::lca::lowest_common_ancestor_index;
use crate::path::find_path;
use crate::taxonomy::Taxonomy;
use crate::types::{ComparisonNode, NodeRelation, TaxonomyPath};

/// Forest of comparison nodes keyed by name; usually a single root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComparisonTree {
    roots: IndexMap<String, ComparisonNode>,
}

impl ComparisonTree {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn roots(&self) -> &IndexMap<String, ComparisonNode> {
        &self.roots
    }

    /// Number of root nodes
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// First node with this name, depth-first.
    pub fn find(&self, name: &str) -> Option<&ComparisonNode> {
        fn search<'a>(
            nodes: &'a IndexMap<String, ComparisonNode>,
            name: &str,
        ) -> Option<&'a ComparisonNode> {
            for (key, node) in nodes {
                if key == name {
                    return Some(node);
                }
                if let Some(found) = search(&node.children, name) {
                    return Some(found);
                }
            }
            None
        }
        search(&self.roots, name)
    }

    pub fn count_relation(&self, relation: NodeRelation) -> usize {
        fn count(nodes: &IndexMap<String, ComparisonNode>, relation: NodeRelation) -> usize {
            nodes
                .values()
                .map(|node| usize::from(node.relation == relation) + count(&node.children, relation))
                .sum()
        }
        count(&self.roots, relation)
    }

    /// `{ name: { "relation": tag, "children": { ... } } }`
    pub fn to_value(&self) -> Value {
        nodes_to_value(&self.roots)
    }

    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    fn insert(&mut self, (name, node): (String, ComparisonNode)) {
        match self.roots.get_mut(&name) {
            Some(existing) => {
                let current = std::mem::replace(existing, ComparisonNode::new(node.relation));
                *existing = merge(current, node);
            }
            None => {
                self.roots.insert(name, node);
            }
        }
    }
}

fn nodes_to_value(nodes: &IndexMap<String, ComparisonNode>) -> Value {
    let map: Map<String, Value> = nodes
        .iter()
        .map(|(name, node)| {
            (
                name.clone(),
                json!({
                    "relation": node.relation.as_str(),
                    "children": nodes_to_value(&node.children),
                }),
            )
        })
        .collect();
    Value::Object(map)
}

/// Look up both names and build their comparison tree.
pub fn comparison_tree(taxonomy: &Taxonomy, correct: &str, guess: &str) -> ComparisonTree {
    let correct_path = find_path(taxonomy, correct);
    let guess_path = find_path(taxonomy, guess);
    build_comparison_tree(correct_path.as_ref(), guess_path.as_ref())
}

/// Merge two paths into one annotated tree.
///
/// A missing path contributes nothing, so a single resolved name yields just
/// its own branch. Paths with different roots yield two separate trees.
pub fn build_comparison_tree(
    correct: Option<&TaxonomyPath>,
    guess: Option<&TaxonomyPath>,
) -> ComparisonTree {
    let mut tree = ComparisonTree::empty();

    let (correct, guess) = match (correct, guess) {
        (None, None) => return tree,
        (Some(c), None) => {
            tree.insert(branch(c, 0, NodeRelation::CorrectPath, NodeRelation::CorrectLeaf));
            return tree;
        }
        (None, Some(g)) => {
            tree.insert(branch(g, 0, NodeRelation::GuessPath, NodeRelation::GuessLeaf));
            return tree;
        }
        (Some(c), Some(g)) => (c, g),
    };

    match lowest_common_ancestor_index(correct.as_slice(), guess.as_slice()) {
        None => {
            trace!(correct = correct.leaf(), guess = guess.leaf(), "Disjoint roots");
            tree.insert(branch(correct, 0, NodeRelation::CorrectPath, NodeRelation::CorrectLeaf));
            tree.insert(branch(guess, 0, NodeRelation::GuessPath, NodeRelation::GuessLeaf));
        }
        Some(lca) => {
            let (root_name, correct_root) =
                branch(correct, lca, NodeRelation::CorrectPath, NodeRelation::CorrectLeaf);
            let (_, guess_root) = branch(guess, lca, NodeRelation::GuessPath, NodeRelation::GuessLeaf);

            let mut root = merge(correct_root, guess_root);
            mark_common(&mut root);
            tree.roots.insert(root_name, root);
        }
    }

    tree
}

/// Chain of nodes for `path[start..]`; the last one gets `leaf`, the rest `along`.
fn branch(
    path: &TaxonomyPath,
    start: usize,
    along: NodeRelation,
    leaf: NodeRelation,
) -> (String, ComparisonNode) {
    let names = path.as_slice();
    let last = names.len() - 1;
    let start = start.min(last);

    let mut name = names[last].clone();
    let mut node = ComparisonNode::new(leaf);
    for parent in names[start..last].iter().rev() {
        let mut parent_node = ComparisonNode::new(along);
        parent_node.children.insert(name, node);
        name = parent.clone();
        node = parent_node;
    }
    (name, node)
}

/// Union of two same-named nodes; children present in both are merged recursively.
fn merge(mut left: ComparisonNode, right: ComparisonNode) -> ComparisonNode {
    left.relation = left.relation.strongest(right.relation);
    for (name, child) in right.children {
        match left.children.get_mut(&name) {
            Some(existing) => {
                let current = std::mem::replace(existing, ComparisonNode::new(child.relation));
                *existing = merge(current, child);
            }
            None => {
                left.children.insert(name, child);
            }
        }
    }
    left
}

/// Tag the LCA as common unless it is one of the leaves. Below the LCA the
/// two branches diverge, so no other node is shared.
fn mark_common(root: &mut ComparisonNode) {
    if !root.relation.is_leaf() {
        root.relation = NodeRelation::Common;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(names: &[&str]) -> TaxonomyPath {
        TaxonomyPath::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_siblings_share_lca_root() {
        let english = path(&["Indo-European", "Germanic", "English"]);
        let italian = path(&["Indo-European", "Romance", "Italian"]);
        let tree = build_comparison_tree(Some(&english), Some(&italian));

        assert_eq!(tree.len(), 1);
        let root = &tree.roots()["Indo-European"];
        assert_eq!(root.relation, NodeRelation::Common);

        let keys: Vec<&str> = root.children.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Germanic", "Romance"]);
        assert_eq!(root.children["Germanic"].relation, NodeRelation::CorrectPath);
        assert_eq!(root.children["Romance"].relation, NodeRelation::GuessPath);
        assert_eq!(tree.find("English").unwrap().relation, NodeRelation::CorrectLeaf);
        assert_eq!(tree.find("Italian").unwrap().relation, NodeRelation::GuessLeaf);
    }

    #[test]
    fn test_tree_starts_at_lca() {
        let english = path(&["Indo-European", "Germanic", "West", "English"]);
        let german = path(&["Indo-European", "Germanic", "West", "German"]);
        let tree = build_comparison_tree(Some(&english), Some(&german));

        assert!(tree.find("Indo-European").is_none());
        assert_eq!(tree.roots()["West"].relation, NodeRelation::Common);
        assert_eq!(tree.count_relation(NodeRelation::Common), 1);
    }

    #[test]
    fn test_leaf_tag_survives_common_retag() {
        let germanic = path(&["Indo-European", "Germanic"]);
        let english = path(&["Indo-European", "Germanic", "English"]);
        let tree = build_comparison_tree(Some(&germanic), Some(&english));

        let root = &tree.roots()["Germanic"];
        assert_eq!(root.relation, NodeRelation::CorrectLeaf);
        assert_eq!(root.children["English"].relation, NodeRelation::GuessLeaf);
        assert_eq!(tree.count_relation(NodeRelation::Common), 0);
    }

    #[test]
    fn test_disjoint_roots_make_a_forest() {
        let finnish = path(&["Uralic", "Finnic", "Finnish"]);
        let turkish = path(&["Turkic", "Turkish"]);
        let tree = build_comparison_tree(Some(&finnish), Some(&turkish));

        let roots: Vec<&str> = tree.roots().keys().map(String::as_str).collect();
        assert_eq!(roots, vec!["Uralic", "Turkic"]);
        assert_eq!(tree.roots()["Uralic"].relation, NodeRelation::CorrectPath);
        assert_eq!(tree.roots()["Turkic"].relation, NodeRelation::GuessPath);
        assert_eq!(tree.count_relation(NodeRelation::CorrectLeaf), 1);
        assert_eq!(tree.count_relation(NodeRelation::GuessLeaf), 1);
    }

    #[test]
    fn test_one_missing_path() {
        let english = path(&["Indo-European", "Germanic", "English"]);
        let tree = build_comparison_tree(Some(&english), None);
        assert_eq!(tree.roots()["Indo-European"].relation, NodeRelation::CorrectPath);
        assert_eq!(tree.count_relation(NodeRelation::GuessLeaf), 0);

        assert!(build_comparison_tree(None, None).is_empty());
    }

    #[test]
    fn test_json_shape() {
        let english = path(&["Indo-European", "Germanic", "English"]);
        let italian = path(&["Indo-European", "Romance", "Italian"]);
        let value = build_comparison_tree(Some(&english), Some(&italian)).to_value();

        assert_eq!(value["Indo-European"]["relation"], "common");
        assert_eq!(
            value["Indo-European"]["children"]["Romance"]["children"]["Italian"]["relation"],
            "guess-leaf"
        );
    }
}
