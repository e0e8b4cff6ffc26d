//! Locating names inside the taxonomy.

use ahash::AHashMap;
use tracing::{debug, trace};

use crate::taxonomy::Taxonomy;
use crate::types::{TaxonomyNode, TaxonomyPath};

/// Root-to-node path of the first node named `name` in depth-first key order.
///
/// Groups and languages are matched alike. When a name occurs in several
/// branches only the earliest is returned.
pub fn find_path(taxonomy: &Taxonomy, name: &str) -> Option<TaxonomyPath> {
    let mut path = Vec::new();
    for (root_name, root) in taxonomy.roots() {
        if search(root_name, root, name, &mut path) {
            trace!(name, depth = path.len() - 1, "Resolved path");
            return TaxonomyPath::new(path);
        }
    }
    debug!(name, "Name not found in taxonomy");
    None
}

fn search(current: &str, node: &TaxonomyNode, target: &str, path: &mut Vec<String>) -> bool {
    path.push(current.to_string());
    if current == target {
        return true;
    }
    for (child_name, child) in node.children() {
        if search(child_name, child, target, path) {
            return true;
        }
    }
    path.pop();
    false
}

/// Precomputed first-match paths for every name in a taxonomy
///
/// Agrees with [`find_path`] for every name, including duplicates.
pub struct PathIndex {
    paths: AHashMap<String, TaxonomyPath>,
}

impl PathIndex {
    pub fn build(taxonomy: &Taxonomy) -> Self {
        let mut paths: AHashMap<String, TaxonomyPath> = AHashMap::new();
        taxonomy.walk(&mut |names, _| {
            let name = names[names.len() - 1];
            if !paths.contains_key(name) {
                let owned = names.iter().map(|s| s.to_string()).collect();
                if let Some(path) = TaxonomyPath::new(owned) {
                    paths.insert(name.to_string(), path);
                }
            }
        });
        debug!(entries = paths.len(), "Built path index");
        Self { paths }
    }

    pub fn get(&self, name: &str) -> Option<&TaxonomyPath> {
        self.paths.get(name)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> Taxonomy {
        Taxonomy::from_json_str(
            r#"{
                "Indo-European": {
                    "Germanic": { "English": { "dictionary": [{"word": "hi"}] } },
                    "Romance": {
                        "Italian": { "dictionary": [{"word": "ciao"}] },
                        "Shared": { "dictionary": [{"word": "x"}] }
                    }
                },
                "Isolates": { "Shared": { "dictionary": [{"word": "y"}] } }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_find_language_path() {
        let path = find_path(&taxonomy(), "Italian").unwrap();
        assert_eq!(path.as_slice(), ["Indo-European", "Romance", "Italian"]);
    }

    #[test]
    fn test_find_group_and_root() {
        let taxonomy = taxonomy();
        assert_eq!(find_path(&taxonomy, "Germanic").unwrap().as_slice(), ["Indo-European", "Germanic"]);
        assert_eq!(find_path(&taxonomy, "Isolates").unwrap().as_slice(), ["Isolates"]);
    }

    #[test]
    fn test_first_match_wins() {
        let path = find_path(&taxonomy(), "Shared").unwrap();
        assert_eq!(path.root(), "Indo-European");
    }

    #[test]
    fn test_missing_and_reserved_names() {
        let taxonomy = taxonomy();
        assert!(find_path(&taxonomy, "Klingon").is_none());
        assert!(find_path(&taxonomy, "dictionary").is_none());
    }

    #[test]
    fn test_index_agrees_with_search() {
        let taxonomy = taxonomy();
        let index = PathIndex::build(&taxonomy);
        for name in ["English", "Italian", "Shared", "Romance", "Isolates"] {
            assert_eq!(index.get(name), find_path(&taxonomy, name).as_ref());
        }
        assert!(index.get("Klingon").is_none());
        assert_eq!(index.len(), 7);
    }
}
