//! Language taxonomy: loading from the game's JSON tree and catalogue queries.
//!
//! The JSON layout is a nest of objects keyed by family, subfamily and language
//! name. A node whose reserved `dictionary` key holds a non-empty array of word
//! entries is a language; everything else is a group. Key order of the document
//! is kept and defines traversal order.

use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, trace, warn};

use crate::config::RESERVED_WORDS_KEY;
use crate::error::{json_kind, Error, Result};
use crate::types::{Children, LanguageEntry, TaxonomyNode, TaxonomyPath, WordEntry};

/// Immutable language family tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Taxonomy {
    roots: Children,
}

impl Taxonomy {
    pub fn new(roots: Children) -> Self {
        Self { roots }
    }

    /// Build from an already parsed JSON value. The value must be an object.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or(Error::NotAMapping {
            found: json_kind(value),
        })?;

        let taxonomy = Self {
            roots: parse_children(map),
        };
        debug!(
            roots = taxonomy.roots.len(),
            nodes = taxonomy.node_count(),
            "Loaded taxonomy"
        );
        Ok(taxonomy)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(&value)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Top-level groups in document order
    pub fn roots(&self) -> &Children {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of named nodes at every depth
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_, _| count += 1);
        count
    }

    /// Pre-order depth-first visit of every node with its root-to-node names.
    pub fn walk<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&[&'a str], &'a TaxonomyNode),
    {
        let mut stack: Vec<&'a str> = Vec::new();
        for (name, node) in &self.roots {
            walk_node(name, node, &mut stack, visit);
        }
    }

    /// Every language leaf in traversal order
    pub fn languages(&self) -> Vec<LanguageEntry> {
        let mut languages = Vec::new();
        self.walk(&mut |names, node| {
            if let TaxonomyNode::Language { words, .. } = node {
                let path = names.iter().map(|s| s.to_string()).collect();
                if let Some(path) = TaxonomyPath::new(path) {
                    languages.push(LanguageEntry {
                        name: path.leaf().to_string(),
                        path,
                        words: words.clone(),
                    });
                }
            }
        });
        languages
    }

    /// Sorted, de-duplicated language names
    pub fn language_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.walk(&mut |path, node| {
            if node.is_language() {
                names.push(path[path.len() - 1].to_string());
            }
        });
        names.sort();
        names.dedup();
        names
    }

    /// Case-insensitive substring search over language names, sorted, at most `limit`.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<String> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.language_names()
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&query))
            .take(limit)
            .collect()
    }

    pub fn is_language(&self, name: &str) -> bool {
        self.find_language(name).is_some()
    }

    /// Stored spelling of a language name typed in any letter case.
    pub fn canonical_name(&self, input: &str) -> Option<String> {
        let wanted = input.trim().to_lowercase();
        self.language_names()
            .into_iter()
            .find(|name| name.to_lowercase() == wanted)
    }

    /// Word list of the first language with this name.
    pub fn words(&self, name: &str) -> Option<&[WordEntry]> {
        self.find_language(name).map(TaxonomyNode::words)
    }

    fn find_language(&self, name: &str) -> Option<&TaxonomyNode> {
        let mut found = None;
        self.walk(&mut |path, node| {
            if found.is_none() && node.is_language() && path[path.len() - 1] == name {
                found = Some(node);
            }
        });
        found
    }
}

fn walk_node<'a, F>(name: &'a str, node: &'a TaxonomyNode, stack: &mut Vec<&'a str>, visit: &mut F)
where
    F: FnMut(&[&'a str], &'a TaxonomyNode),
{
    stack.push(name);
    visit(stack.as_slice(), node);
    for (child_name, child) in node.children() {
        walk_node(child_name, child, stack, visit);
    }
    stack.pop();
}

fn parse_children(map: &Map<String, Value>) -> Children {
    map.iter()
        .filter(|(key, _)| key.as_str() != RESERVED_WORDS_KEY)
        .map(|(key, value)| (key.clone(), parse_node(key, value)))
        .collect()
}

fn parse_node(name: &str, value: &Value) -> TaxonomyNode {
    let map = match value {
        Value::Object(map) => map,
        other => {
            debug!(name, kind = json_kind(other), "Non-object taxonomy entry kept as empty group");
            return TaxonomyNode::group();
        }
    };

    let children = parse_children(map);
    let words = parse_words(name, map.get(RESERVED_WORDS_KEY));

    if words.is_empty() {
        TaxonomyNode::Group { children }
    } else {
        trace!(name, words = words.len(), "Language leaf");
        TaxonomyNode::Language { words, children }
    }
}

fn parse_words(name: &str, value: Option<&Value>) -> Vec<WordEntry> {
    let items = match value {
        None => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!(name, kind = json_kind(other), "Word list is not an array; treating node as a group");
            return Vec::new();
        }
    };

    let words: Vec<WordEntry> = items
        .iter()
        .filter_map(|item| match serde_json::from_value::<WordEntry>(item.clone()) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(name, %err, "Skipping malformed word entry");
                None
            }
        })
        .collect();

    if words.is_empty() && !items.is_empty() {
        warn!(name, "No valid word entries; treating node as a group");
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Indo-European": {
            "Germanic": {
                "English": { "dictionary": [{"word": "happy", "translation": "Happy"}] },
                "German": { "dictionary": [{"word": "glücklich", "definition_1": "feeling joy"}] }
            },
            "Romance": {
                "Italian": { "dictionary": [{"word": "felice"}] },
                "Latin": { "dictionary": [] }
            }
        },
        "Uralic": {
            "Finnish": { "dictionary": "not-a-list" },
            "Hungarian": { "dictionary": [{"word": "boldog"}] }
        }
    }"#;

    #[test]
    fn test_root_must_be_object() {
        let err = Taxonomy::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::NotAMapping { found: "an array" }));
    }

    #[test]
    fn test_key_order_preserved() {
        let taxonomy = Taxonomy::from_json_str(SAMPLE).unwrap();
        let roots: Vec<&str> = taxonomy.roots().keys().map(String::as_str).collect();
        assert_eq!(roots, vec!["Indo-European", "Uralic"]);
    }

    #[test]
    fn test_malformed_dictionaries_are_groups() {
        let taxonomy = Taxonomy::from_json_str(SAMPLE).unwrap();
        assert!(!taxonomy.is_language("Latin"));
        assert!(!taxonomy.is_language("Finnish"));
        assert!(taxonomy.is_language("Hungarian"));
    }

    #[test]
    fn test_languages_in_traversal_order() {
        let taxonomy = Taxonomy::from_json_str(SAMPLE).unwrap();
        let names: Vec<String> = taxonomy.languages().into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["English", "German", "Italian", "Hungarian"]);

        let german = &taxonomy.languages()[1];
        assert_eq!(german.path.to_string(), "Indo-European, Germanic, German");
        assert_eq!(german.words[0].definition.as_deref(), Some("feeling joy"));
    }

    #[test]
    fn test_suggest_is_case_insensitive() {
        let taxonomy = Taxonomy::from_json_str(SAMPLE).unwrap();
        assert_eq!(taxonomy.suggest("GER", 5), vec!["German"]);
        assert_eq!(taxonomy.suggest("an", 1), vec!["German"]);
        assert!(taxonomy.suggest("  ", 5).is_empty());
    }

    #[test]
    fn test_canonical_name() {
        let taxonomy = Taxonomy::from_json_str(SAMPLE).unwrap();
        assert_eq!(taxonomy.canonical_name("english").as_deref(), Some("English"));
        assert_eq!(taxonomy.canonical_name("Germanic"), None);
    }
}
