//! Shared data structures for the scoring core.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dictionary entry attached to a language leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(
        default,
        rename = "definition_1",
        alias = "definition",
        skip_serializing_if = "Option::is_none"
    )]
    pub definition: Option<String>,
}

impl WordEntry {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: None,
            definition: None,
        }
    }
}

pub type Children = IndexMap<String, TaxonomyNode>;

/// Node in the language taxonomy
#[derive(Debug, Clone, PartialEq)]
pub enum TaxonomyNode {
    /// Family or subfamily grouping
    Group { children: Children },
    /// Guessable language; `words` is never empty
    Language { words: Vec<WordEntry>, children: Children },
}

impl TaxonomyNode {
    pub fn group() -> Self {
        TaxonomyNode::Group {
            children: Children::new(),
        }
    }

    pub fn children(&self) -> &Children {
        match self {
            TaxonomyNode::Group { children } => children,
            TaxonomyNode::Language { children, .. } => children,
        }
    }

    pub fn words(&self) -> &[WordEntry] {
        match self {
            TaxonomyNode::Group { .. } => &[],
            TaxonomyNode::Language { words, .. } => words,
        }
    }

    pub fn is_language(&self) -> bool {
        matches!(self, TaxonomyNode::Language { .. })
    }
}

/// Root-to-node sequence of names; never empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct TaxonomyPath(Vec<String>);

impl TryFrom<Vec<String>> for TaxonomyPath {
    type Error = &'static str;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        TaxonomyPath::new(names).ok_or("taxonomy path must not be empty")
    }
}

impl From<TaxonomyPath> for Vec<String> {
    fn from(path: TaxonomyPath) -> Self {
        path.0
    }
}

impl TaxonomyPath {
    /// Returns `None` for an empty sequence.
    pub fn new(names: Vec<String>) -> Option<Self> {
        if names.is_empty() {
            None
        } else {
            Some(Self(names))
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn root(&self) -> &str {
        &self.0[0]
    }

    /// Last element: the name that was looked up.
    pub fn leaf(&self) -> &str {
        &self.0[self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// False for every constructed path, deserialized ones included.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Edges from the root to the leaf.
    pub fn depth(&self) -> usize {
        self.0.len() - 1
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for TaxonomyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// Relationship of a comparison-tree node to the two compared paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeRelation {
    Common,
    CorrectPath,
    GuessPath,
    CorrectLeaf,
    GuessLeaf,
}

impl NodeRelation {
    pub fn is_leaf(self) -> bool {
        matches!(self, NodeRelation::CorrectLeaf | NodeRelation::GuessLeaf)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeRelation::Common => "common",
            NodeRelation::CorrectPath => "correct-path",
            NodeRelation::GuessPath => "guess-path",
            NodeRelation::CorrectLeaf => "correct-leaf",
            NodeRelation::GuessLeaf => "guess-leaf",
        }
    }

    fn precedence(self) -> u8 {
        match self {
            NodeRelation::CorrectLeaf => 4,
            NodeRelation::GuessLeaf => 3,
            NodeRelation::Common => 2,
            NodeRelation::CorrectPath => 1,
            NodeRelation::GuessPath => 0,
        }
    }

    /// Tag kept when the same node arrives from both paths.
    pub fn strongest(self, other: NodeRelation) -> NodeRelation {
        if other.precedence() > self.precedence() {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for NodeRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node of the merged comparison tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonNode {
    pub relation: NodeRelation,
    pub children: IndexMap<String, ComparisonNode>,
}

impl ComparisonNode {
    pub fn new(relation: NodeRelation) -> Self {
        Self {
            relation,
            children: IndexMap::new(),
        }
    }
}

/// Result of scoring one (correct, guess) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreOutcome {
    pub score: u32,
    /// Edges between the two nodes; `None` if either name was not found
    pub total_distance: Option<u32>,
    pub correct_distance: u32,
    pub guess_distance: u32,
    /// Index of the lowest common ancestor; `None` when the paths share no root
    pub lca: Option<usize>,
    pub exact_match: bool,
}

impl ScoreOutcome {
    pub fn unresolved() -> Self {
        Self {
            score: 0,
            total_distance: None,
            correct_distance: 0,
            guess_distance: 0,
            lca: None,
            exact_match: false,
        }
    }
}

/// Language leaf with its location, as listed for autocomplete
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageEntry {
    pub name: String,
    pub path: TaxonomyPath,
    pub words: Vec<WordEntry>,
}
