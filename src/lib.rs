//! Lingo Core: taxonomic distance scoring for the language-guessing game.
//!
//! Provides:
//! - Taxonomy loading and language catalogue (autocomplete, word lists)
//! - Path lookup and lowest-common-ancestor resolution
//! - Distance-based scoring, single and batched
//! - Annotated comparison trees for rendering
//!
//! Python bindings are available behind the `python` feature.

pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod lca;
pub mod path;
pub mod score;
pub mod taxonomy;
pub mod types;

#[cfg(feature = "python")]
mod python;

pub use compare::{build_comparison_tree, comparison_tree, ComparisonTree};
pub use config::{DistanceMetric, ScoringConfig, EDGE_PENALTY, MAX_SCORE, RESERVED_WORDS_KEY};
pub use engine::{evaluate_once, GuessEvaluation, ScoringEngine};
pub use error::{Error, Result};
pub use lca::{common_prefix_len, lowest_common_ancestor_index};
pub use path::{find_path, PathIndex};
pub use score::{batch_score, score, score_matrix, score_paths};
pub use taxonomy::Taxonomy;
pub use types::{
    ComparisonNode, LanguageEntry, NodeRelation, ScoreOutcome, TaxonomyNode, TaxonomyPath, WordEntry,
};
