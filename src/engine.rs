//! One-stop evaluation of a guess: paths, score and comparison tree.

use serde::Serialize;
use tracing::debug;

use crate::compare::{build_comparison_tree, ComparisonTree};
use crate::config::ScoringConfig;
use crate::error::Result;
use crate::path::{find_path, PathIndex};
use crate::score::score_paths;
use crate::taxonomy::Taxonomy;
use crate::types::{ScoreOutcome, TaxonomyPath};

/// Everything derived from one (correct, guess) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuessEvaluation {
    pub correct: String,
    pub guess: String,
    pub correct_path: Option<TaxonomyPath>,
    pub guess_path: Option<TaxonomyPath>,
    pub outcome: ScoreOutcome,
    pub tree: ComparisonTree,
}

/// Read-only scorer over a loaded taxonomy
///
/// Holds no per-round state: evaluating the same pair twice yields the same
/// result, so callers decide how often a round is counted.
pub struct ScoringEngine {
    taxonomy: Taxonomy,
    config: ScoringConfig,
    index: PathIndex,
}

impl ScoringEngine {
    pub fn new(taxonomy: Taxonomy, config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        let index = PathIndex::build(&taxonomy);
        Ok(Self {
            taxonomy,
            config,
            index,
        })
    }

    pub fn with_defaults(taxonomy: Taxonomy) -> Self {
        let index = PathIndex::build(&taxonomy);
        Self {
            taxonomy,
            config: ScoringConfig::default(),
            index,
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn find_path(&self, name: &str) -> Option<TaxonomyPath> {
        self.index.get(name).cloned()
    }

    pub fn score(&self, correct: &str, guess: &str) -> ScoreOutcome {
        score_paths(self.index.get(correct), self.index.get(guess), &self.config)
    }

    pub fn evaluate(&self, correct: &str, guess: &str) -> GuessEvaluation {
        let correct_path = self.find_path(correct);
        let guess_path = self.find_path(guess);

        let outcome = score_paths(correct_path.as_ref(), guess_path.as_ref(), &self.config);
        let tree = build_comparison_tree(correct_path.as_ref(), guess_path.as_ref());

        debug!(
            correct,
            guess,
            score = outcome.score,
            distance = ?outcome.total_distance,
            "Evaluated guess"
        );

        GuessEvaluation {
            correct: correct.to_string(),
            guess: guess.to_string(),
            correct_path,
            guess_path,
            outcome,
            tree,
        }
    }
}

/// Evaluate a single pair without building an index first.
pub fn evaluate_once(
    taxonomy: &Taxonomy,
    correct: &str,
    guess: &str,
    config: &ScoringConfig,
) -> GuessEvaluation {
    let correct_path = find_path(taxonomy, correct);
    let guess_path = find_path(taxonomy, guess);
    GuessEvaluation {
        correct: correct.to_string(),
        guess: guess.to_string(),
        outcome: score_paths(correct_path.as_ref(), guess_path.as_ref(), config),
        tree: build_comparison_tree(correct_path.as_ref(), guess_path.as_ref()),
        correct_path,
        guess_path,
    }
}
