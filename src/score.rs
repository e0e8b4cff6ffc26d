//! Distance-based scoring of a guess against the correct language.

use ndarray::Array2;
use rayon::prelude::*;
use tracing::debug;

use crate::config::ScoringConfig;
use crate::lca::lowest_common_ancestor_index;
use crate::path::{find_path, PathIndex};
use crate::taxonomy::Taxonomy;
use crate::types::{ScoreOutcome, TaxonomyPath};

/// Score two resolved paths. Either path missing scores zero.
pub fn score_paths(
    correct: Option<&TaxonomyPath>,
    guess: Option<&TaxonomyPath>,
    config: &ScoringConfig,
) -> ScoreOutcome {
    let (correct, guess) = match (correct, guess) {
        (Some(c), Some(g)) => (c, g),
        _ => return ScoreOutcome::unresolved(),
    };

    let lca = lowest_common_ancestor_index(correct.as_slice(), guess.as_slice());

    if config.exact_match_shortcut && correct.leaf() == guess.leaf() {
        return ScoreOutcome {
            score: config.max_score,
            total_distance: Some(0),
            correct_distance: 0,
            guess_distance: 0,
            lca,
            exact_match: true,
        };
    }

    let shared = lca.map_or(0, |index| index + 1);
    let extra = config.metric.extra_edges_per_side();
    let correct_distance = side_distance(correct, shared, extra);
    let guess_distance = side_distance(guess, shared, extra);
    let total = correct_distance.saturating_add(guess_distance);
    let score = config
        .max_score
        .saturating_sub(config.edge_penalty.saturating_mul(total));

    debug!(
        correct = correct.leaf(),
        guess = guess.leaf(),
        ?lca,
        total,
        score,
        "Scored guess"
    );

    ScoreOutcome {
        score,
        total_distance: Some(total),
        correct_distance,
        guess_distance,
        lca,
        exact_match: false,
    }
}

/// Edges from the end of `path` up to the child of the LCA on that branch,
/// plus `extra`. Floors at zero when the path ends at or above the LCA.
fn side_distance(path: &TaxonomyPath, shared: usize, extra: u32) -> u32 {
    let edges = path.len() as i64 - 1 - shared as i64 + i64::from(extra);
    u32::try_from(edges.max(0)).unwrap_or(u32::MAX)
}

/// Look up both names and score them.
pub fn score(taxonomy: &Taxonomy, correct: &str, guess: &str, config: &ScoringConfig) -> ScoreOutcome {
    let correct_path = find_path(taxonomy, correct);
    let guess_path = find_path(taxonomy, guess);
    score_paths(correct_path.as_ref(), guess_path.as_ref(), config)
}

/// Score many (correct, guess) pairs in parallel; output order follows input.
pub fn batch_score(
    taxonomy: &Taxonomy,
    pairs: &[(String, String)],
    config: &ScoringConfig,
) -> Vec<ScoreOutcome> {
    let index = PathIndex::build(taxonomy);
    pairs
        .par_iter()
        .map(|(correct, guess)| score_paths(index.get(correct), index.get(guess), config))
        .collect()
}

/// Pairwise score matrix; row `i` treats `names[i]` as the correct answer.
pub fn score_matrix(taxonomy: &Taxonomy, names: &[String], config: &ScoringConfig) -> Array2<u32> {
    let n = names.len();
    let index = PathIndex::build(taxonomy);
    let paths: Vec<Option<&TaxonomyPath>> = names.iter().map(|name| index.get(name)).collect();

    let rows: Vec<Vec<u32>> = (0..n)
        .into_par_iter()
        .map(|i| {
            (0..n)
                .map(|j| score_paths(paths[i], paths[j], config).score)
                .collect()
        })
        .collect();

    let mut matrix = Array2::<u32>::zeros((n, n));
    for (i, row) in rows.into_iter().enumerate() {
        for (j, value) in row.into_iter().enumerate() {
            matrix[[i, j]] = value;
        }
    }

    matrix
}
