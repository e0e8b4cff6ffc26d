//! PyO3 bindings for the scoring core.

use numpy::{IntoPyArray, PyArray2};
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::config::ScoringConfig;
use crate::engine::ScoringEngine;
use crate::error::Error;
use crate::lca::lowest_common_ancestor_index;
use crate::score::{score_matrix, score_paths};
use crate::taxonomy::Taxonomy;
use crate::types::{ScoreOutcome, TaxonomyPath};

impl From<Error> for PyErr {
    fn from(err: Error) -> Self {
        match err {
            Error::Io { .. } => PyIOError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

// ============================================================================
// TAXONOMY FUNCTIONS
// ============================================================================

#[pyfunction]
#[pyo3(signature = (json, max_score = None, edge_penalty = None, legacy = false))]
fn py_load_taxonomy(
    json: &str,
    max_score: Option<u32>,
    edge_penalty: Option<u32>,
    legacy: bool,
) -> PyResult<PyTaxonomy> {
    let taxonomy = Taxonomy::from_json_str(json)?;
    let config = build_config(max_score, edge_penalty, legacy);
    Ok(PyTaxonomy {
        engine: ScoringEngine::new(taxonomy, config)?,
    })
}

#[pyfunction]
#[pyo3(signature = (path, max_score = None, edge_penalty = None, legacy = false))]
fn py_load_taxonomy_file(
    path: &str,
    max_score: Option<u32>,
    edge_penalty: Option<u32>,
    legacy: bool,
) -> PyResult<PyTaxonomy> {
    let taxonomy = Taxonomy::from_path(path)?;
    let config = build_config(max_score, edge_penalty, legacy);
    Ok(PyTaxonomy {
        engine: ScoringEngine::new(taxonomy, config)?,
    })
}

fn build_config(max_score: Option<u32>, edge_penalty: Option<u32>, legacy: bool) -> ScoringConfig {
    let base = if legacy {
        ScoringConfig::legacy()
    } else {
        ScoringConfig::default()
    };
    ScoringConfig {
        max_score: max_score.unwrap_or(base.max_score),
        edge_penalty: edge_penalty.unwrap_or(base.edge_penalty),
        ..base
    }
}

// ============================================================================
// PATH FUNCTIONS
// ============================================================================

/// Returns -1 when the paths share no root.
#[pyfunction]
fn py_lowest_common_ancestor_index(path_a: Vec<String>, path_b: Vec<String>) -> i64 {
    lowest_common_ancestor_index(&path_a, &path_b).map_or(-1, |index| index as i64)
}

#[pyfunction]
#[pyo3(signature = (correct_path, guess_path, max_score = None, edge_penalty = None))]
fn py_score_paths(
    correct_path: Option<Vec<String>>,
    guess_path: Option<Vec<String>>,
    max_score: Option<u32>,
    edge_penalty: Option<u32>,
) -> PyResult<PyScore> {
    let config = build_config(max_score, edge_penalty, false);
    config.validate()?;
    let correct = correct_path.and_then(TaxonomyPath::new);
    let guess = guess_path.and_then(TaxonomyPath::new);
    Ok(PyScore::from(score_paths(correct.as_ref(), guess.as_ref(), &config)))
}

// ============================================================================
// PYTHON WRAPPER TYPES
// ============================================================================

#[pyclass]
struct PyScore {
    #[pyo3(get)]
    score: u32,
    #[pyo3(get)]
    total_distance: Option<u32>,
    #[pyo3(get)]
    correct_distance: u32,
    #[pyo3(get)]
    guess_distance: u32,
    #[pyo3(get)]
    lca: i64,
    #[pyo3(get)]
    exact_match: bool,
}

impl From<ScoreOutcome> for PyScore {
    fn from(outcome: ScoreOutcome) -> Self {
        Self {
            score: outcome.score,
            total_distance: outcome.total_distance,
            correct_distance: outcome.correct_distance,
            guess_distance: outcome.guess_distance,
            lca: outcome.lca.map_or(-1, |index| index as i64),
            exact_match: outcome.exact_match,
        }
    }
}

#[pyclass]
struct PyTaxonomy {
    engine: ScoringEngine,
}

#[pymethods]
impl PyTaxonomy {
    fn find_path(&self, name: &str) -> Option<Vec<String>> {
        self.engine.find_path(name).map(TaxonomyPath::into_inner)
    }

    fn score(&self, correct: &str, guess: &str) -> PyScore {
        PyScore::from(self.engine.score(correct, guess))
    }

    fn comparison_tree_json(&self, correct: &str, guess: &str) -> String {
        self.engine.evaluate(correct, guess).tree.to_json()
    }

    fn language_names(&self) -> Vec<String> {
        self.engine.taxonomy().language_names()
    }

    #[pyo3(signature = (query, limit = 10))]
    fn suggest(&self, query: &str, limit: usize) -> Vec<String> {
        self.engine.taxonomy().suggest(query, limit)
    }

    fn canonical_name(&self, input: &str) -> Option<String> {
        self.engine.taxonomy().canonical_name(input)
    }

    fn score_matrix<'py>(&self, py: Python<'py>, names: Vec<String>) -> &'py PyArray2<u32> {
        score_matrix(self.engine.taxonomy(), &names, self.engine.config()).into_pyarray(py)
    }
}

// ============================================================================
// MODULE DEFINITION
// ============================================================================

#[pymodule]
fn lingo_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_load_taxonomy, m)?)?;
    m.add_function(wrap_pyfunction!(py_load_taxonomy_file, m)?)?;
    m.add_function(wrap_pyfunction!(py_lowest_common_ancestor_index, m)?)?;
    m.add_function(wrap_pyfunction!(py_score_paths, m)?)?;

    m.add_class::<PyScore>()?;
    m.add_class::<PyTaxonomy>()?;

    m.add("MAX_SCORE", crate::config::MAX_SCORE)?;
    m.add("EDGE_PENALTY", crate::config::EDGE_PENALTY)?;

    Ok(())
}
