//! Scoring parameters.
//!
//! The canonical rule charges `EDGE_PENALTY` points per edge between each leaf
//! and the lowest common ancestor, starting from `MAX_SCORE`. An earlier rule
//! (20 points, shared root counted on both sides, no exact-match bonus)
//! is kept reachable through [`ScoringConfig::legacy`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Full credit for an exact guess.
pub const MAX_SCORE: u32 = 16;

/// Points lost per edge of tree distance.
pub const EDGE_PENALTY: u32 = 2;

/// Key under which a taxonomy node stores its word list.
pub const RESERVED_WORDS_KEY: &str = "dictionary";

const LEGACY_MAX_SCORE: u32 = 20;

/// How tree distance between two paths is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceMetric {
    /// Edges from each leaf up to the LCA, the edge into the LCA excluded.
    #[default]
    LcaExclusive,
    /// Also counts the edges into the LCA and both ends of the shared root.
    RootInclusive,
}

impl DistanceMetric {
    /// Edges added to each side's LCA-exclusive count.
    pub fn extra_edges_per_side(self) -> u32 {
        match self {
            DistanceMetric::LcaExclusive => 0,
            DistanceMetric::RootInclusive => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub max_score: u32,
    pub edge_penalty: u32,
    pub metric: DistanceMetric,
    /// Award `max_score` outright when both leaves carry the same name.
    pub exact_match_shortcut: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_score: MAX_SCORE,
            edge_penalty: EDGE_PENALTY,
            metric: DistanceMetric::LcaExclusive,
            exact_match_shortcut: true,
        }
    }
}

impl ScoringConfig {
    pub fn new(max_score: u32, edge_penalty: u32) -> Result<Self> {
        let config = Self {
            max_score,
            edge_penalty,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// The 20-point rule from the first release of the game.
    pub fn legacy() -> Self {
        Self {
            max_score: LEGACY_MAX_SCORE,
            edge_penalty: EDGE_PENALTY,
            metric: DistanceMetric::RootInclusive,
            exact_match_shortcut: false,
        }
    }

    /// Parse from JSON; missing fields take their canonical defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_score == 0 {
            return Err(Error::InvalidConfig("max_score must be positive".into()));
        }
        if self.edge_penalty == 0 {
            return Err(Error::InvalidConfig("edge_penalty must be positive".into()));
        }
        Ok(())
    }
}
