//! Planner configuration section.

use serde::{Deserialize, Serialize};

use crate::grid::HeuristicKind;
use crate::pathfinding::{ExtractionStrategy, RepairMode};

use super::defaults;

/// Search settings section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlannerSection {
    /// Initial heuristic inflation (≥ 1)
    #[serde(default = "defaults::epsilon")]
    pub epsilon: f32,

    /// Decrement applied to ε between episodes
    #[serde(default = "defaults::epsilon_step")]
    pub epsilon_step: f32,

    /// Cost-to-go estimate
    #[serde(default)]
    pub heuristic: HeuristicKind,

    /// Propagate edits lazily or eagerly
    #[serde(default)]
    pub repair_mode: RepairMode,

    /// Path reconstruction strategy
    #[serde(default)]
    pub extraction: ExtractionStrategy,

    /// Maximum steps in a reconstructed path
    #[serde(default = "defaults::max_extract_depth")]
    pub max_extract_depth: usize,

    /// Expansion budget per episode call (0 = unlimited)
    #[serde(default)]
    pub max_expansions: usize,
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            epsilon: 2.5,
            epsilon_step: 0.4,
            heuristic: HeuristicKind::Euclidean,
            repair_mode: RepairMode::Lazy,
            extraction: ExtractionStrategy::Backward,
            max_extract_depth: 1000,
            max_expansions: 0,
        }
    }
}
