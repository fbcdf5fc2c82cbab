//! Main MargaConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::pathfinding::{ClumpSize, PlannerConfig};

use super::edits::EditSection;
use super::error::ConfigLoadError;
use super::grid::GridSection;
use super::planner::PlannerSection;

/// Full Marga configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct MargaConfig {
    /// Grid settings
    #[serde(default)]
    pub grid: GridSection,

    /// Search settings
    #[serde(default)]
    pub planner: PlannerSection,

    /// Obstacle edit settings
    #[serde(default)]
    pub edits: EditSection,
}

impl MargaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/marga.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/marga.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Convert to PlannerConfig
    pub fn to_planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            bounds: self.grid.to_bounds(),
            motions: self.grid.to_motion_set(),
            heuristic: self.planner.heuristic,
            corner_rule: self.grid.corner_rule,
            epsilon: self.planner.epsilon,
            epsilon_step: self.planner.epsilon_step,
            repair_mode: self.planner.repair_mode,
            extraction: self.planner.extraction,
            max_extract_depth: self.planner.max_extract_depth,
            max_expansions: self.planner.max_expansions,
            reset_epsilon_on_edit: self.edits.reset_epsilon,
        }
    }

    /// Patch size for interactive toggles
    pub fn clump_size(&self) -> ClumpSize {
        self.edits.clump_size
    }
}
