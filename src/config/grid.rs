//! Grid configuration section.

use serde::{Deserialize, Serialize};

use crate::core::GridBounds;
use crate::grid::{Connectivity, CornerRule, MotionSet};

use super::defaults;

/// Grid settings section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridSection {
    /// Width in cells
    #[serde(default = "defaults::grid_size")]
    pub width: usize,

    /// Height in cells
    #[serde(default = "defaults::grid_size")]
    pub height: usize,

    /// 4- or 8-connected moves
    #[serde(default)]
    pub connectivity: Connectivity,

    /// When a diagonal move counts as cutting a corner
    #[serde(default)]
    pub corner_rule: CornerRule,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            connectivity: Connectivity::Eight,
            corner_rule: CornerRule::BothBlocked,
        }
    }
}

impl GridSection {
    /// Grid extent
    pub fn to_bounds(&self) -> GridBounds {
        GridBounds::new(self.width, self.height)
    }

    /// Motion set for the configured connectivity
    pub fn to_motion_set(&self) -> MotionSet {
        MotionSet::for_connectivity(self.connectivity)
    }
}
