//! Obstacle edit configuration section.

use serde::{Deserialize, Serialize};

use crate::pathfinding::ClumpSize;

/// Edit settings section
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct EditSection {
    /// Patch size used by interactive toggles
    #[serde(default)]
    pub clump_size: ClumpSize,

    /// Restart the ε schedule after every effective edit
    #[serde(default)]
    pub reset_epsilon: bool,
}
