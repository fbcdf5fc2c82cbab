//! Default value functions for serde deserialization.

pub fn grid_size() -> usize {
    50
}

pub fn epsilon() -> f32 {
    2.5
}

pub fn epsilon_step() -> f32 {
    0.4
}

pub fn max_extract_depth() -> usize {
    1000
}
