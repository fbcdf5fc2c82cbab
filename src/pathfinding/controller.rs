//! ε schedule and suboptimality bound.
//!
//! After every completed episode the reported goal cost is at most
//! `bound × optimal`. The bound is the smaller of ε and the ratio between
//! the goal's cost and the smallest un-inflated f-value still pending, so
//! it can prove optimality before ε itself reaches 1.

/// Proven suboptimality factor after an episode, clamped to at least 1.
///
/// `min_f` is `min(g, rhs) + h` over every state still in the frontier or
/// INCONS. With nothing pending the goal cost is final and the bound is 1.
/// An unreached goal carries no guarantee and reports ε.
pub fn suboptimality_bound(epsilon: f32, goal_cost: f32, min_f: f32) -> f32 {
    if !goal_cost.is_finite() {
        return epsilon;
    }
    if min_f.is_infinite() {
        return 1.0;
    }
    if min_f <= 0.0 {
        return if goal_cost <= 0.0 { 1.0 } else { epsilon };
    }
    epsilon.min(goal_cost / min_f).max(1.0)
}

/// ε for the next episode: lowered by `step`, never below 1.
#[inline]
pub fn next_epsilon(epsilon: f32, step: f32) -> f32 {
    (epsilon - step).max(1.0)
}
