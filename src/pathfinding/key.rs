//! Two-component priority key.

use std::cmp::Ordering;
use std::fmt;

/// Priority of an inconsistent state.
///
/// Overconsistent states (`g > rhs`) are keyed `(rhs + ε·h, rhs)`, which is
/// `(min(g, rhs) + ε·h, min(g, rhs))`. Underconsistent states (`g < rhs`)
/// are keyed without inflation, `(g + h, g)`, so an invalidated region is
/// reset before any goal it may have supported is accepted.
///
/// Keys compare lexicographically, smaller first. The second component
/// breaks ties in favour of states with a smaller cost-to-come.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Key {
    /// Inflated f-value.
    pub primary: f32,
    /// Cost-to-come estimate.
    pub secondary: f32,
}

impl Key {
    /// Key that sorts after every finite key.
    pub const INFINITE: Key = Key {
        primary: f32::INFINITY,
        secondary: f32::INFINITY,
    };

    /// Create a key from its components.
    #[inline]
    pub const fn new(primary: f32, secondary: f32) -> Self {
        Self { primary, secondary }
    }

    /// Compute the key for a state.
    ///
    /// `∞ + ε·h` stays `∞`, so unreached states sort last.
    #[inline]
    pub fn calculate(g: f32, rhs: f32, h: f32, epsilon: f32) -> Self {
        if g > rhs {
            Self::new(rhs + epsilon * h, rhs)
        } else {
            Self::new(g + h, g)
        }
    }

    /// True if both components are infinite.
    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.primary.is_infinite() && self.secondary.is_infinite()
    }
}

impl Eq for Key {}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary
            .total_cmp(&other.primary)
            .then_with(|| self.secondary.total_cmp(&other.secondary))
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}, {:.3}]", self.primary, self.secondary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicographic_order() {
        assert!(Key::new(1.0, 5.0) < Key::new(2.0, 0.0));
        assert!(Key::new(2.0, 1.0) < Key::new(2.0, 3.0));
        assert!(Key::new(3.0, 3.0) < Key::INFINITE);
        assert_eq!(Key::new(2.0, 2.0), Key::new(2.0, 2.0));
    }

    #[test]
    fn test_calculate_uses_min_of_g_and_rhs() {
        let key = Key::calculate(10.0, 4.0, 2.0, 1.5);
        assert_eq!(key, Key::new(7.0, 4.0));

        let key = Key::calculate(f32::INFINITY, 4.0, 2.0, 1.5);
        assert_eq!(key, Key::new(7.0, 4.0));

        let key = Key::calculate(f32::INFINITY, f32::INFINITY, 2.0, 1.5);
        assert!(key.is_infinite());
    }

    #[test]
    fn test_underconsistent_key_is_not_inflated() {
        let key = Key::calculate(4.0, 10.0, 2.0, 2.5);
        assert_eq!(key, Key::new(6.0, 4.0));
        assert_eq!(key, Key::calculate(4.0, 10.0, 2.0, 1.0));

        let key = Key::calculate(4.0, f32::INFINITY, 2.0, 3.0);
        assert_eq!(key, Key::new(6.0, 4.0));

        // An underconsistent state sorts ahead of an overconsistent one with
        // the same cost-to-come once ε > 1
        assert!(Key::calculate(4.0, 9.0, 2.0, 2.0) < Key::calculate(9.0, 4.0, 2.0, 2.0));
    }

    #[test]
    fn test_key_non_decreasing_in_epsilon() {
        // Underconsistent keys are constant in ε, overconsistent ones grow
        let pairs = [
            (3.0, 5.0, 4.0),
            (5.0, 3.0, 4.0),
            (f32::INFINITY, 2.0, 7.5),
            (0.0, 0.0, 0.0),
        ];
        for (g, rhs, h) in pairs {
            let mut previous = Key::calculate(g, rhs, h, 1.0);
            for step in 1..=20 {
                let epsilon = 1.0 + step as f32 * 0.25;
                let key = Key::calculate(g, rhs, h, epsilon);
                assert!(key >= previous, "key decreased at epsilon={}", epsilon);
                previous = key;
            }
        }
    }
}
