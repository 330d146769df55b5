//! Type-safe integer score on the 0-100 scale.
//!
//! Normalized dimension scores and composite scores are both published as
//! whole numbers. Encoding that in a newtype keeps raw `f64` metric values
//! from being mixed up with scores.
//!
//! ```rust
//! use lobbymap::scoring::Score0To100;
//!
//! assert_eq!(Score0To100::new(150).value(), 100);
//! assert_eq!(Score0To100::from_rounded(69.6).value(), 70);
//! assert_eq!(Score0To100::from_rounded(f64::NAN).value(), 0);
//! ```

use serde::{Deserialize, Serialize};

/// Whole-number score on the 0-100 scale.
///
/// Values are clamped to the [0, 100] range on construction.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Score0To100(u8);

impl Score0To100 {
    pub const ZERO: Score0To100 = Score0To100(0);
    pub const MAX: Score0To100 = Score0To100(100);

    /// Create a new score, clamping to [0, 100].
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Round a real-valued score half away from zero and clamp to [0, 100].
    ///
    /// Non-finite input maps to 0.
    pub fn from_rounded(value: f64) -> Self {
        if !value.is_finite() {
            return Self::ZERO;
        }
        Self(value.round().clamp(0.0, 100.0) as u8)
    }

    /// Get the raw score value.
    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl std::fmt::Display for Score0To100 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_upper_bound() {
        assert_eq!(Score0To100::new(250).value(), 100);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(Score0To100::from_rounded(89.5).value(), 90);
        assert_eq!(Score0To100::from_rounded(89.49).value(), 89);
    }

    #[test]
    fn from_rounded_clamps_both_ends() {
        assert_eq!(Score0To100::from_rounded(-3.0), Score0To100::ZERO);
        assert_eq!(Score0To100::from_rounded(100.4), Score0To100::MAX);
        assert_eq!(Score0To100::from_rounded(f64::INFINITY), Score0To100::ZERO);
    }

    #[test]
    fn serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&Score0To100::new(78)).unwrap(), "78");
    }
}
