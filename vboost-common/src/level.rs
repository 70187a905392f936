//! Gain level (percent of native playback volume)
//!
//! A `GainLevel` is an integer percent in `[0, 800]` where 100 is unmodified
//! playback. Every constructor clamps, so a value of this type is always safe to
//! apply or persist. Out-of-range input is expected: continuous knob gestures
//! routinely overshoot either end.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer gain percent, always within `[GainLevel::MIN, GainLevel::MAX]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "f64", into = "u16")]
pub struct GainLevel(u16);

impl GainLevel {
    /// Silence (mute is a level, not a separate state)
    pub const MIN: GainLevel = GainLevel(0);

    /// Unity gain, the neutral point
    pub const UNITY: GainLevel = GainLevel(100);

    /// Maximum boost (8x)
    pub const MAX: GainLevel = GainLevel(800);

    /// Clamp an integer percent into range
    pub fn clamped(percent: i64) -> Self {
        Self(percent.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u16)
    }

    /// Round and clamp a fractional percent. NaN maps to unity.
    pub fn from_f64(percent: f64) -> Self {
        if percent.is_nan() {
            return Self::UNITY;
        }
        let clamped = percent.round().clamp(Self::MIN.0 as f64, Self::MAX.0 as f64);
        Self(clamped as u16)
    }

    /// Percent value
    pub fn percent(&self) -> u16 {
        self.0
    }

    /// Linear gain coefficient (100% -> 1.0, 800% -> 8.0)
    pub fn coefficient(&self) -> f32 {
        self.0 as f32 / 100.0
    }

    /// Whether this level amplifies beyond native volume
    pub fn is_boosted(&self) -> bool {
        self.0 > Self::UNITY.0
    }
}

impl Default for GainLevel {
    fn default() -> Self {
        Self::UNITY
    }
}

impl From<f64> for GainLevel {
    fn from(percent: f64) -> Self {
        Self::from_f64(percent)
    }
}

impl From<GainLevel> for u16 {
    fn from(level: GainLevel) -> Self {
        level.0
    }
}

impl fmt::Display for GainLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_range() {
        assert_eq!(GainLevel::clamped(-50), GainLevel::MIN);
        assert_eq!(GainLevel::clamped(0).percent(), 0);
        assert_eq!(GainLevel::clamped(250).percent(), 250);
        assert_eq!(GainLevel::clamped(800).percent(), 800);
        assert_eq!(GainLevel::clamped(5000), GainLevel::MAX);
    }

    #[test]
    fn test_from_f64_rounds_and_clamps() {
        assert_eq!(GainLevel::from_f64(149.6).percent(), 150);
        assert_eq!(GainLevel::from_f64(-0.4).percent(), 0);
        assert_eq!(GainLevel::from_f64(812.0).percent(), 800);
        assert_eq!(GainLevel::from_f64(f64::INFINITY), GainLevel::MAX);
        assert_eq!(GainLevel::from_f64(f64::NAN), GainLevel::UNITY);
    }

    #[test]
    fn test_coefficient() {
        assert_eq!(GainLevel::UNITY.coefficient(), 1.0);
        assert_eq!(GainLevel::MAX.coefficient(), 8.0);
        assert_eq!(GainLevel::MIN.coefficient(), 0.0);
        assert!(GainLevel::clamped(250).is_boosted());
        assert!(!GainLevel::UNITY.is_boosted());
    }

    #[test]
    fn test_default_is_unity() {
        assert_eq!(GainLevel::default(), GainLevel::UNITY);
    }

    #[test]
    fn test_serde_clamps_on_decode() {
        let level: GainLevel = serde_json::from_str("950").unwrap();
        assert_eq!(level, GainLevel::MAX);

        let level: GainLevel = serde_json::from_str("120.4").unwrap();
        assert_eq!(level.percent(), 120);

        assert_eq!(serde_json::to_string(&GainLevel::clamped(300)).unwrap(), "300");
    }
}
