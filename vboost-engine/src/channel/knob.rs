//! Circular knob mapping
//!
//! Maps a pointer position on a round knob to a level. The usable arc spans
//! 270 degrees; the remaining 90 degree gap snaps to whichever end is closer.

use vboost_common::GainLevel;

/// Usable sweep of the knob in degrees
const SWEEP_DEG: f64 = 270.0;

/// Level for a pointer at offset (`dx`, `dy`) from the knob centre, in screen
/// coordinates (y grows downwards). `None` when the pointer is exactly on the
/// centre, where no angle exists.
pub fn level_from_pointer(dx: f64, dy: f64) -> Option<GainLevel> {
    if dx == 0.0 && dy == 0.0 {
        return None;
    }

    // Rotate so 0 is at the top
    let mut angle = dy.atan2(dx).to_degrees() + 90.0;
    if angle < 0.0 {
        angle += 360.0;
    }

    let mut swept = angle - 135.0;
    if swept < 0.0 {
        swept += 360.0;
    }

    if swept > SWEEP_DEG {
        swept = if swept > 315.0 { 0.0 } else { SWEEP_DEG };
    }

    let value = (swept / SWEEP_DEG * GainLevel::MAX.percent() as f64).round();
    Some(GainLevel::from_f64(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(dx: f64, dy: f64) -> u16 {
        level_from_pointer(dx, dy).unwrap().percent()
    }

    #[test]
    fn test_arc_endpoints() {
        assert_eq!(level(1.0, 1.0), 0);
        assert_eq!(level(1.0, -1.0), 800);
    }

    #[test]
    fn test_arc_midpoints() {
        assert_eq!(level(-1.0, 0.0), 400);
        assert_eq!(level(0.0, -1.0), 667);
    }

    #[test]
    fn test_gap_snaps_to_nearest_end() {
        assert_eq!(level(1.0, 0.2), 0);
        assert_eq!(level(1.0, -0.2), 800);
    }

    #[test]
    fn test_centre_has_no_level() {
        assert!(level_from_pointer(0.0, 0.0).is_none());
    }
}
