//! Smoothed gain parameter
//!
//! A level change does not jump; the value approaches the new target
//! exponentially:
//!
//! ```text
//! v(t) = target + (v0 - target) * exp(-(t - t0) / tau)
//! ```
//!
//! where `v0` is the live value at the moment of the change `t0`. Retargeting
//! always starts from the live value, so rapid successive changes compose
//! without resetting to an earlier target first.

/// Gain parameter with exponential smoothing
#[derive(Debug, Clone)]
pub struct GainParam {
    /// Live value when the current approach began
    start_value: f32,
    /// Value being approached
    target: f32,
    /// Context time the current approach began
    start_time: f64,
    /// Smoothing time constant in seconds (0 = immediate)
    time_constant: f64,
}

impl GainParam {
    /// Parameter resting at `value`
    pub fn new(value: f32) -> Self {
        Self {
            start_value: value,
            target: value,
            start_time: 0.0,
            time_constant: 0.0,
        }
    }

    /// Value of the parameter at context time `time`
    pub fn value_at(&self, time: f64) -> f32 {
        if time < self.start_time {
            return self.start_value;
        }
        if self.time_constant <= 0.0 {
            return self.target;
        }
        let decay = (-(time - self.start_time) / self.time_constant).exp() as f32;
        self.target + (self.start_value - self.target) * decay
    }

    /// Start approaching `target` at `now` with time constant `time_constant`
    pub fn set_target_at_time(&mut self, target: f32, now: f64, time_constant: f64) {
        self.start_value = self.value_at(now);
        self.start_time = now;
        self.target = target;
        self.time_constant = time_constant.max(0.0);
    }

    /// Jump to `value` immediately
    pub fn set_value(&mut self, value: f32, now: f64) {
        self.start_value = value;
        self.target = value;
        self.start_time = now;
        self.time_constant = 0.0;
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn time_constant(&self) -> f64 {
        self.time_constant
    }
}

impl Default for GainParam {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approach_is_exponential() {
        let mut param = GainParam::new(1.0);
        param.set_target_at_time(2.0, 0.0, 0.1);

        assert_eq!(param.value_at(0.0), 1.0);

        // One time constant covers ~63% of the distance
        let v = param.value_at(0.1);
        assert!((v - (2.0 - (-1.0f32).exp())).abs() < 1e-5, "got {}", v);

        // Effectively settled after many time constants
        assert!((param.value_at(2.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_retarget_starts_from_live_value() {
        let mut param = GainParam::new(1.0);
        param.set_target_at_time(8.0, 0.0, 0.1);

        let live = param.value_at(0.05);
        param.set_target_at_time(0.0, 0.05, 0.1);

        // No discontinuity at the retarget point
        assert_eq!(param.value_at(0.05), live);
        assert!(live > 1.0 && live < 8.0);
        assert!(param.value_at(3.0) < 1e-6);
    }

    #[test]
    fn test_zero_time_constant_jumps() {
        let mut param = GainParam::new(1.0);
        param.set_target_at_time(4.0, 1.0, 0.0);
        // Already at the target on the frame the change lands
        assert_eq!(param.value_at(1.0), 4.0);
        assert_eq!(param.value_at(1.0001), 4.0);
        assert_eq!(param.value_at(0.5), 1.0);

        param.set_value(0.5, 2.0);
        assert_eq!(param.value_at(5.0), 0.5);
    }
}
