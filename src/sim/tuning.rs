//! Injectable simulation constants
//!
//! Every field defaults to the matching value in [`crate::consts`]. A partial
//! JSON document overrides only the keys it names.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{TuningError, TuningResult, require_non_negative, require_positive};
use crate::linear;

/// How a slow-motion band scales elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DtRule {
    /// Factor interpolated linearly from `from` at band start to `to` at band end
    Ramp { from: f64, to: f64 },
    /// Constant factor across the band
    Scale(f64),
}

/// One row of the slow-motion table, keyed by score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlowBand {
    pub start: f64,
    pub end: f64,
    pub rule: DtRule,
}

impl SlowBand {
    /// Time multiplier at `score` (not range-checked)
    pub fn factor(&self, score: f64) -> f64 {
        match self.rule {
            DtRule::Ramp { from, to } => linear(score, self.start, self.end, from, to),
            DtRule::Scale(factor) => factor,
        }
    }

    /// Smallest and largest multiplier this band can produce
    fn factor_range(&self) -> (f64, f64) {
        match self.rule {
            DtRule::Ramp { from, to } => (from.min(to), from.max(to)),
            DtRule::Scale(factor) => (factor, factor),
        }
    }
}

/// Ordered table of score bands that dilate time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlowMotion {
    pub bands: Vec<SlowBand>,
}

impl Default for SlowMotion {
    fn default() -> Self {
        Self::standard(
            SLOW_RAMP_DOWN_START,
            SLOW_FULL_START,
            SLOW_FULL_END,
            SLOW_RAMP_UP_END,
            SLOW_FACTOR,
        )
    }
}

impl SlowMotion {
    /// Ramp down over `[b0, b1]`, hold `factor` over `(b1, b2]`, ramp up over `(b2, b3]`
    pub fn standard(b0: f64, b1: f64, b2: f64, b3: f64, factor: f64) -> Self {
        Self {
            bands: vec![
                SlowBand {
                    start: b0,
                    end: b1,
                    rule: DtRule::Ramp {
                        from: 1.0,
                        to: factor,
                    },
                },
                SlowBand {
                    start: b1,
                    end: b2,
                    rule: DtRule::Scale(factor),
                },
                SlowBand {
                    start: b2,
                    end: b3,
                    rule: DtRule::Ramp {
                        from: factor,
                        to: 1.0,
                    },
                },
            ],
        }
    }

    /// Table that never slows time
    pub fn disabled() -> Self {
        Self { bands: Vec::new() }
    }

    /// Scale wall-clock `dt` by the band containing `score`.
    ///
    /// The whole table is gated by an open interval `(first.start, last.end)`;
    /// inside it the first band with `score <= end` applies.
    pub fn effective_dt(&self, score: f64, dt: f64) -> f64 {
        let (Some(first), Some(last)) = (self.bands.first(), self.bands.last()) else {
            return dt;
        };
        if !(first.start < score && score < last.end) {
            return dt;
        }
        match self.bands.iter().find(|band| score <= band.end) {
            Some(band) => dt * band.factor(score),
            None => dt,
        }
    }

    fn validate(&self) -> TuningResult<()> {
        let mut prev_end: Option<f64> = None;
        for (index, band) in self.bands.iter().enumerate() {
            let ordered = band.start.is_finite() && band.end.is_finite() && band.start < band.end;
            let contiguous = prev_end.is_none_or(|end| end == band.start);
            if !ordered || !contiguous {
                return Err(TuningError::MalformedBand {
                    index,
                    start: band.start,
                    end: band.end,
                });
            }
            let (lo, hi) = band.factor_range();
            for factor in [lo, hi] {
                if !(factor > 0.0 && factor <= 1.0) {
                    return Err(TuningError::BandFactor { index, factor });
                }
            }
            prev_end = Some(band.end);
        }
        Ok(())
    }
}

/// Scores that trigger one-shot cues when crossed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestones {
    /// Early cue (short meow)
    pub meow: f64,
    /// Secondary cue (slow meow, inside the slow-motion window)
    pub slow_meow: f64,
    /// Mode switch into the infinite section (nyan song)
    pub nyan: f64,
}

impl Default for Milestones {
    fn default() -> Self {
        Self {
            meow: MEOW_MILESTONE,
            slow_meow: SLOW_MEOW_MILESTONE,
            nyan: NYAN_MILESTONE,
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (units/s²)
    pub gravity: f64,
    /// Velocity magnitude cap (units/s)
    pub max_speed: f64,
    /// Upward velocity set by each tap
    pub impulse_velocity: f64,
    /// Character scroll limit before the background takes over (mm)
    pub mid_screen_offset: f64,
    pub slow_motion: SlowMotion,
    pub milestones: Milestones,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_speed: MAX_SPEED,
            impulse_velocity: IMPULSE_VELOCITY,
            mid_screen_offset: Self::mid_screen_for_viewport(DEFAULT_VIEWPORT_HEIGHT_PX),
            slow_motion: SlowMotion::default(),
            milestones: Milestones::default(),
        }
    }
}

impl Tuning {
    /// Half the viewport height, converted from CSS pixels to millimetres
    pub fn mid_screen_for_viewport(height_px: f64) -> f64 {
        height_px / 2.0 * CSS_PIXEL_TO_MM
    }

    /// Parse a (possibly partial) JSON document and validate the result
    pub fn from_json(json: &str) -> TuningResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every constant is inside its usable range
    pub fn validate(&self) -> TuningResult<()> {
        require_positive("gravity", self.gravity)?;
        require_positive("max_speed", self.max_speed)?;
        require_positive("impulse_velocity", self.impulse_velocity)?;
        require_non_negative("mid_screen_offset", self.mid_screen_offset)?;
        self.slow_motion.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_dt_bands() {
        let slow = SlowMotion::default();

        let ramp = slow.effective_dt(9.0, 1.0);
        assert!(ramp > 0.1 && ramp < 1.0, "ramp-down dt was {}", ramp);

        assert_eq!(slow.effective_dt(11.0, 1.0), 0.1);

        let ramp_up = slow.effective_dt(13.0, 1.0);
        assert!(ramp_up > 0.1 && ramp_up < 1.0);

        assert_eq!(slow.effective_dt(20.0, 0.37), 0.37);
        assert_eq!(slow.effective_dt(0.0, 0.016), 0.016);
    }

    #[test]
    fn test_effective_dt_boundaries() {
        let slow = SlowMotion::default();
        // Outer gate is open on both ends
        assert_eq!(slow.effective_dt(8.0, 0.25), 0.25);
        assert_eq!(slow.effective_dt(14.0, 0.25), 0.25);
        // Band ends are inclusive
        assert!((slow.effective_dt(10.0, 1.0) - 0.1).abs() < 1e-12);
        assert_eq!(slow.effective_dt(12.0, 1.0), 0.1);
    }

    #[test]
    fn test_disabled_table_passes_dt_through() {
        assert_eq!(SlowMotion::disabled().effective_dt(11.0, 0.5), 0.5);
    }

    #[test]
    fn test_partial_json_overrides() {
        let tuning = Tuning::from_json(r#"{ "gravity": 2.5, "milestones": { "nyan": 100.0 } }"#)
            .unwrap();
        assert_eq!(tuning.gravity, 2.5);
        assert_eq!(tuning.max_speed, MAX_SPEED);
        assert_eq!(tuning.milestones.nyan, 100.0);
        assert_eq!(tuning.milestones.meow, MEOW_MILESTONE);
        assert_eq!(tuning.slow_motion, SlowMotion::default());
    }

    #[test]
    fn test_rejects_bad_constants() {
        assert!(matches!(
            Tuning::from_json(r#"{ "max_speed": 0.0 }"#),
            Err(TuningError::UnsafeConstant { name: "max_speed", .. })
        ));
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_bands() {
        let mut tuning = Tuning::default();
        tuning.slow_motion = SlowMotion::standard(8.0, 12.0, 10.0, 14.0, 0.1);
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::MalformedBand { index: 1, .. })
        ));

        tuning.slow_motion = SlowMotion::standard(8.0, 10.0, 12.0, 14.0, 1.5);
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::BandFactor { index: 0, .. })
        ));

        tuning.slow_motion = SlowMotion::disabled();
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_mid_screen_for_viewport() {
        assert!((Tuning::mid_screen_for_viewport(800.0) - 104.0).abs() < 1e-9);
    }
}
