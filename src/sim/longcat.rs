//! Cat pose: head wiggle, spinning paws, and the meowing mouth
//!
//! Visual only, never feeds back into the motion. Mouth timers run on
//! wall-clock time so a meow lasts as long as its sound, even inside the
//! slow-motion window.

use serde::{Deserialize, Serialize};

use super::cues::Cue;
use super::motion::MotionState;

/// Head sway amplitude (degrees)
const HEAD_SWAY_DEG: f64 = 15.0;
/// Phase gained per unit of velocity per second
const PHASE_RATE: f64 = 10.0;
/// Open mouth offset (percent of the head)
const MOUTH_OPEN: f64 = 5.0;
/// How long the mouth stays open for each cue (seconds)
const MEOW_OPEN_SECS: f64 = 1.1;
const SLOW_MEOW_OPEN_SECS: f64 = 3.3;
/// Delay before the mouth starts singing along with the song
const NYAN_DELAY_SECS: f64 = 3.5;
/// Mouth flap period while singing
const NYAN_FLAP_SECS: f64 = 0.2;

/// Mouth timer state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
enum MouthTimer {
    #[default]
    Idle,
    /// Close after the remaining seconds
    Closing { remaining: f64 },
    /// Waiting for the song intro, then flapping
    NyanDelay { remaining: f64 },
    /// Toggle open/closed every period
    NyanFlap { until_toggle: f64 },
}

/// Meowing mouth driven by cues and wall-clock time
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mouth {
    /// Open offset in percent (0 = closed)
    open: f64,
    /// One-shot close timer from the last meow
    close: MouthTimer,
    /// Song flapping, independent of meows
    nyan: MouthTimer,
}

impl Mouth {
    pub fn open(&self) -> f64 {
        self.open
    }

    pub fn is_singing(&self) -> bool {
        !matches!(self.nyan, MouthTimer::Idle)
    }

    pub fn on_cue(&mut self, cue: Cue) {
        match cue {
            Cue::Meow => self.meow(MEOW_OPEN_SECS),
            Cue::SlowMeow => self.meow(SLOW_MEOW_OPEN_SECS),
            Cue::NyanStart => {
                // Already scheduled or singing: leave it alone
                if !self.is_singing() {
                    self.nyan = MouthTimer::NyanDelay {
                        remaining: NYAN_DELAY_SECS,
                    };
                }
            }
            Cue::NyanStop => {
                self.nyan = MouthTimer::Idle;
                self.open = 0.0;
            }
        }
    }

    fn meow(&mut self, secs: f64) {
        self.open = MOUTH_OPEN;
        self.close = MouthTimer::Closing { remaining: secs };
    }

    /// Run the timers forward by wall-clock `dt`
    pub fn advance(&mut self, dt: f64) {
        if let MouthTimer::Closing { remaining } = self.close {
            if remaining - dt > 0.0 {
                self.close = MouthTimer::Closing {
                    remaining: remaining - dt,
                };
            } else {
                self.close = MouthTimer::Idle;
                self.open = 0.0;
            }
        }

        let nyan = self.nyan;
        self.nyan = match nyan {
            MouthTimer::NyanDelay { remaining } if remaining - dt > 0.0 => {
                MouthTimer::NyanDelay {
                    remaining: remaining - dt,
                }
            }
            // Overshoot past the delay counts toward the first flap
            MouthTimer::NyanDelay { remaining } => self.flap(NYAN_FLAP_SECS + remaining - dt),
            MouthTimer::NyanFlap { until_toggle } => self.flap(until_toggle - dt),
            other => other,
        };
    }

    /// Toggle once per elapsed flap period
    fn flap(&mut self, mut until_toggle: f64) -> MouthTimer {
        while until_toggle <= 0.0 {
            self.toggle();
            until_toggle += NYAN_FLAP_SECS;
        }
        MouthTimer::NyanFlap { until_toggle }
    }

    fn toggle(&mut self) {
        self.open = (self.open + MOUTH_OPEN) % (2.0 * MOUTH_OPEN);
    }
}

/// Cat pose consumed by the renderer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Longcat {
    /// Head phase, advances with speed in either direction
    head_phase: f64,
    /// Paw phase, advances with signed velocity so paws unwind on the way down
    hand_phase: f64,
    pub mouth: Mouth,
}

impl Longcat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the pose by the (slowed) simulation `dt`
    pub fn update(&mut self, motion: &MotionState, dt: f64) {
        let velocity = motion.velocity();
        self.head_phase += dt * velocity.abs() * PHASE_RATE;

        self.hand_phase += dt * velocity * PHASE_RATE;
        if motion.on_floor() {
            self.hand_phase = 0.0;
        }
    }

    /// Head rotation (degrees)
    pub fn head_angle(&self) -> f64 {
        HEAD_SWAY_DEG * self.head_phase.sin()
    }

    /// Head sideways shift (percent of its width)
    pub fn head_shift(&self) -> f64 {
        self.head_phase.cos()
    }

    /// Paw rotation (degrees), both paws turn together
    pub fn hand_angle(&self) -> f64 {
        -360.0 * self.hand_phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_at_rest() {
        let cat = Longcat::new();
        assert_eq!(cat.head_angle(), 0.0);
        assert_eq!(cat.head_shift(), 1.0);
        assert_eq!(cat.hand_angle(), 0.0);
        assert_eq!(cat.mouth.open(), 0.0);
    }

    #[test]
    fn test_hands_spin_and_reset_on_floor() {
        let mut motion = MotionState::default();
        let mut cat = Longcat::new();
        motion.apply_impulse();
        let dt = motion.update(0.05);
        cat.update(&motion, dt);
        assert!(cat.hand_angle() < 0.0);
        assert!(cat.head_angle() > 0.0);

        for _ in 0..100 {
            let dt = motion.update(0.05);
            cat.update(&motion, dt);
        }
        assert!(motion.on_floor());
        assert_eq!(cat.hand_angle(), 0.0);
    }

    #[test]
    fn test_meow_closes_after_timeout() {
        let mut mouth = Mouth::default();
        mouth.on_cue(Cue::Meow);
        assert_eq!(mouth.open(), 5.0);
        mouth.advance(1.0);
        assert_eq!(mouth.open(), 5.0);
        mouth.advance(0.2);
        assert_eq!(mouth.open(), 0.0);
    }

    #[test]
    fn test_slow_meow_stays_open_longer() {
        let mut mouth = Mouth::default();
        mouth.on_cue(Cue::SlowMeow);
        mouth.advance(3.0);
        assert_eq!(mouth.open(), 5.0);
        mouth.advance(0.5);
        assert_eq!(mouth.open(), 0.0);
    }

    #[test]
    fn test_nyan_waits_then_flaps() {
        let mut mouth = Mouth::default();
        mouth.on_cue(Cue::NyanStart);
        mouth.advance(3.4);
        assert_eq!(mouth.open(), 0.0);
        assert!(mouth.is_singing());

        // Delay ends at 3.5s, first toggle 0.2s later
        mouth.advance(0.2);
        assert_eq!(mouth.open(), 0.0);
        mouth.advance(0.15);
        assert_eq!(mouth.open(), 5.0);
        mouth.advance(0.2);
        assert_eq!(mouth.open(), 0.0);
    }

    #[test]
    fn test_nyan_restart_is_ignored_while_singing() {
        let mut mouth = Mouth::default();
        mouth.on_cue(Cue::NyanStart);
        mouth.advance(3.0);
        mouth.on_cue(Cue::NyanStart);
        mouth.advance(0.75);
        // First schedule still holds: delay done at 3.5, toggled at 3.7
        assert_eq!(mouth.open(), 5.0);
    }

    #[test]
    fn test_nyan_stop_closes_and_cancels() {
        let mut mouth = Mouth::default();
        mouth.on_cue(Cue::NyanStart);
        mouth.advance(3.75);
        mouth.on_cue(Cue::NyanStop);
        assert_eq!(mouth.open(), 0.0);
        assert!(!mouth.is_singing());
        mouth.advance(5.0);
        assert_eq!(mouth.open(), 0.0);
    }
}
