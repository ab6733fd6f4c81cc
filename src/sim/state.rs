//! Session state
//!
//! Everything one page session owns: the motion integrator plus the
//! presentation state that follows it. Created once, passed explicitly to
//! the frame driver and input handler.

use serde::{Deserialize, Serialize};

use super::longcat::Longcat;
use super::motion::MotionState;
use super::tuning::Tuning;

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Height, velocity, clock, and score
    pub motion: MotionState,
    /// Cat pose and mouth timers (not gameplay-affecting)
    pub cat: Longcat,
    /// Frames advanced since the session started
    pub frames: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameState {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            motion: MotionState::new(tuning),
            cat: Longcat::new(),
            frames: 0,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        self.motion.tuning()
    }
}
