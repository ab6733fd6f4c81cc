//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the caller-supplied `dt`
//! - No clocks, RNG, or platform dependencies
//! - No rendering; presentation state is derived, never fed back

pub mod cues;
pub mod longcat;
pub mod motion;
pub mod state;
pub mod tick;
pub mod tuning;

pub use cues::{Cue, detect_cues};
pub use longcat::{Longcat, Mouth};
pub use motion::{Crossing, MotionState};
pub use state::GameState;
pub use tick::{FrameReport, TickInput, tap, tick};
pub use tuning::{DtRule, Milestones, SlowBand, SlowMotion, Tuning};
