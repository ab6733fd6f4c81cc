//! One-shot cues fired when the score crosses a milestone

use serde::{Deserialize, Serialize};

use super::motion::{Crossing, MotionState};
use super::tuning::Milestones;

/// Sound/animation cue for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// Short meow (also the greeting on the first tap of a run)
    Meow,
    /// Long, slowed-down meow
    SlowMeow,
    /// Infinite section reached: start the nyan song
    NyanStart,
    /// Dropped back below the infinite section: stop the song
    NyanStop,
}

/// Cues triggered by the most recent `MotionState::update`
pub fn detect_cues(motion: &MotionState, milestones: &Milestones) -> Vec<Cue> {
    let mut cues = Vec::new();

    // Only one meow per frame, even if a huge step crosses both
    if motion.just_passed(milestones.meow) == Some(Crossing::Rising) {
        cues.push(Cue::Meow);
    } else if motion.just_passed(milestones.slow_meow) == Some(Crossing::Rising) {
        cues.push(Cue::SlowMeow);
    }

    match motion.just_passed(milestones.nyan) {
        Some(Crossing::Rising) => cues.push(Cue::NyanStart),
        Some(Crossing::Falling) => cues.push(Cue::NyanStop),
        None => {}
    }

    cues
}
