//! Parallax scene poses
//!
//! The page is a stack of sections (wall, earth, street, buildings, clouds,
//! airspace, infinite start). All of them scroll with the background offset;
//! a few also animate their own decorations as the score passes through them.

use crate::clip;
use crate::sim::MotionState;

/// Score window in which the earth section's gulli is animated
const GULLI_START: f64 = 7.8;
const GULLI_END: f64 = 10.0;
/// Degrees of gulli rotation per point of score
const GULLI_DEG_PER_SCORE: f64 = 100.0;

/// Score window in which the buildings drift apart
const BUILDINGS_START: f64 = 7.0;
const BUILDINGS_END: f64 = 15.0;
/// Millimetres of drift per building index per point of score
const BUILDING_SPREAD_MM: f64 = 7.0;

/// Decoration specific to one section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Dark wall at the bottom that brightens as it scrolls away
    Wall,
    /// Earth with the gulli
    Earth,
    /// Scroll only (street, clouds, airspace)
    Plain,
    /// Buildings that spread vertically
    Buildings,
    /// Entry into the endless section
    InfiniteStart,
}

/// Section order from the floor up
pub const SECTIONS: [SectionKind; 7] = [
    SectionKind::Wall,
    SectionKind::Earth,
    SectionKind::Plain,
    SectionKind::Buildings,
    SectionKind::Plain,
    SectionKind::Plain,
    SectionKind::InfiniteStart,
];

/// Gulli transform: rotation (deg) and translation (px)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GulliPose {
    pub rotate_deg: f64,
    pub translate_x_px: f64,
    pub translate_y_px: f64,
}

/// Vertical translation shared by every section (mm)
pub fn section_offset(motion: &MotionState) -> f64 {
    motion.background_offset()
}

/// Wall brightness, `None` once fully lit (the filter is left as it was)
pub fn wall_brightness(motion: &MotionState) -> Option<f64> {
    let brightness = motion.background_offset() / 1000.0;
    (brightness < 1.0).then_some(brightness)
}

/// Gulli pose while the score is near its window, `None` outside it.
///
/// The window opens one point early and clamps to zero so the gulli is fully
/// reset even when the cat falls through quickly.
pub fn gulli_pose(motion: &MotionState) -> Option<GulliPose> {
    let score = motion.score();
    if !(GULLI_START - 1.0 < score && score < GULLI_END) {
        return None;
    }
    let movement = clip(score - GULLI_START, 0.0, None) * GULLI_DEG_PER_SCORE;
    Some(GulliPose {
        rotate_deg: -movement,
        translate_x_px: movement * 2.0,
        translate_y_px: -movement * 4.0,
    })
}

/// Offset (mm) of each of `count` buildings, `None` outside the window
pub fn building_offsets(motion: &MotionState, count: usize) -> Option<Vec<f64>> {
    let score = motion.score();
    if !(BUILDINGS_START < score && score < BUILDINGS_END) {
        return None;
    }
    let movement = score - BUILDINGS_START * 2.0;
    Some(
        (0..count)
            .map(|i| movement * (i as f64 * BUILDING_SPREAD_MM))
            .collect(),
    )
}

/// Whether the endless section is active
pub fn infinite_active(motion: &MotionState) -> bool {
    motion.tuning().milestones.nyan < motion.score()
}
