//! Longcat - a tap-to-stretch parallax clicker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion integrator, milestone cues, cat pose)
//! - `scene`: Parallax section poses derived from the simulation
//! - `frame`: Frame driver clock (timestamp to dt, pause suppression)
//! - `hud`: Title and score text
//! - `autopilot`: Seeded demo tapper
//! - `highscores` / `settings`: LocalStorage persistence

pub mod autopilot;
pub mod error;
pub mod frame;
pub mod highscores;
pub mod hud;
pub mod scene;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use error::{TuningError, TuningResult};
pub use highscores::PersonalBest;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Constant downward acceleration (units/s²)
    pub const GRAVITY: f64 = 1.0;
    /// Velocity magnitude cap (units/s)
    pub const MAX_SPEED: f64 = 1.0;
    /// Upward velocity set by every tap
    pub const IMPULSE_VELOCITY: f64 = 0.4;

    /// Score per unit of height
    pub const SCORE_PER_UNIT: f64 = 10.0;
    /// Rendered millimetres per unit of height
    pub const MM_PER_UNIT: f64 = 1000.0;
    /// https://www.w3.org/TR/css3-values/#reference-pixel
    pub const CSS_PIXEL_TO_MM: f64 = 0.26;
    /// Viewport height assumed before the page reports its own
    pub const DEFAULT_VIEWPORT_HEIGHT_PX: f64 = 800.0;

    /// Slow-motion band boundaries (score) and full-slowdown factor
    pub const SLOW_RAMP_DOWN_START: f64 = 8.0;
    pub const SLOW_FULL_START: f64 = 10.0;
    pub const SLOW_FULL_END: f64 = 12.0;
    pub const SLOW_RAMP_UP_END: f64 = 14.0;
    pub const SLOW_FACTOR: f64 = 0.1;

    /// Milestone scores for one-shot cues
    pub const MEOW_MILESTONE: f64 = 7.8;
    pub const SLOW_MEOW_MILESTONE: f64 = 10.2;
    pub const NYAN_MILESTONE: f64 = 215.0;

    /// Frames with a gap at least this long (seconds) are dropped
    pub const MAX_FRAME_DT: f64 = 0.5;
}

/// Clamp `x` to `[min, max]`, or to `[min, ∞)` without an upper bound.
///
/// The upper bound is applied first, so `min` wins if the bounds cross.
#[inline]
pub fn clip(x: f64, min: f64, max: Option<f64>) -> f64 {
    let x = match max {
        Some(max) => x.min(max),
        None => x,
    };
    x.max(min)
}

/// Linear interpolation of `x` from `[t0, t1]` onto `[v0, v1]` (unclamped)
#[inline]
pub fn linear(x: f64, t0: f64, t1: f64, v0: f64, v1: f64) -> f64 {
    let xt = (x - t0) / (t1 - t0);
    v0 + xt * (v1 - v0)
}
