//! Frame driver clock
//!
//! Converts animation-frame timestamps into simulation `dt`. When the tab is
//! hidden the browser stops delivering frames, so the first frame after it
//! comes back carries the whole hidden interval; that frame is dropped rather
//! than undoing the pause.

use crate::consts::MAX_FRAME_DT;

/// Timestamp (ms) to `dt` (s) converter with gap suppression
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT)
    }
}

impl FrameClock {
    /// Frames whose gap is at least `max_dt` seconds are dropped
    pub fn new(max_dt: f64) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Start measuring from `now_ms` (e.g. page load)
    pub fn start(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Seconds since the previous frame, or `None` if the frame should not
    /// advance the simulation. The reference point always moves to `now_ms`.
    pub fn advance(&mut self, now_ms: f64) -> Option<f64> {
        let last = self.last_ms.replace(now_ms)?;
        let dt = 0.001 * (now_ms - last);
        if dt < 0.0 {
            // Timestamps from a different origin; resync
            log::debug!("Frame timestamp went backwards ({:.3}s), skipping", dt);
            return None;
        }
        if dt >= self.max_dt {
            log::debug!("Dropping {:.2}s frame gap", dt);
            return None;
        }
        Some(dt)
    }
}
