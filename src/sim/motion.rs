//! Vertical motion and scoring integrator
//!
//! One instance lives for the whole session. It is mutated only by
//! [`MotionState::update`] (once per frame) and [`MotionState::apply_impulse`]
//! (once per qualifying tap), and never reads a clock or RNG of its own, so a
//! replayed `(dt, tap)` sequence reproduces the same state bit for bit.

use serde::{Deserialize, Serialize};

use super::tuning::Tuning;
use crate::clip;
use crate::consts::{MM_PER_UNIT, SCORE_PER_UNIT};

/// Direction in which the score passed a threshold during the last update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crossing {
    /// Previous score below the threshold, current score above it
    Rising,
    /// Previous score above the threshold, current score below it
    Falling,
}

/// Height, velocity, clock, and score of the cat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    tuning: Tuning,
    /// Height above the floor (>= 0)
    position: f64,
    /// Signed rate of change of `position`, within `±max_speed`
    velocity: f64,
    /// Transient upward acceleration, cleared once `contact_time` runs out
    acceleration: f64,
    /// Remaining time the acceleration stays active
    contact_time: f64,
    /// Run clock, restarted by the first tap from the floor
    elapsed_time: f64,
    /// Score before the most recent update
    previous_score: f64,
    high_score: f64,
    high_score_time: f64,
}

impl Default for MotionState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl MotionState {
    /// A cat resting on the floor with a fresh run clock
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            position: 0.0,
            velocity: 0.0,
            acceleration: 0.0,
            contact_time: 0.0,
            elapsed_time: 0.0,
            previous_score: 0.0,
            high_score: 0.0,
            high_score_time: 0.0,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Advance by wall-clock `dt` seconds and return the slowed `dt` actually
    /// integrated.
    ///
    /// `dt` must be non-negative. The frame driver is responsible for
    /// dropping long gaps (a backgrounded tab) instead of passing them here.
    pub fn update(&mut self, dt: f64) -> f64 {
        debug_assert!(dt >= 0.0, "negative frame dt: {}", dt);

        let score = self.score();
        self.previous_score = score;
        let dt = self.tuning.slow_motion.effective_dt(score, dt);

        let max_speed = self.tuning.max_speed;
        self.velocity += (self.acceleration - self.tuning.gravity) * dt;
        self.velocity = clip(self.velocity, -max_speed, Some(max_speed));

        self.position += self.velocity * dt;

        self.contact_time -= dt;
        if self.contact_time < 0.0 {
            self.contact_time = 0.0;
            self.acceleration = 0.0;
        }

        // Floor
        if self.position < 0.0 {
            self.position = 0.0;
            self.velocity = 0.0;
            self.acceleration = 0.0;
        }

        self.elapsed_time += dt;
        let score = self.score();
        if score > self.high_score {
            self.high_score = score;
            self.high_score_time = self.elapsed_time;
        }

        dt
    }

    /// Kick the cat upward. Taps while airborne simply reset the velocity.
    pub fn apply_impulse(&mut self) {
        // First jump from the floor starts the run clock
        if self.position == 0.0 {
            self.elapsed_time = 0.0;
        }
        self.velocity = self.tuning.impulse_velocity;
    }

    /// Whether the score strictly crossed `threshold` during the last update
    pub fn just_passed(&self, threshold: f64) -> Option<Crossing> {
        let (before, now) = (self.previous_score, self.score());
        if before < threshold && threshold < now {
            Some(Crossing::Rising)
        } else if now < threshold && threshold < before {
            Some(Crossing::Falling)
        } else {
            None
        }
    }

    /// Character height on screen (mm), capped at mid-screen
    pub fn character_offset(&self) -> f64 {
        clip(
            self.position * MM_PER_UNIT,
            0.0,
            Some(self.tuning.mid_screen_offset),
        )
    }

    /// Background scroll (mm); starts once the character reaches mid-screen
    pub fn background_offset(&self) -> f64 {
        clip(
            self.position * MM_PER_UNIT - self.tuning.mid_screen_offset,
            0.0,
            None,
        )
    }

    pub fn score(&self) -> f64 {
        self.position * SCORE_PER_UNIT
    }

    pub fn previous_score(&self) -> f64 {
        self.previous_score
    }

    pub fn high_score(&self) -> f64 {
        self.high_score
    }

    /// Run time at which the high score was reached
    pub fn high_score_time(&self) -> f64 {
        self.high_score_time
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    pub fn on_floor(&self) -> bool {
        self.position <= 0.0
    }

    /// Fixture: a motionless state that just moved from `previous` to `current` score
    #[cfg(test)]
    pub(crate) fn with_scores(previous: f64, current: f64) -> Self {
        let mut m = Self::default();
        m.position = current / SCORE_PER_UNIT;
        m.previous_score = previous;
        m
    }
}
