//! Per-frame simulation step
//!
//! Advances the session by one display frame of wall-clock time.

use super::cues::{Cue, detect_cues};
use super::state::GameState;

/// Input gathered since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// A qualifying tap/click happened
    pub tap: bool,
}

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Slowed dt actually integrated
    pub effective_dt: f64,
    /// One-shot cues, in firing order
    pub cues: Vec<Cue>,
}

/// Apply a tap: greet with a meow at the start of a run, then jump.
///
/// Returns the greeting cue, if any.
pub fn tap(state: &mut GameState) -> Option<Cue> {
    let greeting = (state.motion.score() == 0.0).then_some(Cue::Meow);
    state.motion.apply_impulse();
    if let Some(cue) = greeting {
        state.cat.mouth.on_cue(cue);
    }
    greeting
}

/// Advance the session by wall-clock `dt` seconds (must be non-negative)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64) -> FrameReport {
    let mut cues = Vec::new();
    if input.tap {
        cues.extend(tap(state));
    }

    let effective_dt = state.motion.update(dt);
    state.frames += 1;

    let milestones = state.motion.tuning().milestones;
    let crossed = detect_cues(&state.motion, &milestones);
    for &cue in &crossed {
        log::debug!(
            "{:?} at score {:.2} (t={:.2}s)",
            cue,
            state.motion.score(),
            state.motion.elapsed_time()
        );
        state.cat.mouth.on_cue(cue);
    }
    cues.extend(crossed);

    state.cat.update(&state.motion, effective_dt);
    state.cat.mouth.advance(dt);

    FrameReport { effective_dt, cues }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::motion::MotionState;
    use crate::sim::tuning::Tuning;

    const FRAME: f64 = 1.0 / 60.0;

    #[test]
    fn test_first_tap_greets() {
        let mut state = GameState::default();
        let report = tick(&mut state, &TickInput { tap: true }, FRAME);
        assert_eq!(report.cues, vec![Cue::Meow]);
        assert_eq!(state.cat.mouth.open(), 5.0);
        assert!(state.motion.position() > 0.0);

        // Airborne taps do not greet again
        let report = tick(&mut state, &TickInput { tap: true }, FRAME);
        assert!(report.cues.is_empty());
    }

    #[test]
    fn test_idle_frame_reports_nothing() {
        let mut state = GameState::default();
        let report = tick(&mut state, &TickInput::default(), FRAME);
        assert_eq!(report.effective_dt, FRAME);
        assert!(report.cues.is_empty());
        assert_eq!(state.frames, 1);
    }

    #[test]
    fn test_tapping_reaches_meow_milestone() {
        let mut state = GameState::default();
        let mut heard = Vec::new();
        for frame in 0..1200 {
            // Tap every fifth frame
            let input = TickInput {
                tap: frame % 5 == 0,
            };
            heard.extend(tick(&mut state, &input, FRAME).cues);
        }
        assert!(state.motion.high_score() > MEOW_MILESTONE);
        // Greeting plus the milestone meow
        assert!(heard.iter().filter(|&&c| c == Cue::Meow).count() >= 2);
    }

    #[test]
    fn test_nyan_cues_follow_score() {
        let tuning = Tuning {
            impulse_velocity: 1.0,
            milestones: crate::sim::Milestones {
                nyan: 0.5,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut state = GameState::new(tuning);
        let report = tick(&mut state, &TickInput { tap: true }, 0.1);
        assert!(crate::scene::infinite_active(&state.motion));
        assert!(report.cues.contains(&Cue::NyanStart));
        assert!(state.cat.mouth.is_singing());

        let mut stopped = false;
        for _ in 0..100 {
            stopped |= tick(&mut state, &TickInput::default(), 0.1)
                .cues
                .contains(&Cue::NyanStop);
        }
        assert!(stopped);
        assert!(!crate::scene::infinite_active(&state.motion));
        assert!(!state.cat.mouth.is_singing());
    }

    #[test]
    fn test_slow_motion_slows_pose_but_not_mouth() {
        let mut state = GameState {
            motion: MotionState::with_scores(11.0, 11.0),
            ..Default::default()
        };
        state.cat.mouth.on_cue(Cue::Meow);

        // 70 frames is ~1.17s of wall time but only ~0.12s simulated
        for frame in 0..70 {
            let before = state.cat.hand_angle();
            let report = tick(&mut state, &TickInput { tap: frame == 0 }, FRAME);
            let score = state.motion.score();
            assert!(score > 10.0 && score <= 12.0, "left the full-slowdown band at {}", score);
            assert!((report.effective_dt - FRAME * SLOW_FACTOR).abs() < 1e-15);

            // Paws turn with simulated time
            let expected = -360.0 * report.effective_dt * state.motion.velocity() * 10.0;
            let turned = state.cat.hand_angle() - before;
            assert!(expected != 0.0);
            assert!(
                (turned - expected).abs() <= 1e-9 * expected.abs(),
                "frame {}: turned {} expected {}",
                frame,
                turned,
                expected
            );

            // Mouth closes on wall time
            if frame < 60 {
                assert_eq!(state.cat.mouth.open(), 5.0, "closed early at frame {}", frame);
            }
        }
        assert_eq!(state.cat.mouth.open(), 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::default();
        let mut state2 = GameState::default();

        let inputs = [
            (TickInput { tap: true }, 0.016),
            (TickInput::default(), 0.017),
            (TickInput { tap: true }, 0.033),
            (TickInput::default(), 0.0),
            (TickInput::default(), 0.25),
        ];

        for (input, dt) in &inputs {
            let r1 = tick(&mut state1, input, *dt);
            let r2 = tick(&mut state2, input, *dt);
            assert_eq!(r1, r2);
        }

        assert_eq!(state1, state2);
    }
}
