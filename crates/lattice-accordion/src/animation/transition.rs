//! The transition clock that drives an animated layout batch.

use std::time::{Duration, Instant};

use super::easing::Easing;

/// Current state of a transition, as reported by [`Transition::update_at`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TransitionState {
    /// No transition in progress.
    #[default]
    Idle,
    /// Transition is running.
    Running {
        /// Eased progress from 0.0 to 1.0.
        progress: f32,
    },
    /// The transition reached its end during this update.
    ///
    /// Reported exactly once; the transition is idle afterwards.
    Finished,
}

/// A timed, eased transition.
///
/// All timing takes an explicit `now`, so callers control the clock.
#[derive(Debug, Clone)]
pub struct Transition {
    /// Easing curve applied to raw progress.
    easing: Easing,
    /// Length of the transition.
    duration: Duration,
    /// When the running transition started.
    start_time: Option<Instant>,
}

impl Default for Transition {
    fn default() -> Self {
        Self::new()
    }
}

impl Transition {
    /// Create a transition with the accordion defaults (300 ms, ease-in).
    pub fn new() -> Self {
        Self {
            easing: Easing::EaseIn,
            duration: Duration::from_millis(300),
            start_time: None,
        }
    }

    /// Get the easing curve.
    #[inline]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Set the easing curve.
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Get the transition duration.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Set the transition duration.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Check if a transition is currently running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }

    /// Start (or restart) the transition at `now`.
    pub fn start_at(&mut self, now: Instant) {
        self.start_time = Some(now);
    }

    /// Stop the current transition immediately.
    pub fn stop(&mut self) {
        self.start_time = None;
    }

    /// Linear progress at `now`, in `0.0..=1.0`.
    ///
    /// An idle transition reports `1.0`: whatever it animated has arrived.
    pub fn raw_progress_at(&self, now: Instant) -> f32 {
        let Some(start_time) = self.start_time else {
            return 1.0;
        };

        if self.duration.is_zero() {
            return 1.0;
        }

        let elapsed = now.saturating_duration_since(start_time);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Eased progress at `now`.
    pub fn progress_at(&self, now: Instant) -> f32 {
        self.easing.apply(self.raw_progress_at(now))
    }

    /// Advance the transition to `now`.
    pub fn update_at(&mut self, now: Instant) -> TransitionState {
        if !self.is_running() {
            return TransitionState::Idle;
        }

        let raw_progress = self.raw_progress_at(now);
        if raw_progress >= 1.0 {
            self.stop();
            return TransitionState::Finished;
        }

        TransitionState::Running {
            progress: self.easing.apply(raw_progress),
        }
    }
}
