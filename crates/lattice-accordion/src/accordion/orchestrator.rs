//! Animation orchestration for layout passes.
//!
//! A layout pass writes final ("model") geometry straight into the view tree
//! and hands the orchestrator a [`LayoutBatch`] describing where each changed
//! view started from. Until the batch finishes, the *presented* geometry is
//! interpolated from those starting points towards the current model values
//! with one shared transition clock.

use std::time::Instant;

use lattice_accordion_core::Rect;
use lattice_accordion_core::logging::targets;

use crate::animation::{Easing, Transition, TransitionState};
use crate::view::{ViewId, ViewTree};

/// A view whose frame is animating, and the frame it animates from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameChange {
    pub view: ViewId,
    pub from: Rect,
}

/// Scroll values the batch animates from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollChange {
    pub from_offset: f32,
    pub from_content_height: f32,
}

/// Everything one layout pass animates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutBatch {
    /// Header and content frame changes.
    pub frames: Vec<FrameChange>,
    /// Content offset and content height change, if any.
    pub scroll: Option<ScrollChange>,
    /// Content views to hide once the batch completes.
    pub hide_on_completion: Vec<ViewId>,
}

impl LayoutBatch {
    fn from_frame(&self, view: ViewId) -> Option<Rect> {
        self.frames.iter().find(|c| c.view == view).map(|c| c.from)
    }
}

/// Runs at most one [`LayoutBatch`] at a time.
#[derive(Debug, Default)]
pub struct AnimationOrchestrator {
    transition: Transition,
    active: Option<LayoutBatch>,
}

impl AnimationOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn easing(&self) -> Easing {
        self.transition.easing()
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.transition.set_easing(easing);
    }

    pub fn duration(&self) -> std::time::Duration {
        self.transition.duration()
    }

    pub fn set_duration(&mut self, duration: std::time::Duration) {
        self.transition.set_duration(duration);
    }

    /// Whether a batch is in flight.
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Whether the in-flight batch animates the scroll position.
    pub fn is_scroll_animating(&self) -> bool {
        self.active.as_ref().is_some_and(|b| b.scroll.is_some())
    }

    /// Whether the in-flight batch will hide `view` when it completes.
    pub fn is_pending_hide(&self, view: ViewId) -> bool {
        self.active
            .as_ref()
            .is_some_and(|b| b.hide_on_completion.contains(&view))
    }

    /// Eased progress of the running batch, `None` once it has arrived.
    fn progress_at(&self, now: Instant) -> Option<f32> {
        if self.transition.raw_progress_at(now) >= 1.0 {
            return None;
        }
        Some(self.transition.progress_at(now))
    }

    /// Frame of `view` as presented at `now`, given its model frame.
    pub fn presented_frame(&self, view: ViewId, model: Rect, now: Instant) -> Rect {
        match self.active.as_ref().and_then(|b| b.from_frame(view)) {
            Some(from) => match self.progress_at(now) {
                Some(t) => from.lerp(model, t),
                None => model,
            },
            None => model,
        }
    }

    /// Scroll offset as presented at `now`, given the model offset.
    pub fn presented_offset(&self, model: f32, now: Instant) -> f32 {
        match self.active.as_ref().and_then(|b| b.scroll) {
            Some(scroll) => match self.progress_at(now) {
                Some(t) => lerp(scroll.from_offset, model, t),
                None => model,
            },
            None => model,
        }
    }

    /// Content height as presented at `now`, given the model height.
    pub fn presented_content_height(&self, model: f32, now: Instant) -> f32 {
        match self.active.as_ref().and_then(|b| b.scroll) {
            Some(scroll) => match self.progress_at(now) {
                Some(t) => lerp(scroll.from_content_height, model, t),
                None => model,
            },
            None => model,
        }
    }

    /// Every view still moving at `now`, starting from its presented frame.
    ///
    /// Must be called before the next layout pass overwrites model frames.
    pub fn in_flight_frames(&self, views: &ViewTree, now: Instant) -> Vec<FrameChange> {
        let Some(batch) = self.active.as_ref() else {
            return Vec::new();
        };
        batch
            .frames
            .iter()
            .map(|change| FrameChange {
                view: change.view,
                from: self.presented_frame(change.view, views.frame(change.view), now),
            })
            .collect()
    }

    /// Start `batch` at `now`, replacing any batch in flight.
    ///
    /// Views from `carried` that the new batch does not already animate keep
    /// moving from their presented frame, so interrupted motion retargets
    /// instead of jumping.
    pub fn begin_at(&mut self, mut batch: LayoutBatch, carried: Vec<FrameChange>, now: Instant) {
        for change in carried {
            if batch.from_frame(change.view).is_none() {
                batch.frames.push(change);
            }
        }

        tracing::debug!(
            target: targets::ANIMATION,
            frames = batch.frames.len(),
            scroll = batch.scroll.is_some(),
            hides = batch.hide_on_completion.len(),
            superseded = self.active.is_some(),
            "starting layout animation"
        );

        self.active = Some(batch);
        self.transition.start_at(now);
    }

    /// Drop the scroll part of the in-flight batch; the model offset applies
    /// immediately.
    pub fn cancel_scroll(&mut self) {
        if let Some(batch) = self.active.as_mut() {
            batch.scroll = None;
        }
    }

    /// Advance to `now`.
    ///
    /// Returns the batch's views to hide when it completed during this call,
    /// `None` while it is still running or when nothing was in flight.
    pub fn tick_at(&mut self, now: Instant) -> Option<Vec<ViewId>> {
        match self.transition.update_at(now) {
            TransitionState::Running { .. } => None,
            TransitionState::Finished | TransitionState::Idle => {
                let batch = self.active.take()?;
                tracing::debug!(
                    target: targets::ANIMATION,
                    hides = batch.hide_on_completion.len(),
                    "layout animation finished"
                );
                Some(batch.hide_on_completion)
            }
        }
    }
}

#[inline]
fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
