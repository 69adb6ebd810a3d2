//! The accordion widget.
//!
//! [`AccordionView`] stacks header/content pairs vertically inside a
//! scrollable viewport. Activating a header toggles its content; every change
//! of selection re-lays out all entries as one animated batch and scrolls just
//! far enough to reveal the entry that was opened.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use lattice_accordion::prelude::*;
//!
//! let mut accordion = AccordionView::new();
//! accordion.set_frame(Rect::new(0.0, 0.0, 320.0, 400.0));
//!
//! for title in ["General", "Network", "Advanced"] {
//!     let content = accordion.create_view(Rect::new(0.0, 0.0, 320.0, 120.0));
//!     accordion.add_titled_entry(title, content).unwrap();
//! }
//!
//! accordion.selection_changed.connect(|_| println!("selection changed"));
//! accordion.toggle(1).unwrap();
//!
//! let now = Instant::now();
//! accordion.layout_if_needed_at(now);
//! accordion.tick_at(now + Duration::from_millis(300));
//!
//! assert_eq!(accordion.content_height(), 255.0);
//! ```

mod layout;
mod orchestrator;
mod registry;
mod scroll;
mod selection;

#[cfg(test)]
mod tests;

pub use layout::{EntryPlacement, LayoutResult, compute_layout};
pub use orchestrator::{AnimationOrchestrator, FrameChange, LayoutBatch, ScrollChange};
pub use registry::{Entry, EntryRegistry};
pub use scroll::{JustOpened, ScrollState, resolve_offset, sticky_header_y};
pub use selection::{DisplayMode, Selection, SelectionModel, ToggleOutcome, validate_selection};

use std::time::{Duration, Instant};

use lattice_accordion_core::logging::targets;
use lattice_accordion_core::{
    AccordionError, AccordionResult, Color, PerfSpan, Point, Rect, Signal,
};

use crate::animation::Easing;
use crate::config::AccordionConfig;
use crate::view::{View, ViewId, ViewRole, ViewTree};

/// An accordion of collapsible panels in a scrollable viewport.
///
/// # Geometry
///
/// Every layout pass writes final ("model") frames, content height and scroll
/// offset immediately; [`frame`](ViewTree::frame) and
/// [`scroll_offset`](Self::scroll_offset) always report where things end up.
/// While a layout animation runs, the `presented_*` accessors report where
/// things are on screen at a given instant.
///
/// # Signals
///
/// - `selection_changed()`: Emitted after every successful selection change
/// - `scrolled(f32)`: Emitted after every scroll event with the new offset
/// - `animation_finished()`: Emitted when a layout animation completes
pub struct AccordionView {
    /// Container frame; its height is the viewport height.
    frame: Rect,

    /// Owner of every header and content view.
    views: ViewTree,

    /// Registered entries, in insertion order.
    registry: EntryRegistry,

    /// Open entries and the display mode.
    selection: SelectionModel,

    /// Model scroll state.
    scroll: ScrollState,

    /// Entry opened by the last toggle, consumed by the next layout pass.
    just_opened: Option<usize>,

    /// Whether a layout pass is pending.
    needs_layout: bool,

    /// Runs the layout animation.
    orchestrator: AnimationOrchestrator,

    /// Header height for titled entries.
    header_height: f32,

    /// Background of titled headers.
    default_header_background: Color,

    /// Title color of titled headers.
    default_header_text_color: Color,

    /// Signal emitted after the selection changes.
    pub selection_changed: Signal<()>,

    /// Signal emitted after a scroll event, with the new offset.
    pub scrolled: Signal<f32>,

    /// Signal emitted when a layout animation completes.
    pub animation_finished: Signal<()>,
}

impl AccordionView {
    /// Create an empty accordion with the default configuration.
    pub fn new() -> Self {
        let mut accordion = Self {
            frame: Rect::ZERO,
            views: ViewTree::new(),
            registry: EntryRegistry::new(),
            selection: SelectionModel::default(),
            scroll: ScrollState::default(),
            just_opened: None,
            needs_layout: true,
            orchestrator: AnimationOrchestrator::new(),
            header_height: 0.0,
            default_header_background: Color::BLACK,
            default_header_text_color: Color::WHITE,
            selection_changed: Signal::new(),
            scrolled: Signal::new(),
            animation_finished: Signal::new(),
        };
        accordion.apply_config(&AccordionConfig::default());
        accordion
    }

    /// Apply `config` using builder pattern.
    pub fn with_config(mut self, config: &AccordionConfig) -> Self {
        self.apply_config(config);
        self
    }

    /// Set the frame using builder pattern.
    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.set_frame(frame);
        self
    }

    /// Set the display mode using builder pattern.
    pub fn with_display_mode(mut self, mode: DisplayMode) -> Self {
        self.set_display_mode(mode);
        self
    }

    /// Apply every setting in `config`.
    ///
    /// Like the individual setters, this affects entries added afterwards and
    /// animations started afterwards.
    pub fn apply_config(&mut self, config: &AccordionConfig) {
        self.selection.set_mode(config.display_mode);
        self.header_height = config.header_height;
        self.orchestrator.set_duration(config.animation_duration());
        self.orchestrator.set_easing(config.animation_easing);
        self.default_header_background = config.header_background;
        self.default_header_text_color = config.header_text_color;
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn display_mode(&self) -> DisplayMode {
        self.selection.mode()
    }

    /// Set the display mode.
    ///
    /// The current selection is not re-validated against the new mode.
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.selection.set_mode(mode);
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    /// Set the header height used by [`add_titled_entry`](Self::add_titled_entry).
    ///
    /// # Errors
    ///
    /// [`AccordionError::InvalidArgument`] if `height` is not a positive,
    /// finite number. The previous height is kept.
    pub fn set_header_height(&mut self, height: f32) -> AccordionResult<()> {
        if !height.is_finite() || height <= 0.0 {
            let err = AccordionError::invalid_argument(
                "height",
                format!("header height must be positive and finite, got {height}"),
            );
            tracing::warn!(target: targets::REGISTRY, %err, "rejected header height");
            return Err(err);
        }
        self.header_height = height;
        Ok(())
    }

    pub fn animation_duration(&self) -> Duration {
        self.orchestrator.duration()
    }

    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.orchestrator.set_duration(duration);
    }

    pub fn animation_easing(&self) -> Easing {
        self.orchestrator.easing()
    }

    pub fn set_animation_easing(&mut self, easing: Easing) {
        self.orchestrator.set_easing(easing);
    }

    pub fn default_header_background(&self) -> Color {
        self.default_header_background
    }

    pub fn set_default_header_background(&mut self, color: Color) {
        self.default_header_background = color;
    }

    pub fn default_header_text_color(&self) -> Color {
        self.default_header_text_color
    }

    pub fn set_default_header_text_color(&mut self, color: Color) {
        self.default_header_text_color = color;
    }

    // =========================================================================
    // Views and entries
    // =========================================================================

    /// Create a detached view owned by this accordion.
    pub fn create_view(&mut self, frame: Rect) -> ViewId {
        self.views.insert(View::new(frame))
    }

    /// Take ownership of a prepared view.
    pub fn insert_view(&mut self, view: View) -> ViewId {
        self.views.insert(view)
    }

    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.views.get(id)
    }

    /// All views owned by the accordion.
    pub fn views(&self) -> &ViewTree {
        &self.views
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.registry.get(index)
    }

    pub fn entry_count(&self) -> usize {
        self.registry.len()
    }

    /// Register a header/content pair and return the new entry's index.
    ///
    /// The content's current size becomes its expanded size; its height is
    /// forced to zero. Header and content are stretched to the container
    /// width, which stays fixed for the entry from then on.
    ///
    /// # Errors
    ///
    /// [`AccordionError::InvalidArgument`] if either view does not exist, is
    /// already registered, or both handles name the same view.
    pub fn add_entry(&mut self, header: ViewId, content: ViewId) -> AccordionResult<usize> {
        self.check_entry_views(header, content).inspect_err(|err| {
            tracing::warn!(target: targets::REGISTRY, %err, "rejected entry");
        })?;

        let width = self.frame.width();
        let header_frame = self.views.frame(header);
        let content_frame = self.views.frame(content);
        let index = self.registry.len();

        self.views.set_frame(
            header,
            Rect::new(0.0, header_frame.top(), width, header_frame.height()),
        );
        self.views
            .set_frame(content, Rect::new(0.0, content_frame.top(), width, 0.0));
        if let Some(view) = self.views.get_mut(content) {
            view.clips_to_bounds = true;
        }

        // Content first so the header paints above it.
        self.views.attach(content, ViewRole::Content { entry: index });
        self.views.attach(header, ViewRole::Header { entry: index });

        self.registry.push(Entry {
            header,
            content,
            width,
            header_height: header_frame.height(),
            original_content_size: content_frame.size,
        });
        self.needs_layout = true;

        tracing::debug!(
            target: targets::REGISTRY,
            index,
            header_height = header_frame.height(),
            content_height = content_frame.height(),
            "added entry"
        );
        Ok(index)
    }

    /// Register `content` under a new titled header.
    ///
    /// The header uses the current header height, container width and
    /// default header colors.
    pub fn add_titled_entry(
        &mut self,
        title: impl Into<String>,
        content: ViewId,
    ) -> AccordionResult<usize> {
        self.check_registrable(content, "content").inspect_err(|err| {
            tracing::warn!(target: targets::REGISTRY, %err, "rejected entry");
        })?;

        let header = self.views.insert(
            View::new(Rect::new(0.0, 0.0, self.frame.width(), self.header_height))
                .with_title(title)
                .with_background(self.default_header_background)
                .with_text_color(self.default_header_text_color),
        );
        self.add_entry(header, content)
    }

    fn check_entry_views(&self, header: ViewId, content: ViewId) -> AccordionResult<()> {
        self.check_registrable(header, "header")?;
        self.check_registrable(content, "content")?;
        if header == content {
            return Err(AccordionError::invalid_argument(
                "content",
                "header and content must be different views",
            ));
        }
        Ok(())
    }

    fn check_registrable(&self, id: ViewId, argument: &'static str) -> AccordionResult<()> {
        if !self.views.contains(id) {
            return Err(AccordionError::invalid_argument(
                argument,
                "view does not exist",
            ));
        }
        if self.views.get(id).and_then(|view| view.role().entry()).is_some() {
            return Err(AccordionError::invalid_argument(
                argument,
                "view is already part of an entry",
            ));
        }
        Ok(())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Indices of the open entries, ascending.
    pub fn selection(&self) -> &Selection {
        self.selection.selected()
    }

    /// Replace the selection.
    ///
    /// Duplicates are ignored; an empty iterator clears the selection. On
    /// success layout is marked dirty and `selection_changed` is emitted,
    /// even when the selection is unchanged.
    ///
    /// # Errors
    ///
    /// [`AccordionError::OutOfRange`] if the selection breaks the display
    /// mode's cardinality rule or names an index past the last entry. The
    /// previous selection is kept.
    pub fn set_selection<I>(&mut self, indices: I) -> AccordionResult<()>
    where
        I: IntoIterator<Item = usize>,
    {
        self.apply_selection(indices.into_iter().collect())
    }

    fn apply_selection(&mut self, candidate: Selection) -> AccordionResult<()> {
        if let Err(violation) = self.selection.try_replace(candidate, self.registry.len()) {
            tracing::warn!(target: targets::SELECTION, %violation, "rejected selection");
            return Err(AccordionError::out_of_range("selection", violation));
        }

        tracing::debug!(
            target: targets::SELECTION,
            selection = ?self.selection.selected(),
            "selection changed"
        );
        self.needs_layout = true;
        self.selection_changed.emit(());
        Ok(())
    }

    /// Open or close entry `index`, as tapping its header does.
    ///
    /// Returns `Ok(false)` when the entry is the only open one in
    /// [`DisplayMode::SingleSelectionOneAlwaysOpen`], which cannot be closed.
    /// Opening an entry makes the next layout pass scroll it into view.
    pub fn toggle(&mut self, index: usize) -> AccordionResult<bool> {
        match self.selection.toggle_candidate(index) {
            ToggleOutcome::Unchanged => {
                tracing::debug!(target: targets::SELECTION, index, "entry must stay open");
                Ok(false)
            }
            ToggleOutcome::Open(candidate) => {
                self.apply_selection(candidate)?;
                self.just_opened = Some(index);
                Ok(true)
            }
            ToggleOutcome::Close(candidate) => {
                self.apply_selection(candidate)?;
                self.just_opened = None;
                Ok(true)
            }
        }
    }

    /// Run the activation action of a header view.
    ///
    /// # Errors
    ///
    /// [`AccordionError::InvalidArgument`] if `view` is not a registered header.
    pub fn activate_header(&mut self, view: ViewId) -> AccordionResult<bool> {
        match self.views.get(view).map(View::role) {
            Some(ViewRole::Header { entry }) => self.toggle(entry),
            _ => {
                let err = AccordionError::invalid_argument("header", "view is not an entry header");
                tracing::warn!(target: targets::SELECTION, %err, "rejected activation");
                Err(err)
            }
        }
    }

    /// Handle a tap at `point` in viewport coordinates.
    ///
    /// Returns `Ok(false)` when no visible header is under the point.
    pub fn tap(&mut self, point: Point) -> AccordionResult<bool> {
        let target = Point::new(point.x, point.y + self.scroll.offset);

        let hit = self.views.subviews().iter().rev().copied().find(|&id| {
            self.views.get(id).is_some_and(|view| {
                !view.hidden
                    && matches!(view.role(), ViewRole::Header { .. })
                    && view.frame.contains(target)
            })
        });

        match hit {
            Some(header) => self.activate_header(header),
            None => Ok(false),
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Set the container frame. The viewport height follows the frame height.
    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
        self.scroll.viewport_height = frame.height();
        self.needs_layout = true;
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub fn set_needs_layout(&mut self) {
        self.needs_layout = true;
    }

    /// Run a layout pass now if one is pending.
    pub fn layout_if_needed(&mut self) -> bool {
        self.layout_if_needed_at(Instant::now())
    }

    /// Run a layout pass at `now` if one is pending.
    pub fn layout_if_needed_at(&mut self, now: Instant) -> bool {
        if !self.needs_layout {
            return false;
        }
        self.layout_at(now);
        true
    }

    /// Geometry the current selection lays out to, without applying it.
    pub fn compute_layout(&self) -> LayoutResult {
        layout::compute_layout(&self.registry, self.selection.selected())
    }

    /// Run a layout pass now.
    pub fn layout(&mut self) {
        self.layout_at(Instant::now());
    }

    /// Run a layout pass at `now`.
    ///
    /// Writes the new model geometry and scroll offset, then animates from
    /// what is on screen at `now`. A pass that changes nothing leaves a
    /// running animation alone.
    pub fn layout_at(&mut self, now: Instant) {
        let _span = PerfSpan::new("accordion_layout");
        self.needs_layout = false;

        // Settle a batch that finished before this pass could supersede it.
        self.tick_at(now);

        let layout = self.compute_layout();

        let just_opened = self.just_opened.take().and_then(|index| {
            let placement = layout.entries.get(index).filter(|p| p.expanded)?;
            let entry = self.registry.get(index)?;
            Some(JustOpened {
                header_bottom: placement.header.bottom(),
                content_height: entry.original_content_size.height,
            })
        });
        let offset = resolve_offset(
            self.scroll.offset,
            self.scroll.viewport_height,
            layout.total_height,
            just_opened,
        );

        let carried = self.orchestrator.in_flight_frames(&self.views, now);
        let mut batch = LayoutBatch::default();

        for (index, (entry, placement)) in self.registry.iter().zip(&layout.entries).enumerate() {
            if placement.expanded {
                self.views.set_hidden(entry.content, false);
            }

            let header_y = sticky_header_y(placement.content, entry.header_height, offset)
                .unwrap_or(placement.header.top());
            let header_target = placement.header.with_y(header_y);

            let mut changed = false;
            for (view, target) in [(entry.header, header_target), (entry.content, placement.content)] {
                let model = self.views.frame(view);
                if model != target {
                    batch.frames.push(FrameChange {
                        view,
                        from: self.orchestrator.presented_frame(view, model, now),
                    });
                    self.views.set_frame(view, target);
                    changed = true;
                }
            }

            if changed {
                tracing::trace!(
                    target: targets::LAYOUT,
                    index,
                    header_y,
                    content_height = placement.content.height(),
                    "entry moved"
                );
                if !placement.expanded {
                    batch.hide_on_completion.push(entry.content);
                }
            } else if !placement.expanded {
                if self.orchestrator.is_pending_hide(entry.content) {
                    batch.hide_on_completion.push(entry.content);
                } else {
                    self.views.set_hidden(entry.content, true);
                }
            }
        }

        let scroll_changed =
            offset != self.scroll.offset || layout.total_height != self.scroll.content_height;

        if !batch.frames.is_empty() || scroll_changed {
            if scroll_changed || self.orchestrator.is_scroll_animating() {
                batch.scroll = Some(ScrollChange {
                    from_offset: self.orchestrator.presented_offset(self.scroll.offset, now),
                    from_content_height: self
                        .orchestrator
                        .presented_content_height(self.scroll.content_height, now),
                });
            }
            self.scroll.offset = offset;
            self.scroll.content_height = layout.total_height;
            self.orchestrator.begin_at(batch, carried, now);
        }

        tracing::debug!(
            target: targets::LAYOUT,
            entries = layout.entries.len(),
            content_height = layout.total_height,
            offset,
            "layout pass"
        );

        self.tick_at(now);
    }

    // =========================================================================
    // Animation
    // =========================================================================

    /// Whether a layout animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.orchestrator.is_animating()
    }

    /// Advance the layout animation to the current time.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Advance the layout animation to `now`.
    ///
    /// Returns `true` when the animation completed during this call; the
    /// contents it collapsed are hidden and `animation_finished` is emitted.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let Some(hides) = self.orchestrator.tick_at(now) else {
            return false;
        };

        for view in hides {
            // Skip contents reopened since the batch started.
            if self.views.frame(view).height() <= 0.0 {
                self.views.set_hidden(view, true);
            }
        }

        self.animation_finished.emit(());
        true
    }

    /// On-screen frame of `view` at `now`.
    pub fn presented_frame(&self, view: ViewId, now: Instant) -> Option<Rect> {
        let model = self.views.get(view)?.frame;
        Some(self.orchestrator.presented_frame(view, model, now))
    }

    /// On-screen scroll offset at `now`.
    pub fn presented_scroll_offset(&self, now: Instant) -> f32 {
        self.orchestrator.presented_offset(self.scroll.offset, now)
    }

    /// On-screen content height at `now`.
    pub fn presented_content_height(&self, now: Instant) -> f32 {
        self.orchestrator
            .presented_content_height(self.scroll.content_height, now)
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset
    }

    pub fn viewport_height(&self) -> f32 {
        self.scroll.viewport_height
    }

    pub fn content_height(&self) -> f32 {
        self.scroll.content_height
    }

    /// Handle a scroll event from the viewport.
    ///
    /// The offset is clamped into the scrollable range and any animated
    /// scroll is cancelled. Sticky headers are repositioned and `scrolled`
    /// is emitted. Non-finite offsets are ignored.
    pub fn on_scroll(&mut self, offset: f32) {
        if !offset.is_finite() {
            tracing::warn!(target: targets::SCROLL, offset, "ignored non-finite scroll offset");
            return;
        }

        let offset = self.scroll.clamp(offset);
        self.scroll.offset = offset;
        self.orchestrator.cancel_scroll();
        self.apply_sticky_headers();

        tracing::trace!(target: targets::SCROLL, offset, "scrolled");
        self.scrolled.emit(offset);
    }

    /// Scroll to `offset`, exactly like a scroll event from the viewport.
    pub fn scroll_to(&mut self, offset: f32) {
        self.on_scroll(offset);
    }

    fn apply_sticky_headers(&mut self) {
        let offset = self.scroll.offset;
        for entry in self.registry.iter() {
            let content = self.views.frame(entry.content);
            let Some(y) = sticky_header_y(content, entry.header_height, offset) else {
                continue;
            };
            let header = self.views.frame(entry.header);
            if header.top() != y {
                tracing::trace!(target: targets::SCROLL, header_y = y, "sticky header moved");
                self.views.set_frame(entry.header, header.with_y(y));
            }
        }
    }
}

impl Default for AccordionView {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(AccordionView: Send, Sync);
