//! Tests for the accordion widget.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use lattice_accordion_core::{ErrorKind, Point, Rect, SelectionViolation, Size};

use super::*;
use crate::animation::Easing;

const WIDTH: f32 = 320.0;
const VIEWPORT: f32 = 400.0;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Accordion with `count` titled entries of `content_height`, no animation.
fn setup(mode: DisplayMode, count: usize, content_height: f32) -> (AccordionView, Vec<ViewId>) {
    let mut accordion = AccordionView::new()
        .with_display_mode(mode)
        .with_frame(Rect::new(0.0, 0.0, WIDTH, VIEWPORT));
    accordion.set_animation_duration(Duration::ZERO);

    let contents = (0..count)
        .map(|i| {
            let content = accordion.create_view(Rect::new(0.0, 0.0, WIDTH, content_height));
            accordion
                .add_titled_entry(format!("Entry {i}"), content)
                .unwrap();
            content
        })
        .collect();
    (accordion, contents)
}

fn animate_linear(accordion: &mut AccordionView, duration: Duration) {
    accordion.set_animation_duration(duration);
    accordion.set_animation_easing(Easing::Linear);
}

fn header(accordion: &AccordionView, index: usize) -> ViewId {
    accordion.entry(index).unwrap().header
}

#[test]
fn test_new_accordion_defaults() {
    let accordion = AccordionView::new();

    assert!(accordion.needs_layout());
    assert_eq!(accordion.display_mode(), DisplayMode::SingleSelectionOneAlwaysOpen);
    assert_eq!(accordion.header_height(), 45.0);
    assert_eq!(accordion.animation_duration(), ms(300));
    assert_eq!(accordion.animation_easing(), Easing::EaseIn);
    assert_eq!(accordion.default_header_background(), Color::BLACK);
    assert_eq!(accordion.default_header_text_color(), Color::WHITE);
    assert!(accordion.selection().is_empty());
    assert_eq!(accordion.entry_count(), 0);
}

#[test]
fn test_add_entry_normalizes_frames() {
    let mut accordion = AccordionView::new().with_frame(Rect::new(0.0, 0.0, WIDTH, VIEWPORT));
    let header = accordion.create_view(Rect::new(12.0, 0.0, 100.0, 60.0));
    let content = accordion.create_view(Rect::new(8.0, 30.0, 200.0, 150.0));

    let index = accordion.add_entry(header, content).unwrap();
    assert_eq!(index, 0);

    assert_eq!(accordion.views().frame(header), Rect::new(0.0, 0.0, WIDTH, 60.0));
    assert_eq!(accordion.views().frame(content), Rect::new(0.0, 30.0, WIDTH, 0.0));
    assert!(accordion.view(content).unwrap().clips_to_bounds);

    let entry = accordion.entry(0).unwrap();
    assert_eq!(entry.header_height, 60.0);
    assert_eq!(entry.original_content_size, Size::new(200.0, 150.0));

    // Content below header in z-order.
    assert_eq!(accordion.views().subviews(), &[content, header]);
    assert_eq!(
        accordion.view(header).unwrap().role(),
        ViewRole::Header { entry: 0 }
    );
}

#[test]
fn test_add_entry_rejects_bad_handles() {
    let mut accordion = AccordionView::new();
    let header = accordion.create_view(Rect::new(0.0, 0.0, WIDTH, 45.0));
    let content = accordion.create_view(Rect::new(0.0, 0.0, WIDTH, 100.0));

    let err = accordion.add_entry(header, header).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    accordion.add_entry(header, content).unwrap();

    let other = accordion.create_view(Rect::ZERO);
    let err = accordion.add_entry(header, other).unwrap_err();
    assert_eq!(
        err,
        AccordionError::invalid_argument("header", "view is already part of an entry")
    );

    let mut foreign = ViewTree::new();
    foreign.insert(View::default());
    foreign.insert(View::default());
    foreign.insert(View::default());
    let dangling = foreign.insert(View::default());
    let err = accordion.add_entry(other, dangling).unwrap_err();
    assert_eq!(
        err,
        AccordionError::invalid_argument("content", "view does not exist")
    );

    assert_eq!(accordion.entry_count(), 1);
    assert_eq!(accordion.view(other).unwrap().role(), ViewRole::Detached);
}

#[test]
fn test_add_titled_entry_uses_defaults() {
    let mut accordion = AccordionView::new().with_frame(Rect::new(0.0, 0.0, WIDTH, VIEWPORT));
    accordion.set_header_height(50.0).unwrap();
    accordion.set_default_header_background(Color::GRAY);

    let content = accordion.create_view(Rect::new(0.0, 0.0, WIDTH, 80.0));
    accordion.add_titled_entry("Settings", content).unwrap();

    let header = accordion.view(header(&accordion, 0)).unwrap();
    assert_eq!(header.title.as_deref(), Some("Settings"));
    assert_eq!(header.frame, Rect::new(0.0, 0.0, WIDTH, 50.0));
    assert_eq!(header.background, Some(Color::GRAY));
    assert_eq!(header.text_color, Some(Color::WHITE));
}

#[test]
fn test_add_titled_entry_failure_creates_nothing() {
    let (mut accordion, contents) = setup(DisplayMode::SingleSelection, 1, 100.0);
    let views_before = accordion.views().len();

    let err = accordion.add_titled_entry("Again", contents[0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(accordion.views().len(), views_before);
    assert_eq!(accordion.entry_count(), 1);
}

#[test]
fn test_set_selection_emits_every_time() {
    let (mut accordion, _) = setup(DisplayMode::MultipleSelection, 3, 100.0);
    let count = Arc::new(AtomicUsize::new(0));
    let count_clone = count.clone();
    accordion.selection_changed.connect(move |_| {
        count_clone.fetch_add(1, Ordering::SeqCst);
    });

    accordion.set_selection([2, 0, 2]).unwrap();
    accordion.set_selection([0, 2]).unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert_eq!(accordion.selection().iter().copied().collect::<Vec<_>>(), vec![0, 2]);
}

#[test]
fn test_rejected_selection_keeps_state() {
    let (mut accordion, _) = setup(DisplayMode::SingleSelectionOneAlwaysOpen, 3, 100.0);
    accordion.set_selection([1]).unwrap();
    accordion.layout_at(Instant::now());

    let count = Arc::new(AtomicUsize::new(0));
    let count_clone = count.clone();
    accordion.selection_changed.connect(move |_| {
        count_clone.fetch_add(1, Ordering::SeqCst);
    });

    let err = accordion.set_selection([5]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    let err = accordion.set_selection(std::iter::empty()).unwrap_err();
    assert_eq!(
        err.violation(),
        Some(SelectionViolation::ExactlyOneRequired { count: 0 })
    );

    assert_eq!(accordion.selection().iter().copied().collect::<Vec<_>>(), vec![1]);
    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert!(!accordion.needs_layout());
}

#[test]
fn test_toggle_sets_marker_only_on_success() {
    let (mut accordion, _) = setup(DisplayMode::SingleSelection, 3, 100.0);

    assert!(accordion.toggle(7).is_err());
    assert_eq!(accordion.just_opened, None);
    assert!(accordion.selection().is_empty());

    assert!(accordion.toggle(1).unwrap());
    assert_eq!(accordion.just_opened, Some(1));

    assert!(accordion.toggle(1).unwrap());
    assert_eq!(accordion.just_opened, None);
    assert!(accordion.selection().is_empty());
}

#[test]
fn test_toggle_one_always_open_is_noop() {
    let (mut accordion, _) = setup(DisplayMode::SingleSelectionOneAlwaysOpen, 3, 100.0);
    accordion.set_selection([0]).unwrap();
    accordion.layout_at(Instant::now());

    assert!(!accordion.toggle(0).unwrap());
    assert!(!accordion.needs_layout());
    assert!(accordion.toggle(1).unwrap());
    assert_eq!(accordion.selection().iter().copied().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn test_layout_consumes_marker() {
    let (mut accordion, _) = setup(DisplayMode::SingleSelection, 3, 100.0);
    accordion.toggle(2).unwrap();
    assert!(accordion.layout_if_needed_at(Instant::now()));
    assert_eq!(accordion.just_opened, None);
    assert!(!accordion.layout_if_needed_at(Instant::now()));
}

#[test]
fn test_layout_places_entries() {
    let (mut accordion, contents) = setup(DisplayMode::SingleSelection, 3, 120.0);
    accordion.set_selection([1]).unwrap();
    accordion.layout_at(Instant::now());

    assert_eq!(accordion.views().frame(header(&accordion, 2)).top(), 210.0);
    assert_eq!(
        accordion.views().frame(contents[1]),
        Rect::new(0.0, 90.0, WIDTH, 120.0)
    );
    assert_eq!(accordion.content_height(), 255.0);
    assert!(!accordion.views().is_hidden(contents[1]));
    assert!(accordion.views().is_hidden(contents[0]));
    assert!(accordion.views().is_hidden(contents[2]));
    assert!(!accordion.is_animating());
}

#[test]
fn test_compute_layout_matches_applied_layout() {
    let (mut accordion, contents) = setup(DisplayMode::MultipleSelection, 4, 70.0);
    accordion.set_selection([0, 3]).unwrap();

    let result = accordion.compute_layout();
    accordion.layout_at(Instant::now());

    assert_eq!(result.total_height, accordion.content_height());
    for (i, content) in contents.iter().enumerate() {
        assert_eq!(result.content_frame(i), Some(accordion.views().frame(*content)));
    }
}

#[test]
fn test_collapse_hides_content_after_animation() {
    let (mut accordion, contents) = setup(DisplayMode::SingleSelection, 3, 120.0);
    accordion.set_selection([0]).unwrap();
    let t0 = Instant::now();
    accordion.layout_at(t0);

    animate_linear(&mut accordion, ms(300));
    let finished = Arc::new(AtomicUsize::new(0));
    let finished_clone = finished.clone();
    accordion.animation_finished.connect(move |_| {
        finished_clone.fetch_add(1, Ordering::SeqCst);
    });

    accordion.toggle(0).unwrap();
    let t1 = t0 + ms(10);
    accordion.layout_at(t1);

    // Model is final right away; presentation is halfway at 150 ms.
    assert_eq!(accordion.views().frame(contents[0]).height(), 0.0);
    let presented = accordion.presented_frame(contents[0], t1 + ms(150)).unwrap();
    assert!((presented.height() - 60.0).abs() < 0.5);
    let presented_header = accordion
        .presented_frame(header(&accordion, 1), t1 + ms(150))
        .unwrap();
    assert!((presented_header.top() - 105.0).abs() < 0.5);

    assert!(!accordion.views().is_hidden(contents[0]));
    assert!(!accordion.tick_at(t1 + ms(150)));
    assert!(!accordion.views().is_hidden(contents[0]));

    assert!(accordion.tick_at(t1 + ms(300)));
    assert!(accordion.views().is_hidden(contents[0]));
    assert_eq!(finished.load(Ordering::SeqCst), 1);
}

#[test]
fn test_expanded_content_visible_before_animation() {
    let (mut accordion, contents) = setup(DisplayMode::SingleSelection, 3, 120.0);
    let t0 = Instant::now();
    accordion.layout_at(t0);
    assert!(accordion.views().is_hidden(contents[2]));

    animate_linear(&mut accordion, ms(300));
    accordion.toggle(2).unwrap();
    accordion.layout_at(t0 + ms(10));

    assert!(!accordion.views().is_hidden(contents[2]));
    let presented = accordion.presented_frame(contents[2], t0 + ms(10)).unwrap();
    assert_eq!(presented.height(), 0.0);
}

#[test]
fn test_reopen_during_collapse_keeps_content_visible() {
    let (mut accordion, contents) = setup(DisplayMode::SingleSelection, 3, 120.0);
    accordion.set_selection([0]).unwrap();
    let t0 = Instant::now();
    accordion.layout_at(t0);

    animate_linear(&mut accordion, ms(300));
    accordion.toggle(0).unwrap();
    accordion.layout_at(t0 + ms(100));

    accordion.toggle(0).unwrap();
    let t2 = t0 + ms(200);
    accordion.layout_at(t2);

    // Picks up from the on-screen height, not from zero.
    let presented = accordion.presented_frame(contents[0], t2).unwrap();
    assert!((presented.height() - 80.0).abs() < 0.5);

    assert!(accordion.tick_at(t2 + ms(300)));
    assert!(!accordion.views().is_hidden(contents[0]));
    assert_eq!(accordion.views().frame(contents[0]).height(), 120.0);
}

#[test]
fn test_noop_layout_leaves_animation_running() {
    let (mut accordion, contents) = setup(DisplayMode::SingleSelection, 3, 120.0);
    accordion.set_selection([0]).unwrap();
    let t0 = Instant::now();
    accordion.layout_at(t0);

    animate_linear(&mut accordion, ms(300));
    accordion.toggle(0).unwrap();
    accordion.layout_at(t0);

    accordion.set_needs_layout();
    accordion.layout_at(t0 + ms(100));

    assert!(accordion.is_animating());
    let presented = accordion.presented_frame(contents[0], t0 + ms(150)).unwrap();
    assert!((presented.height() - 60.0).abs() < 0.5);
    assert!(accordion.tick_at(t0 + ms(300)));
}

#[test]
fn test_unchanged_collapsed_entry_hidden_directly() {
    let mut accordion = AccordionView::new().with_frame(Rect::new(0.0, 0.0, WIDTH, VIEWPORT));
    animate_linear(&mut accordion, ms(300));

    // Already where the first layout pass puts it.
    let first = accordion.create_view(Rect::new(0.0, 45.0, WIDTH, 100.0));
    accordion.add_titled_entry("First", first).unwrap();
    let second = accordion.create_view(Rect::new(0.0, 0.0, WIDTH, 100.0));
    accordion.add_titled_entry("Second", second).unwrap();

    accordion.layout_at(Instant::now());

    assert!(accordion.is_animating());
    assert!(accordion.views().is_hidden(first));
    assert!(!accordion.views().is_hidden(second));
}

#[test]
fn test_pending_hide_carried_into_next_batch() {
    let (mut accordion, contents) = setup(DisplayMode::MultipleSelection, 3, 120.0);
    accordion.set_selection([0, 1]).unwrap();
    let t0 = Instant::now();
    accordion.layout_at(t0);

    animate_linear(&mut accordion, ms(300));
    accordion.set_selection([1]).unwrap();
    accordion.layout_at(t0);

    accordion.set_selection(std::iter::empty()).unwrap();
    let t1 = t0 + ms(100);
    accordion.layout_at(t1);

    // The first batch would have ended at 300 ms; the second runs to 400 ms.
    assert!(!accordion.tick_at(t0 + ms(350)));
    assert!(!accordion.views().is_hidden(contents[0]));

    assert!(accordion.tick_at(t1 + ms(300)));
    assert!(accordion.views().is_hidden(contents[0]));
    assert!(accordion.views().is_hidden(contents[1]));
}

#[test]
fn test_sticky_header_follows_scroll() {
    let (mut accordion, _) = setup(DisplayMode::SingleSelection, 5, 300.0);
    accordion.set_selection([1]).unwrap();
    accordion.layout_at(Instant::now());
    let header1 = header(&accordion, 1);

    // Band of entry 1 is [45, 390).
    accordion.on_scroll(100.0);
    assert_eq!(accordion.views().frame(header1).top(), 100.0);

    accordion.on_scroll(30.0);
    assert_eq!(accordion.views().frame(header1).top(), 45.0);

    // A layout pass while pinned keeps the pin and animates nothing.
    accordion.set_animation_duration(ms(300));
    accordion.on_scroll(120.0);
    accordion.set_needs_layout();
    accordion.layout_at(Instant::now());
    assert_eq!(accordion.views().frame(header1).top(), 120.0);
    assert!(!accordion.is_animating());
}

#[test]
fn test_scroll_clamps_and_emits() {
    let (mut accordion, _) = setup(DisplayMode::SingleSelection, 5, 300.0);
    accordion.set_selection([1]).unwrap();
    accordion.layout_at(Instant::now());
    assert_eq!(accordion.content_height(), 525.0);

    let offsets = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let offsets_clone = offsets.clone();
    accordion.scrolled.connect(move |&offset| {
        offsets_clone.lock().push(offset);
    });

    accordion.scroll_to(500.0);
    accordion.on_scroll(-20.0);

    assert_eq!(*offsets.lock(), vec![125.0, 0.0]);
    assert_eq!(accordion.scroll_offset(), 0.0);
}

#[test]
fn test_scroll_event_cancels_animated_scroll() {
    let (mut accordion, _) = setup(DisplayMode::SingleSelection, 10, 120.0);
    let t0 = Instant::now();
    accordion.layout_at(t0);

    animate_linear(&mut accordion, ms(300));
    accordion.toggle(8).unwrap();
    accordion.layout_at(t0);
    assert_eq!(accordion.scroll_offset(), 125.0);
    assert!(accordion.presented_scroll_offset(t0 + ms(150)) < 125.0);

    accordion.on_scroll(40.0);
    assert_eq!(accordion.presented_scroll_offset(t0 + ms(150)), 40.0);
    assert!(accordion.is_animating());
}

#[test]
fn test_tap_activates_header_under_point() {
    let (mut accordion, _) = setup(DisplayMode::SingleSelectionOneAlwaysOpen, 3, 120.0);
    accordion.set_selection([0]).unwrap();
    accordion.layout_at(Instant::now());

    // Header 1 sits at [165, 210).
    assert!(accordion.tap(Point::new(10.0, 170.0)).unwrap());
    assert_eq!(accordion.selection().iter().copied().collect::<Vec<_>>(), vec![1]);

    assert!(!accordion.tap(Point::new(10.0, 390.0)).unwrap());
    assert!(!accordion.tap(Point::new(WIDTH + 1.0, 170.0)).unwrap());
}

#[test]
fn test_activate_header_rejects_non_headers() {
    let (mut accordion, contents) = setup(DisplayMode::SingleSelection, 2, 120.0);

    let err = accordion.activate_header(contents[0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let loose = accordion.create_view(Rect::ZERO);
    assert!(accordion.activate_header(loose).is_err());
    assert!(accordion.selection().is_empty());

    assert!(accordion.activate_header(header(&accordion, 1)).unwrap());
    assert!(accordion.selection().contains(&1));
}

#[test]
fn test_set_header_height_rejects_invalid_heights() {
    let mut accordion = AccordionView::new().with_frame(Rect::new(0.0, 0.0, WIDTH, VIEWPORT));

    for height in [0.0, -10.0, f32::NAN, f32::INFINITY] {
        let err = accordion.set_header_height(height).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
    assert_eq!(accordion.header_height(), 45.0);

    let content = accordion.create_view(Rect::new(0.0, 0.0, WIDTH, 80.0));
    let index = accordion.add_titled_entry("Kept", content).unwrap();
    assert_eq!(accordion.entry(index).unwrap().header_height, 45.0);
}

#[test]
fn test_non_finite_scroll_offset_ignored() {
    let (mut accordion, _) = setup(DisplayMode::SingleSelection, 5, 300.0);
    accordion.set_selection([1]).unwrap();
    accordion.layout_at(Instant::now());
    accordion.on_scroll(60.0);

    let emitted = Arc::new(AtomicUsize::new(0));
    let emitted_clone = emitted.clone();
    accordion.scrolled.connect(move |_| {
        emitted_clone.fetch_add(1, Ordering::SeqCst);
    });

    accordion.on_scroll(f32::NAN);
    accordion.scroll_to(f32::INFINITY);

    assert_eq!(accordion.scroll_offset(), 60.0);
    assert_eq!(emitted.load(Ordering::SeqCst), 0);
}

#[test]
fn test_finished_batch_settles_before_next_pass() {
    let (mut accordion, contents) = setup(DisplayMode::SingleSelection, 3, 120.0);
    accordion.set_selection([0]).unwrap();
    let t0 = Instant::now();
    accordion.layout_at(t0);

    animate_linear(&mut accordion, ms(300));
    let finished = Arc::new(AtomicUsize::new(0));
    let finished_clone = finished.clone();
    accordion.animation_finished.connect(move |_| {
        finished_clone.fetch_add(1, Ordering::SeqCst);
    });

    accordion.toggle(0).unwrap();
    accordion.layout_at(t0);

    // No tick in between; the collapse ended at 300 ms.
    accordion.toggle(2).unwrap();
    let t1 = t0 + ms(400);
    accordion.layout_at(t1);

    assert_eq!(finished.load(Ordering::SeqCst), 1);
    assert!(accordion.views().is_hidden(contents[0]));
    assert!(accordion.is_animating());

    assert!(accordion.tick_at(t1 + ms(300)));
    assert_eq!(finished.load(Ordering::SeqCst), 2);
}
