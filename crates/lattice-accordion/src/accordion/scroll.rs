//! Scroll coordination: offset resolution after a layout pass, and sticky
//! header placement on every scroll event.

use lattice_accordion_core::Rect;

/// Vertical scroll state of the accordion's viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Vertical content offset at the top of the viewport.
    pub offset: f32,
    /// Height of the visible area.
    pub viewport_height: f32,
    /// Height of the scrollable content.
    pub content_height: f32,
}

impl ScrollState {
    /// Largest offset that still fills the viewport, never negative.
    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Clamp `offset` into `0..=max_offset()`.
    pub fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.max_offset())
    }
}

/// The entry that was just opened, as seen by the offset resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JustOpened {
    /// Bottom edge of the entry's header after layout.
    pub header_bottom: f32,
    /// The entry's expanded content height.
    pub content_height: f32,
}

/// Resolve the scroll offset after a layout pass.
///
/// Pulls the offset back when content shrank below the viewport bottom,
/// scrolls down just far enough to reveal a just-opened entry (never up), and
/// finally clamps at zero.
pub fn resolve_offset(
    offset: f32,
    viewport_height: f32,
    content_height: f32,
    just_opened: Option<JustOpened>,
) -> f32 {
    let mut offset = offset;

    if offset + viewport_height >= content_height {
        offset = content_height - viewport_height;
    }

    if let Some(opened) = just_opened {
        let needed = opened.header_bottom + opened.content_height - viewport_height;
        if needed > offset {
            offset = needed;
        }
    }

    offset.max(0.0)
}

/// Where a sticky header sits for the given scroll offset.
///
/// The band is the header plus its visible content, `[content.top - header_height,
/// content.bottom)`. While `offset` lies inside the band the header is pinned
/// at `max(band_top, offset)`; otherwise it rests at `band_top`. Returns `None`
/// for collapsed content, whose header is left alone.
pub fn sticky_header_y(content: Rect, header_height: f32, offset: f32) -> Option<f32> {
    if content.height() <= 0.0 {
        return None;
    }

    let band_top = content.top() - header_height;
    let band_bottom = content.bottom();

    if offset >= band_top && offset < band_bottom {
        Some(band_top.max(offset))
    } else {
        Some(band_top)
    }
}
