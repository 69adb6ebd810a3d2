//! The layout algorithm: stack headers and contents top to bottom.

use lattice_accordion_core::Rect;

use super::registry::EntryRegistry;
use super::selection::Selection;

/// Computed geometry for one entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryPlacement {
    /// Header frame at its natural (unpinned) position.
    pub header: Rect,
    /// Content frame; zero height when collapsed.
    pub content: Rect,
    /// Whether the entry is open.
    pub expanded: bool,
}

/// Geometry for every entry plus the total scrollable height.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutResult {
    /// One placement per entry, in registry order.
    pub entries: Vec<EntryPlacement>,
    /// Height of all headers plus all open contents.
    pub total_height: f32,
}

impl LayoutResult {
    pub fn header_frame(&self, index: usize) -> Option<Rect> {
        self.entries.get(index).map(|p| p.header)
    }

    pub fn content_frame(&self, index: usize) -> Option<Rect> {
        self.entries.get(index).map(|p| p.content)
    }
}

/// Lay out `registry` with the entries in `selection` open.
///
/// Pure: the same registry and selection always give the same result.
pub fn compute_layout(registry: &EntryRegistry, selection: &Selection) -> LayoutResult {
    let mut cursor = 0.0_f32;
    let mut entries = Vec::with_capacity(registry.len());

    for (index, entry) in registry.iter().enumerate() {
        let header = Rect::new(0.0, cursor, entry.width, entry.header_height);
        cursor += entry.header_height;

        let expanded = selection.contains(&index);
        let height = if expanded {
            entry.original_content_size.height
        } else {
            0.0
        };
        let content = Rect::new(0.0, cursor, entry.width, height);
        cursor += height;

        entries.push(EntryPlacement {
            header,
            content,
            expanded,
        });
    }

    LayoutResult {
        entries,
        total_height: cursor,
    }
}
