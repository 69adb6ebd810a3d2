//! The append-only entry registry.

use lattice_accordion_core::Size;

use crate::view::ViewId;

/// One header/content pair.
///
/// The entry's index in the [`EntryRegistry`] is its permanent identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    /// The tappable header view.
    pub header: ViewId,
    /// The collapsible content view.
    pub content: ViewId,
    /// Width of header and content, fixed when the entry was added.
    pub width: f32,
    /// Header height, fixed when the entry was added.
    pub header_height: f32,
    /// Content size captured when the entry was added; the expanded size.
    pub original_content_size: Size,
}

/// Insertion-ordered entries. Entries are never removed or reordered.
#[derive(Debug, Clone, Default)]
pub struct EntryRegistry {
    entries: Vec<Entry>,
}

impl EntryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its index.
    pub fn push(&mut self, entry: Entry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}
