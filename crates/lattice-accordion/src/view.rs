//! Views owned by the accordion.
//!
//! Hosts never hold views directly. They create them inside the accordion's
//! [`ViewTree`] and keep the returned [`ViewId`] handle; the tree owns every
//! header and content view for the lifetime of the widget.

use lattice_accordion_core::{Color, Rect};
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle to a view inside a [`ViewTree`].
    pub struct ViewId;
}

/// What a view is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewRole {
    /// Created but not registered to any entry yet.
    #[default]
    Detached,
    /// The tappable header of entry `entry`.
    Header { entry: usize },
    /// The collapsible content of entry `entry`.
    Content { entry: usize },
}

impl ViewRole {
    /// The entry this view belongs to, if registered.
    pub fn entry(&self) -> Option<usize> {
        match self {
            ViewRole::Detached => None,
            ViewRole::Header { entry } | ViewRole::Content { entry } => Some(*entry),
        }
    }
}

/// A rectangular view: a header button or a content panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct View {
    /// Frame in content coordinates of the scrollable container.
    pub frame: Rect,
    /// Hidden views are neither drawn nor hit-tested.
    pub hidden: bool,
    /// Whether drawing is clipped to the frame.
    pub clips_to_bounds: bool,
    /// Header title, for headers created by the accordion.
    pub title: Option<String>,
    /// Background color, if the view paints one.
    pub background: Option<Color>,
    /// Title color, if the view draws text.
    pub text_color: Option<Color>,
    role: ViewRole,
}

impl View {
    /// Create a detached view with the given frame.
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            ..Self::default()
        }
    }

    /// Set the title using builder pattern.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the background color using builder pattern.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Set the text color using builder pattern.
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    /// The role this view plays in the accordion.
    pub fn role(&self) -> ViewRole {
        self.role
    }
}

/// Arena of views plus the z-ordered list of attached subviews.
#[derive(Debug, Default)]
pub struct ViewTree {
    views: SlotMap<ViewId, View>,
    /// Attached views, back to front.
    subviews: Vec<ViewId>,
}

impl ViewTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `view` and return its handle.
    pub fn insert(&mut self, view: View) -> ViewId {
        self.views.insert(view)
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.views.contains_key(id)
    }

    pub fn get(&self, id: ViewId) -> Option<&View> {
        self.views.get(id)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.get_mut(id)
    }

    /// Model frame of a view, or [`Rect::ZERO`] for an unknown handle.
    pub fn frame(&self, id: ViewId) -> Rect {
        self.views.get(id).map(|v| v.frame).unwrap_or(Rect::ZERO)
    }

    /// Set the model frame. Returns `false` for an unknown handle.
    pub fn set_frame(&mut self, id: ViewId, frame: Rect) -> bool {
        match self.views.get_mut(id) {
            Some(view) => {
                view.frame = frame;
                true
            }
            None => false,
        }
    }

    pub fn is_hidden(&self, id: ViewId) -> bool {
        self.views.get(id).is_some_and(|v| v.hidden)
    }

    pub fn set_hidden(&mut self, id: ViewId, hidden: bool) {
        if let Some(view) = self.views.get_mut(id) {
            view.hidden = hidden;
        }
    }

    /// Register `id` as a subview on top of everything attached so far.
    pub fn attach(&mut self, id: ViewId, role: ViewRole) {
        if let Some(view) = self.views.get_mut(id) {
            view.role = role;
            self.subviews.push(id);
        }
    }

    /// Attached views, back to front.
    pub fn subviews(&self) -> &[ViewId] {
        &self.subviews
    }

    /// Number of views in the arena, attached or not.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
