//! Prelude module for Lattice Accordion.
//!
//! ```ignore
//! use lattice_accordion::prelude::*;
//! ```

// ============================================================================
// Core
// ============================================================================

pub use lattice_accordion_core::{
    AccordionError, AccordionResult, Color, ConnectionId, ErrorKind, Point, Rect,
    SelectionViolation, Signal, Size,
};

// ============================================================================
// Widget
// ============================================================================

pub use crate::accordion::{AccordionView, DisplayMode, LayoutResult, Selection};
pub use crate::animation::Easing;
pub use crate::config::{AccordionConfig, ConfigError};
pub use crate::view::{View, ViewId, ViewRole};
