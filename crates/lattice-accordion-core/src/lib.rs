//! Core systems for Lattice Accordion.
//!
//! This crate provides the foundational pieces the accordion widget is built on:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Errors**: The usage-contract errors surfaced by the widget API
//! - **Logging**: Tracing targets and performance spans
//! - **Geometry**: Points, sizes, rectangles and colors
//!
//! # Signal/Slot Example
//!
//! ```
//! use lattice_accordion_core::Signal;
//!
//! // A notification with no payload
//! let selection_changed = Signal::<()>::new();
//!
//! let conn_id = selection_changed.connect(|_| {
//!     println!("selection changed");
//! });
//!
//! selection_changed.emit(());
//! selection_changed.disconnect(conn_id);
//! ```
//!
//! # Geometry Example
//!
//! ```
//! use lattice_accordion_core::{Point, Rect};
//!
//! let header = Rect::new(0.0, 45.0, 320.0, 45.0);
//! assert_eq!(header.bottom(), 90.0);
//! assert!(header.contains(Point::new(10.0, 60.0)));
//! ```

mod error;
pub mod logging;
pub mod signal;
pub mod types;

pub use error::{AccordionError, AccordionResult, ErrorKind, SelectionViolation};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
pub use types::{Color, Point, Rect, Size};
