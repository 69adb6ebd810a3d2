//! Lattice Accordion - an animated, scroll-aware accordion widget.
//!
//! An accordion stacks header/content pairs vertically. Activating a header
//! opens or closes its content; the whole stack re-flows in one animated
//! batch and the viewport scrolls just far enough to show the entry that was
//! opened. Open entries keep their header pinned to the top of the viewport
//! while their content scrolls underneath.
//!
//! The widget is headless: it owns view geometry and state, and the host
//! renders the frames it reports.
//!
//! # Example
//!
//! ```
//! use lattice_accordion::prelude::*;
//!
//! let config = AccordionConfig::from_toml_str(r#"
//!     display_mode = "multiple_selection"
//!     animation_duration_ms = 0
//! "#).unwrap();
//!
//! let mut accordion = AccordionView::new()
//!     .with_config(&config)
//!     .with_frame(Rect::new(0.0, 0.0, 320.0, 400.0));
//!
//! let content = accordion.create_view(Rect::new(0.0, 0.0, 320.0, 200.0));
//! let index = accordion.add_titled_entry("Details", content).unwrap();
//!
//! accordion.set_selection([index]).unwrap();
//! accordion.layout_if_needed();
//! assert_eq!(accordion.views().frame(content).height(), 200.0);
//! ```

pub use lattice_accordion_core::*;

pub mod accordion;
pub mod animation;
pub mod config;
pub mod prelude;
pub mod view;

pub use accordion::AccordionView;
pub use config::{AccordionConfig, ConfigError};
