//! Animation support for the accordion.
//!
//! Every layout pass animates as one batch: a single [`Transition`] clock
//! drives all header, content and scroll changes with the same easing so they
//! move in sync.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use lattice_accordion::animation::{Easing, Transition};
//!
//! let mut transition = Transition::new();
//! transition.set_easing(Easing::Linear);
//!
//! let start = Instant::now();
//! transition.start_at(start);
//! let halfway = transition.progress_at(start + Duration::from_millis(150));
//! assert!((halfway - 0.5).abs() < 1e-3);
//! ```

mod easing;
mod transition;

pub use easing::Easing;
pub use transition::{Transition, TransitionState};
