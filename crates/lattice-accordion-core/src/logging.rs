//! Logging facilities for Lattice Accordion.
//!
//! Lattice Accordion uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("lattice_accordion::layout=debug")
//!         .init();
//! }
//! ```
//!
//! Selection and registration rejections are logged at `warn`, state changes
//! at `debug`, and per-entry layout detail at `trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "lattice_accordion_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "lattice_accordion_core::signal";
    /// Entry registration target.
    pub const REGISTRY: &str = "lattice_accordion::registry";
    /// Selection validation and toggling target.
    pub const SELECTION: &str = "lattice_accordion::selection";
    /// Layout pass target.
    pub const LAYOUT: &str = "lattice_accordion::layout";
    /// Scroll offset and sticky header target.
    pub const SCROLL: &str = "lattice_accordion::scroll";
    /// Animation batch target.
    pub const ANIMATION: &str = "lattice_accordion::animation";
    /// Performance span target.
    pub const PERF: &str = "lattice_accordion::perf";
}

/// A guard that records an `info` span under [`targets::PERF`] while alive.
///
/// ```
/// use lattice_accordion_core::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("layout_pass");
///     // timed work
/// }
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a performance span for `name`.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "lattice_accordion::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
