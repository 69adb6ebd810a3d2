//! Error types for Lattice Accordion.
//!
//! Every error here is a usage-contract violation detected before any state is
//! touched, so a failed call always leaves the widget exactly as it was.

use thiserror::Error;

/// Broad classification of an [`AccordionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A handle or argument was unusable (unknown view, wrong role, ...).
    InvalidArgument,
    /// A selection index or selection size was outside what is allowed.
    OutOfRange,
}

/// Why a candidate selection was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionViolation {
    /// More than one index was given while multiple selection is disabled.
    #[error("multiselection not enabled ({count} indices given)")]
    MultipleNotAllowed {
        /// Number of distinct indices in the candidate.
        count: usize,
    },

    /// The display mode requires exactly one open entry.
    #[error("exactly one entry must stay open ({count} indices given)")]
    ExactlyOneRequired {
        /// Number of distinct indices in the candidate.
        count: usize,
    },

    /// An index does not name a registered entry.
    #[error("index {index} out of range for {entry_count} entries")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of registered entries.
        entry_count: usize,
    },
}

/// The main error type for accordion operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccordionError {
    /// An argument could not be used.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter.
        argument: &'static str,
        /// Human-readable explanation.
        reason: String,
    },

    /// A selection failed validation.
    #[error("argument `{argument}` out of range: {violation}")]
    OutOfRange {
        /// Name of the offending parameter.
        argument: &'static str,
        /// The rule the selection broke.
        #[source]
        violation: SelectionViolation,
    },
}

impl AccordionError {
    /// Create an [`AccordionError::InvalidArgument`].
    pub fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    /// Create an [`AccordionError::OutOfRange`].
    pub fn out_of_range(argument: &'static str, violation: SelectionViolation) -> Self {
        Self::OutOfRange {
            argument,
            violation,
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
        }
    }

    /// The selection rule that was broken, for `OutOfRange` errors.
    pub fn violation(&self) -> Option<SelectionViolation> {
        match self {
            Self::OutOfRange { violation, .. } => Some(*violation),
            Self::InvalidArgument { .. } => None,
        }
    }
}

/// A specialized Result type for accordion operations.
pub type AccordionResult<T> = std::result::Result<T, AccordionError>;
