//! Selection model: which entries are open, and what the display mode allows.

use std::collections::BTreeSet;

use lattice_accordion_core::SelectionViolation;
use serde::Deserialize;

/// Set of open entry indices, in ascending order.
pub type Selection = BTreeSet<usize>;

/// How many entries may be open at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Zero or one entry open.
    SingleSelection,
    /// Exactly one entry open; the open entry cannot be closed by tapping it.
    #[default]
    SingleSelectionOneAlwaysOpen,
    /// Any subset open, including none.
    MultipleSelection,
}

/// Check `selection` against the rules of `mode` for `entry_count` entries.
///
/// Cardinality is checked before index range.
pub fn validate_selection(
    mode: DisplayMode,
    selection: &Selection,
    entry_count: usize,
) -> Result<(), SelectionViolation> {
    let count = selection.len();

    if mode != DisplayMode::MultipleSelection && count > 1 {
        return Err(SelectionViolation::MultipleNotAllowed { count });
    }

    if mode == DisplayMode::SingleSelectionOneAlwaysOpen && count != 1 {
        return Err(SelectionViolation::ExactlyOneRequired { count });
    }

    if let Some(&index) = selection.iter().find(|&&i| i >= entry_count) {
        return Err(SelectionViolation::IndexOutOfBounds { index, entry_count });
    }

    Ok(())
}

/// What toggling an entry would do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The entry opens; the candidate selection includes it.
    Open(Selection),
    /// The entry closes; the candidate selection excludes it.
    Close(Selection),
    /// Nothing changes (closing the only entry in one-always-open mode).
    Unchanged,
}

/// Compute the candidate selection for toggling `index`.
///
/// The candidate is not validated here.
pub fn toggle_candidate(mode: DisplayMode, current: &Selection, index: usize) -> ToggleOutcome {
    if current.contains(&index) {
        if mode == DisplayMode::SingleSelectionOneAlwaysOpen {
            return ToggleOutcome::Unchanged;
        }
        let mut candidate = current.clone();
        candidate.remove(&index);
        ToggleOutcome::Close(candidate)
    } else {
        let mut candidate = if mode == DisplayMode::MultipleSelection {
            current.clone()
        } else {
            Selection::new()
        };
        candidate.insert(index);
        ToggleOutcome::Open(candidate)
    }
}

/// The current selection and the mode it is validated against.
///
/// The selection starts empty in every mode; the mode's rules apply to
/// mutations only.
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    mode: DisplayMode,
    selected: Selection,
}

impl SelectionModel {
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Change the mode without re-validating the current selection.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
    }

    pub fn selected(&self) -> &Selection {
        &self.selected
    }

    /// Replace the selection if `candidate` is valid; otherwise keep it.
    pub fn try_replace(
        &mut self,
        candidate: Selection,
        entry_count: usize,
    ) -> Result<(), SelectionViolation> {
        validate_selection(self.mode, &candidate, entry_count)?;
        self.selected = candidate;
        Ok(())
    }

    pub fn toggle_candidate(&self, index: usize) -> ToggleOutcome {
        toggle_candidate(self.mode, &self.selected, index)
    }
}
