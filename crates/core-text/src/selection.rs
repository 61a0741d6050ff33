//! Directional selections.
//!
//! A selection is an anchor ("selection start") plus an active end ("position").
//! Which end the user is dragging is implied by which end moved last, so the
//! stored fields are never reordered; `start()`/`end()` derive the normalized
//! view on demand.

use crate::position::{Position, TextRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionDirection {
    /// Active end at or after the anchor.
    Ltr,
    /// Active end before the anchor.
    Rtl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// The fixed end, set when the selection gesture began.
    pub selection_start: Position,
    /// The moving end; where the caret is painted.
    pub position: Position,
}

impl Selection {
    pub fn new(selection_start: Position, position: Position) -> Self {
        Self {
            selection_start,
            position,
        }
    }

    /// An empty selection with both ends at `position`.
    pub fn collapsed(position: Position) -> Self {
        Self {
            selection_start: position,
            position,
        }
    }

    /// Normalized smaller end.
    pub fn start(&self) -> Position {
        self.selection_start.min(self.position)
    }

    /// Normalized larger end.
    pub fn end(&self) -> Position {
        self.selection_start.max(self.position)
    }

    pub fn direction(&self) -> SelectionDirection {
        if self.position.is_before(self.selection_start) {
            SelectionDirection::Rtl
        } else {
            SelectionDirection::Ltr
        }
    }

    /// True when the two ends differ.
    pub fn has_selection(&self) -> bool {
        self.selection_start != self.position
    }

    /// Move the active end, keeping the anchor.
    pub fn with_position(self, position: Position) -> Self {
        Self {
            position,
            ..self
        }
    }

    /// Collapse both ends onto `position`.
    pub fn collapse_to(self, position: Position) -> Self {
        Self::collapsed(position)
    }

    pub fn as_range(&self) -> TextRange {
        TextRange::new(self.selection_start, self.position)
    }
}
