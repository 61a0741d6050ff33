//! Selection-aware movement over a `SingleCursorState`.
//!
//! The state owns one directional selection plus the two visible-column
//! carries: one for the anchor (used by the translate operations so a
//! multi-line drag stays visually stable) and one for the active end (used by
//! plain vertical moves). Every operation returns a fresh state computed from
//! the old one.

use core_config::EditorConfig;
use core_text::{LineSource, Position, Selection, utf16};
use tracing::trace;

use crate::moves;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleCursorState {
    pub selection: Selection,
    /// Visible-column carry for the anchor end.
    pub selection_start_leftover: i64,
    /// Visible-column carry for the active end.
    pub leftover_visible_columns: i64,
}

impl SingleCursorState {
    pub fn new(
        selection: Selection,
        selection_start_leftover: i64,
        leftover_visible_columns: i64,
    ) -> Self {
        Self {
            selection,
            selection_start_leftover,
            leftover_visible_columns,
        }
    }

    /// A collapsed cursor at `position`, no carry.
    pub fn at(position: Position) -> Self {
        Self::new(Selection::collapsed(position), 0, 0)
    }

    pub fn position(&self) -> Position {
        self.selection.position
    }

    pub fn has_selection(&self) -> bool {
        self.selection.has_selection()
    }

    /// Produce the state after a move to `(line, column)`. Extending keeps
    /// the anchor and its carry; a plain move collapses both ends onto the
    /// target and both carries onto `leftover`.
    pub fn moved(&self, in_selection_mode: bool, line: u32, column: u32, leftover: i64) -> Self {
        let target = Position::new(line, column);
        trace!(
            target: "cursor.moves",
            from_line = self.selection.position.line,
            from_column = self.selection.position.column,
            to_line = line,
            to_column = column,
            extend = in_selection_mode,
            "cursor moved"
        );
        if in_selection_mode {
            Self::new(
                self.selection.with_position(target),
                self.selection_start_leftover,
                leftover,
            )
        } else {
            Self::new(Selection::collapsed(target), leftover, leftover)
        }
    }
}

/// Arrow-left. With a selection present and no extension requested the
/// cursor collapses to the selection's start instead of moving.
pub fn move_left(
    source: &dyn LineSource,
    state: &SingleCursorState,
    in_selection_mode: bool,
) -> SingleCursorState {
    if !in_selection_mode && state.has_selection() {
        let p = state.selection.start();
        return state.moved(false, p.line, p.column, 0);
    }
    let pos = state.position();
    let p = moves::left(source, pos.line, pos.column);
    state.moved(in_selection_mode, p.line, p.column, 0)
}

/// Arrow-right; collapses to the selection's end when not extending.
pub fn move_right(
    source: &dyn LineSource,
    state: &SingleCursorState,
    in_selection_mode: bool,
) -> SingleCursorState {
    if !in_selection_mode && state.has_selection() {
        let p = state.selection.end();
        return state.moved(false, p.line, p.column, 0);
    }
    let pos = state.position();
    let p = moves::right(source, pos.line, pos.column);
    state.moved(in_selection_mode, p.line, p.column, 0)
}

/// Arrow-up, `count` lines. A plain move with a selection present starts
/// from the selection's start edge.
pub fn move_up(
    config: &EditorConfig,
    source: &dyn LineSource,
    state: &SingleCursorState,
    in_selection_mode: bool,
    count: u32,
) -> SingleCursorState {
    let from = if !in_selection_mode && state.has_selection() {
        state.selection.start()
    } else {
        state.position()
    };
    let r = moves::up(
        config,
        source,
        from.line,
        from.column,
        state.leftover_visible_columns,
        count,
        true,
    );
    state.moved(in_selection_mode, r.line, r.column, r.leftover_visible_columns)
}

/// Arrow-down, `count` lines; starts from the selection's end edge when a
/// selection is present and not extending.
pub fn move_down(
    config: &EditorConfig,
    source: &dyn LineSource,
    state: &SingleCursorState,
    in_selection_mode: bool,
    count: u32,
) -> SingleCursorState {
    let from = if !in_selection_mode && state.has_selection() {
        state.selection.end()
    } else {
        state.position()
    };
    let r = moves::down(
        config,
        source,
        from.line,
        from.column,
        state.leftover_visible_columns,
        count,
        true,
    );
    state.moved(in_selection_mode, r.line, r.column, r.leftover_visible_columns)
}

/// Absolute move to a (clamped) position.
pub fn move_to(
    source: &dyn LineSource,
    state: &SingleCursorState,
    in_selection_mode: bool,
    target: Position,
) -> SingleCursorState {
    let p = source.validate_position(target);
    state.moved(in_selection_mode, p.line, p.column, 0)
}

/// Home. Toggles between the first non-whitespace column and the line's min
/// column: pressing it at the indent goes to column 1, anywhere else goes to
/// the indent.
pub fn move_to_beginning_of_line(
    source: &dyn LineSource,
    state: &SingleCursorState,
    in_selection_mode: bool,
) -> SingleCursorState {
    let line = state.position().line;
    let min_column = source.line_min_column(line);
    let indent_column =
        utf16::first_non_whitespace_column(&source.line_content(line)).unwrap_or(min_column);
    let column = if state.position().column == indent_column {
        min_column
    } else {
        indent_column
    };
    state.moved(in_selection_mode, line, column, 0)
}

/// End. Pins to the line's max column; repeated invocation holds there.
pub fn move_to_end_of_line(
    source: &dyn LineSource,
    state: &SingleCursorState,
    in_selection_mode: bool,
) -> SingleCursorState {
    let line = state.position().line;
    state.moved(in_selection_mode, line, source.line_max_column(line), 0)
}

/// Jump to the first position of the buffer.
pub fn move_to_buffer_start(
    source: &dyn LineSource,
    state: &SingleCursorState,
    in_selection_mode: bool,
) -> SingleCursorState {
    state.moved(in_selection_mode, 1, source.line_min_column(1), 0)
}

/// Jump past the last code unit of the buffer.
pub fn move_to_buffer_end(
    source: &dyn LineSource,
    state: &SingleCursorState,
    in_selection_mode: bool,
) -> SingleCursorState {
    let last = source.line_count();
    state.moved(in_selection_mode, last, source.line_max_column(last), 0)
}

/// Move both selection ends up one line without collapsing. The anchor uses
/// the selection-start carry, the active end the cursor carry; columns are
/// recomputed independently per end.
pub fn translate_up(
    config: &EditorConfig,
    source: &dyn LineSource,
    state: &SingleCursorState,
) -> SingleCursorState {
    let sel = state.selection;
    let anchor = moves::up(
        config,
        source,
        sel.selection_start.line,
        sel.selection_start.column,
        state.selection_start_leftover,
        1,
        false,
    );
    let active = moves::up(
        config,
        source,
        sel.position.line,
        sel.position.column,
        state.leftover_visible_columns,
        1,
        false,
    );
    SingleCursorState::new(
        Selection::new(anchor.position(), active.position()),
        anchor.leftover_visible_columns,
        active.leftover_visible_columns,
    )
}

/// Mirror of `translate_up`, one line down.
pub fn translate_down(
    config: &EditorConfig,
    source: &dyn LineSource,
    state: &SingleCursorState,
) -> SingleCursorState {
    let sel = state.selection;
    let anchor = moves::down(
        config,
        source,
        sel.selection_start.line,
        sel.selection_start.column,
        state.selection_start_leftover,
        1,
        false,
    );
    let active = moves::down(
        config,
        source,
        sel.position.line,
        sel.position.column,
        state.leftover_visible_columns,
        1,
        false,
    );
    SingleCursorState::new(
        Selection::new(anchor.position(), active.position()),
        anchor.leftover_visible_columns,
        active.leftover_visible_columns,
    )
}
