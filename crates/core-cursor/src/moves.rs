//! Position-level movement primitives.
//!
//! These operate on bare `(line, column)` pairs against a `LineSource` and
//! know nothing about selections; the selection-aware layer sits in `state`.
//! All range errors clamp; there is no error path anywhere in this module.

use core_config::EditorConfig;
use core_text::{LineSource, Position, utf16};

use crate::visible::{column_from_visible_column, visible_column_from_column};

/// Result of a vertical move: the landing position plus the visible-column
/// carry to thread into the next vertical move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    pub line: u32,
    pub column: u32,
    pub leftover_visible_columns: i64,
}

impl CursorPosition {
    pub fn new(line: u32, column: u32, leftover_visible_columns: i64) -> Self {
        Self {
            line,
            column,
            leftover_visible_columns,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// One unit left. Skips a surrogate pair atomically, wraps to the end of the
/// previous line, and is a no-op at the very start of the buffer.
pub fn left(source: &dyn LineSource, line: u32, column: u32) -> Position {
    if column > source.line_min_column(line) {
        let units = utf16::encode(&source.line_content(line));
        let idx = (column - 2) as usize;
        let step = if idx >= 1
            && idx < units.len()
            && utf16::is_low_surrogate(units[idx])
            && utf16::is_high_surrogate(units[idx - 1])
        {
            2
        } else {
            1
        };
        Position::new(line, column - step)
    } else if line > 1 {
        Position::new(line - 1, source.line_max_column(line - 1))
    } else {
        Position::new(line, column)
    }
}

/// One unit right. Skips a surrogate pair atomically, wraps to the start of
/// the next line, and is a no-op at the very end of the buffer.
pub fn right(source: &dyn LineSource, line: u32, column: u32) -> Position {
    if column < source.line_max_column(line) {
        let units = utf16::encode(&source.line_content(line));
        let idx = (column - 1) as usize;
        let step = if idx + 1 < units.len()
            && utf16::is_high_surrogate(units[idx])
            && utf16::is_low_surrogate(units[idx + 1])
        {
            2
        } else {
            1
        };
        Position::new(line, column + step)
    } else if line < source.line_count() {
        Position::new(line + 1, source.line_min_column(line + 1))
    } else {
        Position::new(line, column)
    }
}

/// Move `count` lines up, preserving the intended visible column through the
/// leftover carry. On the first line, `allow_move_on_edge_line` snaps to the
/// min column; otherwise the column clamps without passing the line end.
pub fn up(
    config: &EditorConfig,
    source: &dyn LineSource,
    line: u32,
    column: u32,
    leftover_visible_columns: i64,
    count: u32,
    allow_move_on_edge_line: bool,
) -> CursorPosition {
    let current_visible =
        visible_column_from_column(&source.line_content(line), column, config.tab_size) as i64
            + leftover_visible_columns;

    let new_line;
    let new_column;
    if line <= count {
        new_line = 1;
        if allow_move_on_edge_line {
            new_column = source.line_min_column(new_line);
        } else {
            new_column = clamp_column(source, new_line, column);
        }
    } else {
        new_line = line - count;
        new_column = column_for_visible_target(config, source, new_line, current_visible);
    }

    let leftover = current_visible
        - visible_column_from_column(&source.line_content(new_line), new_column, config.tab_size)
            as i64;
    CursorPosition::new(new_line, new_column, leftover)
}

/// Move `count` lines down; mirror of `up` with the last line as the edge
/// (snap target is the max column).
pub fn down(
    config: &EditorConfig,
    source: &dyn LineSource,
    line: u32,
    column: u32,
    leftover_visible_columns: i64,
    count: u32,
    allow_move_on_edge_line: bool,
) -> CursorPosition {
    let current_visible =
        visible_column_from_column(&source.line_content(line), column, config.tab_size) as i64
            + leftover_visible_columns;

    let line_count = source.line_count();
    let new_line;
    let new_column;
    if line.saturating_add(count) > line_count {
        new_line = line_count;
        if allow_move_on_edge_line {
            new_column = source.line_max_column(new_line);
        } else {
            new_column = clamp_column(source, new_line, column);
        }
    } else {
        new_line = line + count;
        new_column = column_for_visible_target(config, source, new_line, current_visible);
    }

    let leftover = current_visible
        - visible_column_from_column(&source.line_content(new_line), new_column, config.tab_size)
            as i64;
    CursorPosition::new(new_line, new_column, leftover)
}

/// Resolve a visible-column target on `line`, clamped into the line's valid
/// column range.
fn column_for_visible_target(
    config: &EditorConfig,
    source: &dyn LineSource,
    line: u32,
    visible_target: i64,
) -> u32 {
    let target = visible_target.max(0) as u32;
    let column = column_from_visible_column(&source.line_content(line), target, config.tab_size);
    column.clamp(source.line_min_column(line), source.line_max_column(line))
}

/// Clamp `column` into `line`'s range and nudge off a surrogate interior.
fn clamp_column(source: &dyn LineSource, line: u32, column: u32) -> u32 {
    source
        .validate_position(Position::new(line, column))
        .column
}
