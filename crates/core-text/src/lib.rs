//! Positions, selections, and the read-only line provider.
//!
//! This crate is the leaf of the workspace: value types for buffer locations
//! plus the `LineSource` trait every higher layer navigates through. Columns
//! are expressed as 1-based offsets into the UTF-16 code-unit sequence of a
//! line, which is the unit the traversal rules (surrogate-pair atomicity,
//! tab expansion) are defined over.
//!
//! Invariants:
//! * Any `Position` produced by `LineSource::validate_position` has its line
//!   in `[1, line_count]` and its column in `[line_min_column, line_max_column]`,
//!   and never points between the two halves of a surrogate pair.
//! * `Selection` stores the anchor and the active end as given; ordering is
//!   derived on access, never baked into the stored fields.
//! * `Buffer::line` strips the trailing newline; the newline is not
//!   addressable by any column.

use anyhow::Result;
use ropey::Rope;

mod position;
mod selection;
pub mod utf16;

pub use position::{Position, TextRange};
pub use selection::{Selection, SelectionDirection};

/// Read-only view of a line-oriented document.
///
/// Implemented by the owning text store (a `Buffer` here, an external model in
/// an embedding application). Lines are 1-based. Implementations must tolerate
/// out-of-range lines by returning empty content rather than panicking; all
/// range errors in this engine clamp.
pub trait LineSource {
    /// Total number of lines, always >= 1 (an empty document has one empty line).
    fn line_count(&self) -> u32;

    /// Content of `line` without any trailing newline. Empty for out-of-range lines.
    fn line_content(&self, line: u32) -> String;

    /// Smallest valid column on `line`.
    fn line_min_column(&self, _line: u32) -> u32 {
        1
    }

    /// One past the last code unit of `line`.
    fn line_max_column(&self, line: u32) -> u32 {
        utf16::unit_len(&self.line_content(line)) as u32 + 1
    }

    /// Clamp a position into the document and nudge it off a surrogate-pair
    /// interior. This is the single normalization point: every operation that
    /// accepts caller-supplied positions funnels through it.
    fn validate_position(&self, position: Position) -> Position {
        let line_count = self.line_count().max(1);
        let line = position.line.clamp(1, line_count);
        let min = self.line_min_column(line);
        let max = self.line_max_column(line);
        let mut column = position.column.clamp(min, max);
        if column > min {
            let units: Vec<u16> = self.line_content(line).encode_utf16().collect();
            let idx = (column - 1) as usize;
            if idx < units.len()
                && idx >= 1
                && utf16::is_high_surrogate(units[idx - 1])
                && utf16::is_low_surrogate(units[idx])
            {
                column -= 1;
            }
        }
        Position::new(line, column)
    }
}

/// A rope-backed document store implementing `LineSource`.
///
/// Higher layers only ever see the trait; the concrete buffer exists so the
/// workspace (and its tests) have a real document to navigate without an
/// embedding application.
#[derive(Clone)]
pub struct Buffer {
    rope: Rope,
    pub name: String,
}

impl Buffer {
    /// Construct a buffer from an in-memory string slice.
    pub fn from_str(name: impl Into<String>, content: &str) -> Result<Self> {
        Ok(Self {
            rope: Rope::from_str(content),
            name: name.into(),
        })
    }

    /// Return the 1-based line as an owned `String` without its newline.
    pub fn line(&self, line: u32) -> Option<String> {
        if line == 0 || line as usize > self.rope.len_lines() {
            return None;
        }
        let mut s = self.rope.line(line as usize - 1).to_string();
        if s.ends_with('\n') {
            s.pop();
            if s.ends_with('\r') {
                s.pop();
            }
        }
        Some(s)
    }
}

impl LineSource for Buffer {
    fn line_count(&self) -> u32 {
        self.rope.len_lines() as u32
    }

    fn line_content(&self, line: u32) -> String {
        self.line(line).unwrap_or_default()
    }
}
