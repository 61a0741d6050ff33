//! Dynamic per-line overlays.
//!
//! Overlays contribute position-derived fragments (selection highlight,
//! current-line marker, and the like) appended to a line's content before
//! hashing. They are recomputed on every render pass; only the hash
//! comparison decides whether the composed result reaches the factory. The
//! set is a fixed ordered list, and iteration order is the overlay order,
//! preserved exactly.

use std::cell::RefCell;
use std::rc::Rc;

use core_text::Selection;

pub trait DynamicOverlay {
    /// Cheap gate checked once per pass; a false skips `render` entirely.
    fn should_render(&self) -> bool;

    /// Fragment contributed for `line`; empty when the overlay has nothing
    /// to add there.
    fn render(&self, line: u32) -> String;
}

/// Ordered list of overlays, fixed after construction apart from `push`.
#[derive(Default)]
pub struct OverlaySet {
    overlays: Vec<Box<dyn DynamicOverlay>>,
}

impl OverlaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, overlay: impl DynamicOverlay + 'static) {
        self.overlays.push(Box::new(overlay));
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Concatenated fragments for `line`, in overlay order.
    pub fn compose(&self, line: u32) -> String {
        let mut out = String::new();
        for overlay in &self.overlays {
            if overlay.should_render() {
                out.push_str(&overlay.render(line));
            }
        }
        out
    }
}

/// Highlights the line span of every current selection. State is shared with
/// the owner through the cell so the overlay list itself never changes.
pub struct SelectionHighlightOverlay {
    selections: Rc<RefCell<Vec<Selection>>>,
}

impl SelectionHighlightOverlay {
    pub fn new(selections: Rc<RefCell<Vec<Selection>>>) -> Self {
        Self { selections }
    }
}

impl DynamicOverlay for SelectionHighlightOverlay {
    fn should_render(&self) -> bool {
        self.selections.borrow().iter().any(|s| s.has_selection())
    }

    fn render(&self, line: u32) -> String {
        let mut out = String::new();
        for sel in self.selections.borrow().iter() {
            if !sel.has_selection() {
                continue;
            }
            let (start, end) = (sel.start(), sel.end());
            if line < start.line || line > end.line {
                continue;
            }
            let from = if line == start.line { start.column } else { 1 };
            let to = if line == end.line {
                end.column
            } else {
                u32::MAX
            };
            out.push_str(&format!("\u{1}sel:{from}-{to}"));
        }
        out
    }
}

/// Marks the line the primary cursor is on.
pub struct CursorLineOverlay {
    cursor_line: Rc<RefCell<u32>>,
}

impl CursorLineOverlay {
    pub fn new(cursor_line: Rc<RefCell<u32>>) -> Self {
        Self { cursor_line }
    }
}

impl DynamicOverlay for CursorLineOverlay {
    fn should_render(&self) -> bool {
        true
    }

    fn render(&self, line: u32) -> String {
        if *self.cursor_line.borrow() == line {
            "\u{1}cursor-line".to_string()
        } else {
            String::new()
        }
    }
}
