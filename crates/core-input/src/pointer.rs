//! Pointer dispatch decision table.
//!
//! Precedence, evaluated top to bottom for a pointer-down (or down-and-drag)
//! event:
//! 1. middle button: column select while dragging, plain move otherwise;
//! 2. line-number gutter: whole-line semantics, cursor-spawning with the
//!    multi-cursor modifier;
//! 3. click count >= 4: select all;
//! 4. triple click: line select;
//! 5. double click: word select;
//! 6. single click: plain move, or the multi-cursor gestures when the
//!    configured modifier is held *alone* (any other non-shift modifier
//!    suppresses them and the event is ignored for navigation).
//!
//! The multi-cursor modifier is whichever of Alt/Ctrl/Meta the configuration
//! names; nothing below hard-codes a key.

use bitflags::bitflags;
use core_config::{EditorConfig, MultiCursorModifier};
use core_text::Position;
use tracing::trace;

use crate::commands::{CommandSink, CommandSource, NavigationCommand};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const CTRL  = 0b0000_0010;
        const ALT   = 0b0000_0100;
        const META  = 0b0000_1000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// Where the pointer landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    TextArea,
    LineNumberGutter,
}

/// Everything the table needs, supplied per event by the caller. The
/// `in_selection_mode` flag is true while a selection gesture extends:
/// dragging with the button held, or clicking with Shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerDispatchData {
    pub position: Position,
    pub region: HitRegion,
    pub button: PointerButton,
    pub click_count: u32,
    pub modifiers: Modifiers,
    pub in_selection_mode: bool,
}

/// Stateless apart from the in-flight drag flag; see module docs.
#[derive(Debug, Default)]
pub struct ViewController {
    drag_active: bool,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a pointer gesture is in flight.
    pub fn drag_active(&self) -> bool {
        self.drag_active
    }

    /// Abandon any in-flight gesture. Idempotent; callers invoke it on
    /// pointer leave, focus loss, or document replacement.
    pub fn reset_drag_state(&mut self) {
        self.drag_active = false;
    }

    /// Run the decision table and hand the resulting command to `sink`.
    /// Suppressed events (rule 6) produce nothing.
    pub fn dispatch_pointer(
        &mut self,
        config: &EditorConfig,
        data: &PointerDispatchData,
        sink: &mut dyn CommandSink,
    ) {
        match decide(config, data) {
            Some(command) => {
                trace!(
                    target: "input.dispatch",
                    ?command,
                    click_count = data.click_count,
                    region = ?data.region,
                    "pointer dispatched"
                );
                self.drag_active = true;
                sink.execute(CommandSource::Pointer, command);
            }
            None => {
                trace!(
                    target: "input.dispatch",
                    modifiers = ?data.modifiers,
                    "pointer ignored (conflicting modifiers)"
                );
            }
        }
    }
}

fn has_multi_cursor_modifier(config: &EditorConfig, modifiers: Modifiers) -> bool {
    match config.multi_cursor_modifier {
        MultiCursorModifier::Alt => modifiers.contains(Modifiers::ALT),
        MultiCursorModifier::Ctrl => modifiers.contains(Modifiers::CTRL),
        MultiCursorModifier::Meta => modifiers.contains(Modifiers::META),
    }
}

/// True when one of the two *non-configured* members of {Ctrl, Alt, Meta} is
/// held. Shift never suppresses; it combines with the multi-cursor modifier
/// into column select.
fn has_other_modifier(config: &EditorConfig, modifiers: Modifiers) -> bool {
    let others = match config.multi_cursor_modifier {
        MultiCursorModifier::Alt => Modifiers::CTRL | Modifiers::META,
        MultiCursorModifier::Ctrl => Modifiers::ALT | Modifiers::META,
        MultiCursorModifier::Meta => Modifiers::CTRL | Modifiers::ALT,
    };
    modifiers.intersects(others)
}

fn decide(config: &EditorConfig, data: &PointerDispatchData) -> Option<NavigationCommand> {
    use NavigationCommand::*;
    let pos = data.position;
    let multi = has_multi_cursor_modifier(config, data.modifiers);
    let extend = data.in_selection_mode;

    if data.button == PointerButton::Middle {
        return Some(if extend { ColumnSelect(pos) } else { MoveTo(pos) });
    }

    if data.region == HitRegion::LineNumberGutter {
        if multi {
            return Some(if extend {
                LastCursorLineSelectDrag(pos)
            } else {
                CreateCursor {
                    position: pos,
                    whole_line: true,
                }
            });
        }
        return Some(if extend { LineSelectDrag(pos) } else { LineSelect(pos) });
    }

    if data.click_count >= 4 {
        return Some(SelectAll);
    }

    if data.click_count == 3 {
        if multi {
            return Some(if extend {
                LastCursorLineSelectDrag(pos)
            } else {
                LastCursorLineSelect(pos)
            });
        }
        return Some(if extend { LineSelectDrag(pos) } else { LineSelect(pos) });
    }

    if data.click_count == 2 {
        if multi {
            return Some(LastCursorWordSelect(pos));
        }
        return Some(if extend { WordSelectDrag(pos) } else { WordSelect(pos) });
    }

    if multi {
        if has_other_modifier(config, data.modifiers) {
            // Conflicting chord: not a navigation gesture at all.
            return None;
        }
        if data.modifiers.contains(Modifiers::SHIFT) {
            return Some(ColumnSelect(pos));
        }
        return Some(if extend {
            LastCursorMoveToSelect(pos)
        } else {
            CreateCursor {
                position: pos,
                whole_line: false,
            }
        });
    }

    Some(if extend { MoveToSelect(pos) } else { MoveTo(pos) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::RecordingSink;

    fn data(click_count: u32, modifiers: Modifiers) -> PointerDispatchData {
        PointerDispatchData {
            position: Position::new(3, 7),
            region: HitRegion::TextArea,
            button: PointerButton::Left,
            click_count,
            modifiers,
            in_selection_mode: false,
        }
    }

    fn cfg(modifier: MultiCursorModifier) -> EditorConfig {
        EditorConfig {
            multi_cursor_modifier: modifier,
            ..EditorConfig::default()
        }
    }

    #[test]
    fn drag_flag_set_on_dispatch_and_reset_idempotently() {
        let mut controller = ViewController::new();
        let mut sink = RecordingSink::default();
        assert!(!controller.drag_active());
        controller.dispatch_pointer(&cfg(MultiCursorModifier::Alt), &data(1, Modifiers::empty()), &mut sink);
        assert!(controller.drag_active());
        controller.reset_drag_state();
        controller.reset_drag_state();
        assert!(!controller.drag_active());
    }

    #[test]
    fn suppressed_event_does_not_start_a_drag() {
        let mut controller = ViewController::new();
        let mut sink = RecordingSink::default();
        controller.dispatch_pointer(
            &cfg(MultiCursorModifier::Alt),
            &data(1, Modifiers::ALT | Modifiers::CTRL),
            &mut sink,
        );
        assert!(sink.executed.is_empty());
        assert!(!controller.drag_active());
    }

    #[test]
    fn shift_with_multi_cursor_modifier_is_column_select() {
        let mut controller = ViewController::new();
        let mut sink = RecordingSink::default();
        controller.dispatch_pointer(
            &cfg(MultiCursorModifier::Meta),
            &data(1, Modifiers::META | Modifiers::SHIFT),
            &mut sink,
        );
        assert_eq!(
            sink.executed[0].1,
            NavigationCommand::ColumnSelect(Position::new(3, 7))
        );
    }
}
