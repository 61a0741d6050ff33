//! Navigation commands emitted toward the command sink.

use std::fmt;

use core_text::Position;

/// Attribution tag carried with every command so downstream consumers can
/// distinguish pointer gestures from programmatic calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSource {
    Pointer,
    Api,
}

impl fmt::Display for CommandSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandSource::Pointer => write!(f, "mouse"),
            CommandSource::Api => write!(f, "api"),
        }
    }
}

/// The closed command set the dispatch table can produce. `…Drag` variants
/// continue a gesture that started earlier; `LastCursor…` variants address
/// the most recently spawned cursor instead of the primary one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationCommand {
    MoveTo(Position),
    MoveToSelect(Position),
    ColumnSelect(Position),
    CreateCursor { position: Position, whole_line: bool },
    WordSelect(Position),
    WordSelectDrag(Position),
    LastCursorWordSelect(Position),
    LineSelect(Position),
    LineSelectDrag(Position),
    LastCursorLineSelect(Position),
    LastCursorLineSelectDrag(Position),
    LastCursorMoveToSelect(Position),
    SelectAll,
}

/// Downstream executor for navigation commands (the cursor collection of an
/// embedding editor). Out of scope here; consumed as an interface.
pub trait CommandSink {
    fn execute(&mut self, source: CommandSource, command: NavigationCommand);
}

/// Recording sink for tests and diagnostics.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub executed: Vec<(CommandSource, NavigationCommand)>,
}

impl CommandSink for RecordingSink {
    fn execute(&mut self, source: CommandSource, command: NavigationCommand) {
        self.executed.push((source, command));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_tags_render_for_attribution() {
        assert_eq!(CommandSource::Pointer.to_string(), "mouse");
        assert_eq!(CommandSource::Api.to_string(), "api");
    }

    #[test]
    fn recording_sink_keeps_order() {
        let mut sink = RecordingSink::default();
        sink.execute(CommandSource::Api, NavigationCommand::SelectAll);
        sink.execute(
            CommandSource::Pointer,
            NavigationCommand::MoveTo(Position::new(1, 1)),
        );
        assert_eq!(sink.executed.len(), 2);
        assert_eq!(sink.executed[0].1, NavigationCommand::SelectAll);
    }
}
