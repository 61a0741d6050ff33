//! Keyboard navigation resolved through the cursor movement engine.
//!
//! Keybinding-to-command resolution lives outside this engine; what arrives
//! here is already a navigation intent. Dispatch is pure: it computes the new
//! cursor state and returns it, leaving application to the caller (whose
//! state mutation then drives the view-event batch).

use core_config::EditorConfig;
use core_cursor::{SingleCursorState, state};
use core_text::LineSource;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKey {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    DocumentStart,
    DocumentEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDispatchData {
    pub key: NavigationKey,
    /// Shift held: extend the selection instead of moving it.
    pub select: bool,
    /// Lines per page for PageUp/PageDown, from the embedder's geometry.
    pub page_size: u32,
}

/// Resolve one key intent into the successor cursor state.
pub fn dispatch_key(
    config: &EditorConfig,
    source: &dyn LineSource,
    cursor: &SingleCursorState,
    data: KeyDispatchData,
) -> SingleCursorState {
    let page = data.page_size.max(1);
    let next = match data.key {
        NavigationKey::Left => state::move_left(source, cursor, data.select),
        NavigationKey::Right => state::move_right(source, cursor, data.select),
        NavigationKey::Up => state::move_up(config, source, cursor, data.select, 1),
        NavigationKey::Down => state::move_down(config, source, cursor, data.select, 1),
        NavigationKey::Home => state::move_to_beginning_of_line(source, cursor, data.select),
        NavigationKey::End => state::move_to_end_of_line(source, cursor, data.select),
        NavigationKey::PageUp => state::move_up(config, source, cursor, data.select, page),
        NavigationKey::PageDown => state::move_down(config, source, cursor, data.select, page),
        NavigationKey::DocumentStart => state::move_to_buffer_start(source, cursor, data.select),
        NavigationKey::DocumentEnd => state::move_to_buffer_end(source, cursor, data.select),
    };
    trace!(
        target: "input.dispatch",
        key = ?data.key,
        select = data.select,
        line = next.position().line,
        column = next.position().column,
        "key dispatched"
    );
    next
}
