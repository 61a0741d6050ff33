//! Input dispatch: raw pointer and keyboard events resolved into navigation
//! commands and cursor movements.
//!
//! The controller is a decision table, not a state machine: every fact it
//! needs (click count, modifier mask, hit region, drag flag) arrives with the
//! event. The only retained bit is whether a drag gesture is in flight, and
//! that is cleared by an explicit, idempotent `reset_drag_state`; pointer
//! leaving the editor, focus loss, and document replacement all funnel there.
//!
//! Pointer events become tagged commands handed to a `CommandSink`; keyboard
//! events resolve through the cursor movement engine into a new cursor state
//! returned to the caller. Neither path keeps cursor state here.

pub mod commands;
pub mod keyboard;
pub mod pointer;

pub use commands::{CommandSink, CommandSource, NavigationCommand};
pub use keyboard::{KeyDispatchData, NavigationKey};
pub use pointer::{HitRegion, Modifiers, PointerButton, PointerDispatchData, ViewController};
