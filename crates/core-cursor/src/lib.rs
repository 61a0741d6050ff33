//! Cursor movement engine.
//!
//! Every operation here is a pure function of
//! `(config, line_source, old_state, intent) -> new_state`: the engine keeps
//! no state of its own, and `SingleCursorState` is replaced (never mutated)
//! on each move. That shape makes the movement rules directly testable and
//! lets a caller own as many cursors as it likes.
//!
//! Layers, bottom up:
//! * `visible`: column <-> visible-column conversion (tab expansion, with a
//!   surrogate pair occupying one visible column).
//! * `moves`: position-level primitives (`left`, `right`, `up`, `down`)
//!   that wrap at line boundaries and clamp at buffer extremes.
//! * `state`: selection-aware wrappers over a `SingleCursorState`,
//!   including the collapse-to-selection-edge rule, the Home toggle, and the
//!   translate operations used by move-lines commands.
//!
//! Invariants:
//! * No operation ever yields a column strictly between the two code units
//!   of a surrogate pair.
//! * Horizontal, home/end and absolute moves reset the leftover
//!   visible-column carry to 0; only vertical moves produce a nonzero carry.
//! * At buffer extremes `left`/`right` return the input position unchanged.

pub mod moves;
pub mod state;
pub mod visible;

pub use moves::CursorPosition;
pub use state::SingleCursorState;
