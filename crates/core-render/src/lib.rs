//! Viewport virtualization: keep render units alive only for the visible
//! line range and reconcile that range incrementally.
//!
//! The cost contract is the point of this crate: a scroll costs work
//! proportional to the number of lines entering and leaving the window,
//! never to the window size, and a content-unchanged line never reaches the
//! output sink. Rebuilding everything on every scroll would be functionally
//! identical and is exactly the regression the churn tests exist to catch.
//!
//! Components:
//! * `view_layer`: the `RenderedLinesCollection` (window plus entry table
//!   keyed by current line number), reconciliation ops, and the hash-gated
//!   render pass.
//! * `factory`: the externally supplied per-line render-unit factory.
//! * `overlay`: ordered dynamic overlays contributing position-derived
//!   fragments per line; recomputed every pass, hash-compared before commit.
//! * `bridge`: `ViewLayer`, routing batched view events into the
//!   reconciliation ops.
//!
//! Ownership: the collection exclusively owns its entries. Render units are
//! handed over by the factory at creation and handed back for disposal; no
//! other component reads or writes the table.

pub mod bridge;
pub mod factory;
pub mod overlay;
pub mod view_layer;

pub use bridge::ViewLayer;
pub use factory::RenderUnitFactory;
pub use overlay::{DynamicOverlay, OverlaySet};
pub use view_layer::{LineRange, RenderStats, RenderedLinesCollection, ViewportData};
