//! The externally supplied per-line render-unit factory.

/// Creates, updates, and disposes the per-line render units the collection
/// manages. The engine never looks inside a handle; it only stores it, hands
/// it back for re-render, and returns it on disposal.
pub trait RenderUnitFactory {
    type Handle;

    /// Materialize a render unit for `line` entering the visible range.
    fn create(&mut self, line: u32) -> Self::Handle;

    /// Re-render a unit with freshly composed content. `vertical_offset` is
    /// the unit's pixel offset from the viewport top. Returns true when the
    /// produced output actually changed.
    fn render(
        &mut self,
        handle: &mut Self::Handle,
        line: u32,
        vertical_offset: u32,
        content: &str,
    ) -> bool;

    /// Take back ownership of a unit leaving the visible range.
    fn dispose(&mut self, handle: Self::Handle);
}
