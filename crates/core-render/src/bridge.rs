//! Routing batched view events into the reconciliation ops.
//!
//! `ViewLayer` owns the collection exclusively; nothing else reads or writes
//! the entry table. It consumes whole event batches (the unit the emitter
//! delivers) and accumulates a `needs_render` flag the embedder checks at its
//! paint boundary.

use std::cell::RefCell;
use std::rc::Rc;

use core_events::{ListenerHandle, ViewEvent, ViewEventEmitter};
use core_text::LineSource;

use crate::factory::RenderUnitFactory;
use crate::overlay::OverlaySet;
use crate::view_layer::{LineRange, RenderStats, RenderedLinesCollection, ViewportData};

pub struct ViewLayer<F: RenderUnitFactory> {
    collection: RenderedLinesCollection<F>,
    needs_render: bool,
}

impl<F: RenderUnitFactory> ViewLayer<F> {
    pub fn new(factory: F) -> Self {
        Self {
            collection: RenderedLinesCollection::new(factory),
            needs_render: false,
        }
    }

    pub fn collection(&self) -> &RenderedLinesCollection<F> {
        &self.collection
    }

    pub fn collection_mut(&mut self) -> &mut RenderedLinesCollection<F> {
        &mut self.collection
    }

    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Apply one delivered batch, in order.
    pub fn handle_events(&mut self, events: &[ViewEvent]) {
        for event in events {
            let needed = match event {
                ViewEvent::ConfigurationChanged => {
                    self.collection.invalidate_all();
                    true
                }
                // Position-derived overlays change with the cursor and with
                // focus; content hashes decide per line whether output moves.
                ViewEvent::CursorStateChanged { .. } | ViewEvent::FocusChanged { .. } => true,
                ViewEvent::LinesChanged { from_line, count } => self
                    .collection
                    .on_lines_changed(*from_line, from_line + count.saturating_sub(1)),
                ViewEvent::LinesInserted { from_line, to_line } => {
                    self.collection.on_lines_inserted(*from_line, *to_line)
                }
                ViewEvent::LinesDeleted { from_line, to_line } => {
                    self.collection.on_lines_deleted(*from_line, *to_line)
                }
                ViewEvent::ScrollChanged {
                    first_line,
                    last_line,
                    ..
                } => self
                    .collection
                    .on_scroll_changed(LineRange::new(*first_line, *last_line)),
                ViewEvent::TokensChanged { from_line, to_line } => {
                    self.collection.on_lines_changed(*from_line, *to_line)
                }
                ViewEvent::Flushed => {
                    self.collection.on_flushed();
                    true
                }
                ViewEvent::ZonesChanged => true,
            };
            self.needs_render |= needed;
        }
    }

    /// Run the render pass and clear the pending flag.
    pub fn render(
        &mut self,
        viewport: &ViewportData,
        source: &dyn LineSource,
        overlays: &OverlaySet,
    ) -> RenderStats {
        self.needs_render = false;
        self.collection.render_lines(viewport, source, overlays)
    }
}

/// Subscribe a shared `ViewLayer` to an emitter. The returned handle is the
/// subscription's lifetime.
pub fn attach<F: RenderUnitFactory + 'static>(
    emitter: &ViewEventEmitter,
    layer: Rc<RefCell<ViewLayer<F>>>,
) -> ListenerHandle {
    emitter.subscribe(move |events| layer.borrow_mut().handle_events(events))
}
