//! The rendered-line table and its reconciliation ops.
//!
//! State is a visible window `[start, end]` plus one entry per materialized
//! line, keyed by the line's *current* number. Reconciliation keeps the
//! overlap of consecutive windows untouched (same entry, same handle) and
//! pays only for lines entering or leaving; inserted/deleted lines shift the
//! surviving keys and defer entry creation to the next render pass.
//!
//! Invariants:
//! * Scrolling a window by `k` lines creates and destroys exactly `k`
//!   entries, independent of the window size.
//! * An entry whose composed content hashes equal to its cached hash never
//!   reaches the factory's render call.
//! * `on_flushed` is the only op that drops every cached hash and entry at
//!   once.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use ahash::AHasher;
use core_text::LineSource;
use tracing::trace;

use crate::factory::RenderUnitFactory;
use crate::overlay::OverlaySet;

/// Inclusive 1-based line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        let start = start.max(1);
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn contains(&self, line: u32) -> bool {
        line >= self.start && line <= self.end
    }

    /// Number of lines in the range (never zero: construction clamps).
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }
}

/// Geometry for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportData {
    pub line_height: u32,
    pub scroll_top: u32,
}

impl ViewportData {
    pub fn new(line_height: u32, scroll_top: u32) -> Self {
        Self {
            line_height: line_height.max(1),
            scroll_top,
        }
    }

    /// Pixel offset of `line` from the viewport top.
    pub fn vertical_offset(&self, line: u32) -> u32 {
        ((line - 1) * self.line_height).saturating_sub(self.scroll_top)
    }
}

/// Outcome of one render pass; the churn counters exist so tests can pin the
/// cost contract.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub rendered: u32,
    pub skipped: u32,
    pub created: u32,
    pub disposed: u32,
}

/// Content snapshot for the skip decision. Length is kept next to the hash
/// for cheap mismatch short-circuiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineHash {
    hash: u64,
    len: usize,
}

impl LineHash {
    fn compute(text: &str) -> Self {
        let mut hasher = AHasher::default();
        text.hash(&mut hasher);
        Self {
            hash: hasher.finish(),
            len: text.len(),
        }
    }
}

struct RenderedLineEntry<H> {
    handle: H,
    content_hash: Option<LineHash>,
}

pub struct RenderedLinesCollection<F: RenderUnitFactory> {
    factory: F,
    window: Option<LineRange>,
    entries: BTreeMap<u32, RenderedLineEntry<F::Handle>>,
}

impl<F: RenderUnitFactory> RenderedLinesCollection<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            window: None,
            entries: BTreeMap::new(),
        }
    }

    pub fn window(&self) -> Option<LineRange> {
        self.window
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Lines currently holding an entry, ascending (diagnostics and tests).
    pub fn entry_lines(&self) -> Vec<u32> {
        self.entries.keys().copied().collect()
    }

    pub fn handle_at(&self, line: u32) -> Option<&F::Handle> {
        self.entries.get(&line).map(|e| &e.handle)
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    /// Move the window. Entries leaving it are destroyed, entries for lines
    /// entering it are created; the overlap is retained untouched, so the
    /// cost is proportional to the shift, not the window size.
    pub fn on_scroll_changed(&mut self, new_range: LineRange) -> bool {
        if self.window == Some(new_range) {
            return false;
        }
        let exiting: Vec<u32> = self
            .entries
            .keys()
            .copied()
            .filter(|line| !new_range.contains(*line))
            .collect();
        for line in &exiting {
            if let Some(entry) = self.entries.remove(line) {
                self.factory.dispose(entry.handle);
            }
        }
        let mut entering = 0u32;
        for line in new_range.start..=new_range.end {
            if !self.entries.contains_key(&line) {
                let handle = self.factory.create(line);
                self.entries.insert(
                    line,
                    RenderedLineEntry {
                        handle,
                        content_hash: None,
                    },
                );
                entering += 1;
            }
        }
        trace!(
            target: "view.layer",
            start = new_range.start,
            end = new_range.end,
            entering,
            exiting = exiting.len(),
            "window moved"
        );
        self.window = Some(new_range);
        true
    }

    /// Lines `from..=to` were inserted: shift the keys of every entry at or
    /// after `from`. Entries for the new lines themselves are created lazily
    /// by the next render pass, so a burst of edits before a paint does no
    /// redundant work.
    pub fn on_lines_inserted(&mut self, from: u32, to: u32) -> bool {
        let delta = to - from + 1;
        let tail = self.entries.split_off(&from);
        for (line, entry) in tail {
            self.entries.insert(line + delta, entry);
        }
        self.window.is_some_and(|w| from <= w.end)
    }

    /// Lines `from..=to` were deleted: destroy their entries and shift the
    /// keys of everything after them down.
    pub fn on_lines_deleted(&mut self, from: u32, to: u32) -> bool {
        let delta = to - from + 1;
        let tail = self.entries.split_off(&from);
        for (line, entry) in tail {
            if line <= to {
                self.factory.dispose(entry.handle);
            } else {
                self.entries.insert(line - delta, entry);
            }
        }
        self.window.is_some_and(|w| from <= w.end)
    }

    /// Content of `from..=to` changed in place: drop the cached hashes so the
    /// next pass re-renders them. The key mapping is untouched.
    pub fn on_lines_changed(&mut self, from: u32, to: u32) -> bool {
        for (_, entry) in self.entries.range_mut(from..=to) {
            entry.content_hash = None;
        }
        self.window.is_some_and(|w| from <= w.end && to >= w.start)
    }

    /// Full document replace: destroy every entry. The only op allowed to
    /// drop the content-hash optimization wholesale.
    pub fn on_flushed(&mut self) {
        let count = self.entries.len();
        self.dispose_all();
        trace!(target: "view.layer", disposed = count, "flushed");
    }

    /// Drop every cached hash without touching entries (configuration
    /// changes can alter how identical content renders).
    pub fn invalidate_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.content_hash = None;
        }
    }

    /// Render the current window. Missing entries (fresh window or inserted
    /// lines) are created here; entries shifted out of the window are
    /// disposed here; unchanged lines are skipped by hash comparison.
    pub fn render_lines(
        &mut self,
        viewport: &ViewportData,
        source: &dyn LineSource,
        overlays: &OverlaySet,
    ) -> RenderStats {
        let mut stats = RenderStats::default();
        let Some(window) = self.window else {
            return stats;
        };

        let stale: Vec<u32> = self
            .entries
            .keys()
            .copied()
            .filter(|line| !window.contains(*line))
            .collect();
        for line in stale {
            if let Some(entry) = self.entries.remove(&line) {
                self.factory.dispose(entry.handle);
                stats.disposed += 1;
            }
        }

        for line in window.start..=window.end {
            if !self.entries.contains_key(&line) {
                let handle = self.factory.create(line);
                self.entries.insert(
                    line,
                    RenderedLineEntry {
                        handle,
                        content_hash: None,
                    },
                );
                stats.created += 1;
            }
            let entry = self
                .entries
                .get_mut(&line)
                .expect("entry just ensured for window line");

            let mut composed = source.line_content(line);
            if !overlays.is_empty() {
                composed.push_str(&overlays.compose(line));
            }
            let hash = LineHash::compute(&composed);
            if entry.content_hash == Some(hash) {
                stats.skipped += 1;
                continue;
            }
            self.factory
                .render(&mut entry.handle, line, viewport.vertical_offset(line), &composed);
            entry.content_hash = Some(hash);
            stats.rendered += 1;
        }
        trace!(
            target: "view.layer",
            rendered = stats.rendered,
            skipped = stats.skipped,
            created = stats.created,
            disposed = stats.disposed,
            "render pass"
        );
        stats
    }

    fn dispose_all(&mut self) {
        let entries = std::mem::take(&mut self.entries);
        for (_, entry) in entries {
            self.factory.dispose(entry.handle);
        }
    }
}

impl<F: RenderUnitFactory> Drop for RenderedLinesCollection<F> {
    fn drop(&mut self) {
        self.dispose_all();
    }
}
