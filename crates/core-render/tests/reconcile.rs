//! Reconciliation scenarios: the churn contract, key shifting under edits,
//! flush semantics, and the content-hash render skip.

use std::cell::RefCell;
use std::rc::Rc;

use core_render::{
    LineRange, OverlaySet, RenderUnitFactory, RenderedLinesCollection, ViewportData,
};
use core_render::overlay::CursorLineOverlay;
use core_text::Buffer;

/// Factory tracking every lifecycle call; handles are unique ids so identity
/// can be asserted across reconciliations.
#[derive(Default)]
struct CountingFactory {
    next_id: u64,
    created: Vec<u64>,
    disposed: Vec<u64>,
    render_calls: Vec<(u64, u32, String)>,
}

impl RenderUnitFactory for CountingFactory {
    type Handle = u64;

    fn create(&mut self, _line: u32) -> u64 {
        self.next_id += 1;
        self.created.push(self.next_id);
        self.next_id
    }

    fn render(&mut self, handle: &mut u64, line: u32, _vertical_offset: u32, content: &str) -> bool {
        self.render_calls.push((*handle, line, content.to_string()));
        true
    }

    fn dispose(&mut self, handle: u64) {
        self.disposed.push(handle);
    }
}

fn doc(lines: u32) -> Buffer {
    let text: Vec<String> = (1..=lines).map(|i| format!("line {i}")).collect();
    Buffer::from_str("doc", &text.join("\n")).unwrap()
}

fn counts(c: &RenderedLinesCollection<CountingFactory>) -> (usize, usize) {
    (c.factory().created.len(), c.factory().disposed.len())
}

#[test]
fn scroll_by_one_touches_exactly_one_line_each_side() {
    let mut c = RenderedLinesCollection::new(CountingFactory::default());
    c.on_scroll_changed(LineRange::new(10, 30));
    assert_eq!(counts(&c), (21, 0));
    let retained: Vec<u64> = (11..=30).map(|l| *c.handle_at(l).unwrap()).collect();

    c.on_scroll_changed(LineRange::new(11, 31));
    let (created, disposed) = counts(&c);
    assert_eq!(created, 22, "exactly one new entry for line 31");
    assert_eq!(disposed, 1, "exactly the entry for line 10 destroyed");
    // Lines 11..=30 keep their handles, identity included.
    let after: Vec<u64> = (11..=30).map(|l| *c.handle_at(l).unwrap()).collect();
    assert_eq!(retained, after);
}

#[test]
fn scroll_churn_is_independent_of_window_size() {
    for size in [5u32, 50, 500] {
        let mut c = RenderedLinesCollection::new(CountingFactory::default());
        c.on_scroll_changed(LineRange::new(100, 100 + size - 1));
        let before = counts(&c);
        c.on_scroll_changed(LineRange::new(101, 100 + size));
        let after = counts(&c);
        assert_eq!(after.0 - before.0, 1, "window size {size}");
        assert_eq!(after.1 - before.1, 1, "window size {size}");
    }
}

#[test]
fn flush_destroys_every_entry_and_creates_none() {
    let mut c = RenderedLinesCollection::new(CountingFactory::default());
    c.on_scroll_changed(LineRange::new(1, 20));
    assert_eq!(counts(&c), (20, 0));
    c.on_flushed();
    assert_eq!(counts(&c), (20, 20));
    assert_eq!(c.entry_count(), 0);
}

#[test]
fn insert_shifts_keys_at_and_after_the_insertion() {
    // Entries for lines 3,4,5,6; inserting lines 5..=7 shifts >=5 by +3.
    let mut c = RenderedLinesCollection::new(CountingFactory::default());
    c.on_scroll_changed(LineRange::new(3, 6));
    assert_eq!(c.entry_lines(), vec![3, 4, 5, 6]);
    let moved = *c.handle_at(5).unwrap();

    c.on_lines_inserted(5, 7);
    assert_eq!(c.entry_lines(), vec![3, 4, 8, 9]);
    assert_eq!(*c.handle_at(8).unwrap(), moved, "entry moved, not recreated");
    let (_, disposed) = counts(&c);
    assert_eq!(disposed, 0, "insert alone destroys nothing");
}

#[test]
fn delete_disposes_removed_lines_and_shifts_the_rest() {
    let mut c = RenderedLinesCollection::new(CountingFactory::default());
    c.on_scroll_changed(LineRange::new(3, 8));
    let kept = *c.handle_at(7).unwrap();
    c.on_lines_deleted(4, 5);
    assert_eq!(c.entry_lines(), vec![3, 4, 5, 6]);
    assert_eq!(*c.handle_at(5).unwrap(), kept);
    assert_eq!(c.factory().disposed.len(), 2);
}

#[test]
fn inserted_lines_materialize_on_the_next_render_pass() {
    let source = doc(40);
    let mut c = RenderedLinesCollection::new(CountingFactory::default());
    c.on_scroll_changed(LineRange::new(5, 10));
    let overlays = OverlaySet::new();
    let viewport = ViewportData::new(10, 0);
    c.render_lines(&viewport, &source, &overlays);
    let created_before = c.factory().created.len();

    // Two lines inserted at 7: entries 7..=10 shift to 9..=12; 11 and 12 now
    // sit outside the window and two window lines (7, 8) are missing.
    c.on_lines_inserted(7, 8);
    let stats = c.render_lines(&viewport, &source, &overlays);
    assert_eq!(stats.created, 2, "only the inserted lines materialize");
    assert_eq!(stats.disposed, 2, "shifted-out entries leave at the paint");
    assert_eq!(c.factory().created.len(), created_before + 2);
    assert_eq!(c.entry_lines(), (5..=10).collect::<Vec<u32>>());
}

#[test]
fn unchanged_lines_never_reach_the_factory_twice() {
    let source = doc(20);
    let mut c = RenderedLinesCollection::new(CountingFactory::default());
    c.on_scroll_changed(LineRange::new(1, 10));
    let overlays = OverlaySet::new();
    let viewport = ViewportData::new(10, 0);

    let first = c.render_lines(&viewport, &source, &overlays);
    assert_eq!((first.rendered, first.skipped), (10, 0));
    let second = c.render_lines(&viewport, &source, &overlays);
    assert_eq!((second.rendered, second.skipped), (0, 10));
    assert_eq!(c.factory().render_calls.len(), 10);
}

#[test]
fn lines_changed_invalidates_only_the_range() {
    let source = doc(20);
    let mut c = RenderedLinesCollection::new(CountingFactory::default());
    c.on_scroll_changed(LineRange::new(1, 10));
    let overlays = OverlaySet::new();
    let viewport = ViewportData::new(10, 0);
    c.render_lines(&viewport, &source, &overlays);

    assert!(c.on_lines_changed(4, 6));
    let stats = c.render_lines(&viewport, &source, &overlays);
    assert_eq!((stats.rendered, stats.skipped), (3, 7));
}

#[test]
fn overlay_fragments_participate_in_the_skip_hash() {
    let source = doc(20);
    let mut c = RenderedLinesCollection::new(CountingFactory::default());
    c.on_scroll_changed(LineRange::new(1, 10));
    let cursor_line = Rc::new(RefCell::new(3u32));
    let mut overlays = OverlaySet::new();
    overlays.push(CursorLineOverlay::new(Rc::clone(&cursor_line)));
    let viewport = ViewportData::new(10, 0);

    c.render_lines(&viewport, &source, &overlays);
    // Cursor moves 3 -> 7: exactly the two lines whose composed output
    // changed re-render, everything else hash-skips.
    *cursor_line.borrow_mut() = 7;
    let stats = c.render_lines(&viewport, &source, &overlays);
    assert_eq!((stats.rendered, stats.skipped), (2, 8));
    let touched: Vec<u32> = c
        .factory()
        .render_calls
        .iter()
        .rev()
        .take(2)
        .map(|(_, line, _)| *line)
        .collect();
    assert_eq!({ let mut t = touched; t.sort_unstable(); t }, vec![3, 7]);
}

#[test]
fn scroll_back_and_forth_recreates_only_the_edges() {
    let mut c = RenderedLinesCollection::new(CountingFactory::default());
    c.on_scroll_changed(LineRange::new(10, 30));
    c.on_scroll_changed(LineRange::new(12, 32));
    c.on_scroll_changed(LineRange::new(10, 30));
    // 21 initial + 2 entering on each of the two shifts.
    assert_eq!(counts(&c), (25, 4));
}

#[test]
fn same_range_scroll_reports_no_work() {
    let mut c = RenderedLinesCollection::new(CountingFactory::default());
    assert!(c.on_scroll_changed(LineRange::new(1, 5)));
    assert!(!c.on_scroll_changed(LineRange::new(1, 5)));
    assert_eq!(counts(&c), (5, 0));
}
