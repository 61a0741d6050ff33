//! Property: reconciliation work equals the symmetric difference of
//! consecutive windows, never the window size.

use core_render::{LineRange, RenderUnitFactory, RenderedLinesCollection};
use proptest::prelude::*;

#[derive(Default)]
struct Counting {
    next_id: u64,
    created: u64,
    disposed: u64,
}

impl RenderUnitFactory for Counting {
    type Handle = u64;
    fn create(&mut self, _line: u32) -> u64 {
        self.next_id += 1;
        self.created += 1;
        self.next_id
    }
    fn render(&mut self, _h: &mut u64, _line: u32, _off: u32, _content: &str) -> bool {
        true
    }
    fn dispose(&mut self, _handle: u64) {
        self.disposed += 1;
    }
}

fn overlap(a: LineRange, b: LineRange) -> u64 {
    let lo = a.start.max(b.start);
    let hi = a.end.min(b.end);
    if lo > hi { 0 } else { (hi - lo + 1) as u64 }
}

proptest! {
    #[test]
    fn scroll_work_is_the_window_symmetric_difference(
        start_a in 1u32..500,
        len_a in 1u32..80,
        start_b in 1u32..500,
        len_b in 1u32..80,
    ) {
        let a = LineRange::new(start_a, start_a + len_a - 1);
        let b = LineRange::new(start_b, start_b + len_b - 1);
        let mut c = RenderedLinesCollection::new(Counting::default());

        c.on_scroll_changed(a);
        prop_assert_eq!(c.factory().created, a.len() as u64);

        c.on_scroll_changed(b);
        let kept = overlap(a, b);
        prop_assert_eq!(c.factory().created, a.len() as u64 + b.len() as u64 - kept);
        prop_assert_eq!(c.factory().disposed, a.len() as u64 - kept);
        prop_assert_eq!(c.entry_count() as u64, b.len() as u64);
    }
}
