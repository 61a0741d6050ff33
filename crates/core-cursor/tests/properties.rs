//! Property tests pinning the movement contracts: surrogate atomicity,
//! vertical round-trips through tabbed lines, and boundary idempotence.

use core_config::EditorConfig;
use core_cursor::moves::{down, left, right, up};
use core_text::{Buffer, LineSource, utf16};
use proptest::prelude::*;

fn cfg() -> EditorConfig {
    EditorConfig::default()
}

/// True when `column` sits strictly between the two halves of a surrogate pair.
fn splits_pair(content: &str, column: u32) -> bool {
    let units = utf16::encode(content);
    let idx = column as usize - 1;
    idx >= 1
        && idx < units.len()
        && utf16::is_high_surrogate(units[idx - 1])
        && utf16::is_low_surrogate(units[idx])
}

/// Lines mixing narrow characters, astral characters, and tabs.
fn arb_line() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("a".to_string()),
            Just("Z".to_string()),
            Just("\t".to_string()),
            Just(" ".to_string()),
            Just("🐶".to_string()),
            Just("𐐀".to_string()),
        ],
        0..12,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn left_and_right_never_split_a_surrogate_pair(
        lines in proptest::collection::vec(arb_line(), 1..4),
        line_pick in 0usize..4,
        column_pick in 0u32..32,
    ) {
        let b = Buffer::from_str("t", &lines.join("\n")).unwrap();
        let line = (line_pick as u32 % b.line_count()) + 1;
        let start = b.validate_position(core_text::Position::new(line, column_pick + 1));

        let l = left(&b, start.line, start.column);
        prop_assert!(!splits_pair(&b.line_content(l.line), l.column));
        let r = right(&b, start.line, start.column);
        prop_assert!(!splits_pair(&b.line_content(r.line), r.column));
    }

    #[test]
    fn vertical_round_trip_with_identical_indentation(column_pick in 1u32..10) {
        // Both lines carry a single leading tab: down then up restores the
        // exact column with zero residual carry.
        let b = Buffer::from_str("t", "\tabcdefgh\n\tabcdefgh").unwrap();
        let column = column_pick.min(b.line_max_column(1));
        let d = down(&cfg(), &b, 1, column, 0, 1, true);
        let u = up(&cfg(), &b, d.line, d.column, d.leftover_visible_columns, 1, true);
        prop_assert_eq!((u.line, u.column), (1, column));
        prop_assert_eq!(u.leftover_visible_columns, 0);
    }

    #[test]
    fn round_trip_leftover_equals_visible_deficit(column_pick in 1u32..12) {
        // Intermediate line is shorter: after down, the carry is exactly the
        // visible-column deficit against the intended column.
        let b = Buffer::from_str("t", "\tabcdefgh\nxy\n\tabcdefgh").unwrap();
        let column = column_pick.min(b.line_max_column(1));
        let intended = core_cursor::visible::visible_column_from_column(
            &b.line_content(1),
            column,
            cfg().tab_size,
        ) as i64;
        let d = down(&cfg(), &b, 1, column, 0, 1, true);
        let landed = core_cursor::visible::visible_column_from_column(
            &b.line_content(2),
            d.column,
            cfg().tab_size,
        ) as i64;
        prop_assert_eq!(d.leftover_visible_columns, intended - landed);
        // And the carry restores the column on the matching third line.
        let d2 = down(&cfg(), &b, d.line, d.column, d.leftover_visible_columns, 1, true);
        prop_assert_eq!((d2.line, d2.column), (3, column));
    }

    #[test]
    fn boundary_moves_are_idempotent(lines in proptest::collection::vec(arb_line(), 1..4)) {
        let b = Buffer::from_str("t", &lines.join("\n")).unwrap();
        let last = b.line_count();
        let max = b.line_max_column(last);
        let r = right(&b, last, max);
        prop_assert_eq!((r.line, r.column), (last, max));
        let min = b.line_min_column(1);
        let l = left(&b, 1, min);
        prop_assert_eq!((l.line, l.column), (1, min));
    }
}
