//! Property tests for the overlap layout engine and week navigation.

use chrono::{Days, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use weekplan_core::{
    dates_for_week, ItemKind, OverlapLayoutEngine, ScheduledItem, WeekNavigator,
};

const TOLERANCE: f64 = 1e-9;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
}

fn item(index: usize, start_minute: u32, minutes: i64) -> ScheduledItem {
    let start: NaiveDateTime = day().and_hms_opt(0, 0, 0).unwrap()
        + chrono::Duration::minutes(i64::from(start_minute));
    ScheduledItem {
        id: format!("item-{index}"),
        kind: ItemKind::Event {
            description: String::new(),
        },
        start,
        duration_millis: minutes * 60_000,
        owner_id: "owner".to_string(),
        display_name: format!("Item {index}"),
    }
}

/// Sorted day column built from (start minute, duration) pairs.
fn column(spans: &[(u32, i64)]) -> Vec<ScheduledItem> {
    let mut items: Vec<_> = spans
        .iter()
        .enumerate()
        .map(|(i, &(start, minutes))| item(i, start, minutes))
        .collect();
    items.sort_by_key(|i| i.start);
    items
}

fn spans() -> impl Strategy<Value = Vec<(u32, i64)>> {
    prop::collection::vec((0u32..(24 * 60 - 1), 1i64..240), 0..24)
}

proptest! {
    #[test]
    fn every_item_gets_one_placement(spans in spans()) {
        let items = column(&spans);
        let geometry = OverlapLayoutEngine::new().layout(&items);
        prop_assert_eq!(geometry.len(), items.len());
        for (g, i) in geometry.iter().zip(&items) {
            prop_assert_eq!(&g.item.id, &i.id);
        }
    }

    #[test]
    fn widths_and_offsets_stay_in_the_column(spans in spans()) {
        let items = column(&spans);
        for g in OverlapLayoutEngine::new().layout(&items) {
            prop_assert!(g.width_fraction > 0.0 && g.width_fraction <= 1.0);
            prop_assert!(g.x_offset >= 0.0 && g.x_offset < 1.0);
            prop_assert!(g.x_offset + g.width_fraction <= 1.0 + TOLERANCE);
            prop_assert!(g.parallel >= 1);
        }
    }

    #[test]
    fn vertical_extent_follows_the_clock(spans in spans()) {
        let items = column(&spans);
        let engine = OverlapLayoutEngine::new();
        let scale = engine.scale();
        for g in engine.layout(&items) {
            prop_assert!((g.y_offset - scale.offset_of(g.item.start)).abs() < TOLERANCE);
            prop_assert!((g.height - scale.height_of(g.item.duration_minutes())).abs() < TOLERANCE);
        }
    }

    #[test]
    fn disjoint_items_take_the_full_width(
        gaps in prop::collection::vec((1u32..30, 1i64..60), 1..12)
    ) {
        // Each item starts strictly after the previous one ends.
        let mut cursor = 0u32;
        let mut spans = Vec::new();
        for (gap, minutes) in gaps {
            let start = cursor + gap;
            spans.push((start, minutes));
            cursor = start + minutes as u32;
        }
        let items = column(&spans);
        for g in OverlapLayoutEngine::new().layout(&items) {
            prop_assert_eq!(g.width_fraction, 1.0);
            prop_assert_eq!(g.x_offset, 0.0);
        }
    }

    #[test]
    fn next_week_is_seven_days_later(offset in -500i64..500, days in 0u64..3650) {
        let today = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Days::new(days);
        let this = dates_for_week(offset, today).unwrap();
        let next = dates_for_week(offset + 1, today).unwrap();
        for i in 0..7 {
            prop_assert_eq!(next[i], this[i] + Days::new(7));
        }
    }

    #[test]
    fn current_week_contains_today(days in 0u64..3650) {
        let today = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Days::new(days);
        prop_assert!(dates_for_week(0, today).unwrap().contains(today));

        let mut navigator = WeekNavigator::new(today);
        navigator.next_week().unwrap();
        let back = navigator.jump_to_today().unwrap();
        prop_assert!(back.dates.contains(today));
        prop_assert_eq!(back.offset, 0);
    }
}
