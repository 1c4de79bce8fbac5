//! Overlap layout for a single day column.
//!
//! Items that share time on the same day are placed side by side. The pass is
//! a single greedy sweep over the column in start order:
//! - items already placed stay "active" until an item starts strictly after
//!   they end, so an item ending exactly when the next one starts still counts
//!   as concurrent for that step
//! - the width of an item is `1 / (active + upcoming items that start before
//!   it ends)`
//! - the horizontal position continues from where the previous item ended and
//!   wraps to the left edge when the item would not fit
//!
//! This is not an optimal packing. It can leave free slots unused and, for
//! some overlap patterns, place two concurrent items on top of each other.

use serde::Serialize;

use super::scale::RowScale;
use crate::schedule::ScheduledItem;

/// Slack allowed when deciding whether an item still fits before the right
/// edge; sums of fractions like `1/3` accumulate rounding error.
const WRAP_TOLERANCE: f64 = 1e-9;

/// Geometry of one item in its day column.
///
/// Horizontal values are fractions of the column width, vertical values are
/// row units of the engine's [`RowScale`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemGeometry<'a> {
    pub item: &'a ScheduledItem,
    /// Share of the column width, in `(0, 1]`
    pub width_fraction: f64,
    /// Left edge, in `[0, 1)`
    pub x_offset: f64,
    pub y_offset: f64,
    pub height: f64,
    /// Number of items this one shares the column with, itself included
    pub parallel: usize,
}

impl ItemGeometry<'_> {
    /// Bottom edge in row units.
    pub fn y_end(&self) -> f64 {
        self.y_offset + self.height
    }
}

/// Lays out day columns.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlapLayoutEngine {
    scale: RowScale,
}

impl OverlapLayoutEngine {
    /// Create an engine with the default 50 units per hour.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a custom vertical scale
    pub fn with_scale(scale: RowScale) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> RowScale {
        self.scale
    }

    /// Compute the geometry of every item in `day_column`.
    ///
    /// `day_column` must be sorted ascending by start and hold only items
    /// with a positive duration; [`assemble`](crate::week::assemble)
    /// guarantees both. The output has one entry per input item, in input
    /// order.
    pub fn layout<'a>(&self, day_column: &'a [ScheduledItem]) -> Vec<ItemGeometry<'a>> {
        debug_assert!(
            day_column.windows(2).all(|w| w[0].start <= w[1].start),
            "day column must be sorted by start"
        );

        let mut geometries = Vec::with_capacity(day_column.len());
        // Indices into `day_column`; the pending set is the suffix starting
        // at the current index.
        let mut active: Vec<usize> = Vec::new();
        let mut cursor = 0.0_f64;

        for (index, item) in day_column.iter().enumerate() {
            active.retain(|&old| day_column[old].end() >= item.start);
            if active.is_empty() {
                cursor = 0.0;
            }

            let end = item.end();
            let parallel_pending = day_column[index..]
                .iter()
                .filter(|pending| pending.start < end)
                .count();
            let parallel = active.len() + parallel_pending;
            let width_fraction = 1.0 / parallel as f64;

            let mut x_offset = cursor;
            if x_offset + width_fraction - 1.0 > WRAP_TOLERANCE {
                x_offset = 0.0;
            }

            geometries.push(ItemGeometry {
                item,
                width_fraction,
                x_offset,
                y_offset: self.scale.offset_of(item.start),
                height: self.scale.height_of(item.duration_minutes()),
                parallel,
            });

            cursor = x_offset + width_fraction;
            active.push(index);
        }

        geometries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ItemKind;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 21)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn event(id: &str, start: NaiveDateTime, minutes: i64) -> ScheduledItem {
        ScheduledItem::try_new(
            id,
            ItemKind::Event {
                description: format!("{id} description"),
            },
            start,
            minutes * 60_000,
            "student",
            id,
        )
        .unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_column() {
        assert!(OverlapLayoutEngine::new().layout(&[]).is_empty());
    }

    #[test]
    fn single_item_takes_full_width() {
        let items = [event("solo", at(14, 10), 25)];
        let out = OverlapLayoutEngine::new().layout(&items);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].width_fraction, 1.0);
        assert_eq!(out[0].x_offset, 0.0);
        assert_eq!(out[0].parallel, 1);
        assert!(std::ptr::eq(out[0].item, &items[0]));
    }

    #[test]
    fn disjoint_items_each_take_full_width() {
        let items = [
            event("a", at(8, 0), 60),
            event("b", at(9, 1), 30),
            event("c", at(12, 0), 90),
        ];
        let out = OverlapLayoutEngine::new().layout(&items);
        for g in &out {
            assert_eq!(g.width_fraction, 1.0, "{}", g.item.id);
            assert_eq!(g.x_offset, 0.0, "{}", g.item.id);
        }
    }

    #[test]
    fn vertical_mapping_at_three_am() {
        let items = [event("one-hour", at(3, 0), 60)];
        let engine = OverlapLayoutEngine::new();
        let out = engine.layout(&items);
        assert_eq!(out[0].y_offset, 150.0);
        assert_eq!(out[0].height, 50.0);

        let items = [event("two-hours", at(3, 0), 120)];
        assert_eq!(engine.layout(&items)[0].height, 100.0);

        let items = [event("two-and-a-half", at(3, 0), 150)];
        assert_eq!(engine.layout(&items)[0].height, 125.0);
    }

    #[test]
    fn three_item_overlap_scenario() {
        let items = [
            event("E3", at(0, 0), 150),
            event("E2", at(2, 0), 120),
            event("E1", at(3, 0), 60),
        ];
        let out = OverlapLayoutEngine::new().layout(&items);
        let ids: Vec<_> = out.iter().map(|g| g.item.id.as_str()).collect();
        assert_eq!(ids, ["E3", "E2", "E1"]);

        let (e3, e2, e1) = (&out[0], &out[1], &out[2]);
        assert!(approx(e3.width_fraction, 0.5));
        assert!(approx(e3.x_offset, 0.0));
        assert_eq!(e3.height, 125.0);

        assert!(approx(e2.width_fraction, 1.0 / 3.0));
        assert!(approx(e2.x_offset, 0.5));
        assert_eq!(e2.height, 100.0);

        assert!(approx(e1.width_fraction, 0.5));
        assert!(approx(e1.x_offset, 0.0));
        assert_eq!(e1.height, 50.0);

        assert!(e2.width_fraction < e1.width_fraction);
        assert!(approx(e1.width_fraction, e3.width_fraction));
    }

    #[test]
    fn item_ending_at_next_start_is_still_active() {
        // `a` ends exactly when `b` starts: it is not expired while `b` is
        // placed, so `b` shares the column with it.
        let items = [event("a", at(10, 0), 60), event("b", at(11, 0), 60)];
        let out = OverlapLayoutEngine::new().layout(&items);
        assert_eq!(out[0].width_fraction, 1.0);
        assert_eq!(out[1].parallel, 2);
        assert!(approx(out[1].width_fraction, 0.5));
        // cursor sat at 1.0 after `a`, so `b` wraps to the left edge
        assert_eq!(out[1].x_offset, 0.0);
    }

    #[test]
    fn touching_item_expires_once_a_later_start_passes_its_end() {
        let items = [
            event("a", at(10, 0), 60),
            event("b", at(11, 0), 60),
            event("c", at(12, 0), 30),
        ];
        let out = OverlapLayoutEngine::new().layout(&items);
        // `a` (ended 11:00) is gone at 12:00, `b` (ends 12:00) is not
        assert_eq!(out[2].parallel, 2);
        assert!(approx(out[2].width_fraction, 0.5));
        assert!(approx(out[2].x_offset, 0.5));
    }

    #[test]
    fn cursor_resets_when_active_set_empties() {
        let items = [
            event("a", at(8, 0), 60),
            event("b", at(8, 30), 60),
            event("c", at(13, 0), 60),
        ];
        let out = OverlapLayoutEngine::new().layout(&items);
        assert!(approx(out[0].width_fraction, 0.5));
        assert!(approx(out[1].x_offset, 0.5));
        assert_eq!(out[2].x_offset, 0.0);
        assert_eq!(out[2].width_fraction, 1.0);
    }

    #[test]
    fn three_way_split_fills_the_row_without_wrapping() {
        let items = [
            event("a", at(9, 0), 60),
            event("b", at(9, 0), 60),
            event("c", at(9, 0), 60),
        ];
        let out = OverlapLayoutEngine::new().layout(&items);
        // a sees 3 pending, b sees 1 active + 2 pending, c sees 2 active + 1
        for g in &out {
            assert!(approx(g.width_fraction, 1.0 / 3.0));
        }
        assert!(approx(out[0].x_offset, 0.0));
        assert!(approx(out[1].x_offset, 1.0 / 3.0));
        assert!(approx(out[2].x_offset, 2.0 / 3.0));
    }

    #[test]
    fn custom_scale_is_used_for_vertical_values() {
        let engine = OverlapLayoutEngine::with_scale(RowScale::new(60.0));
        let items = [event("a", at(1, 30), 45)];
        let out = engine.layout(&items);
        assert_eq!(out[0].y_offset, 90.0);
        assert_eq!(out[0].height, 45.0);
        assert_eq!(out[0].y_end(), 135.0);
    }
}
