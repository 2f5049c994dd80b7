//! Sliding 31-minute window over a sparse trend series.
//!
//! The last input point is "now". The window covers 20 minutes before it and
//! 10 minutes after it, one slot per minute, so the rendered line always ends
//! at the current time with blank space to its right.

use std::collections::HashMap;

use crate::models::{TrendPoint, WindowSlot};
use super::time::{format_minutes_to_label, normalize_minutes, parse_label_to_minutes, MINUTES_PER_DAY};

pub const PAST_MINUTES: i32 = 20;
pub const FUTURE_MINUTES: i32 = 10;
pub const WINDOW_LEN: usize = (PAST_MINUTES + 1 + FUTURE_MINUTES) as usize;
pub const NOW_INDEX: usize = PAST_MINUTES as usize;

const HALF_DAY: i32 = MINUTES_PER_DAY / 2;

/// Minute range of a window, in un-normalized minutes relative to "now"'s day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub now: i32,
    pub start: i32,
    pub end: i32,
}

impl WindowBounds {
    /// Bounds around the last point, or `None` for an empty series
    pub fn from_points(points: &[TrendPoint]) -> Option<Self> {
        let last = points.last()?;
        let now = parse_label_to_minutes(&last.label) as i32;

        Some(Self {
            now,
            start: now - PAST_MINUTES,
            end: now + FUTURE_MINUTES,
        })
    }

    pub fn contains(&self, minute: i32) -> bool {
        minute >= self.start && minute <= self.end
    }

    pub fn slot_minute(&self, index: usize) -> i32 {
        self.start + index as i32
    }

    /// Move a raw minute-of-day onto "now"'s day.
    ///
    /// A point more than 12 hours behind now belongs to the next day, one more
    /// than 12 hours ahead to the previous day.
    pub fn align_to_now(&self, raw_minute: u32) -> i32 {
        let minute = raw_minute as i32;
        if self.now - minute > HALF_DAY {
            minute + MINUTES_PER_DAY
        } else if minute - self.now > HALF_DAY {
            minute - MINUTES_PER_DAY
        } else {
            minute
        }
    }
}

/// Observed values keyed by aligned minute, plus the value held over from
/// before the window start
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenseMapping {
    pub observed: HashMap<i32, f64>,
    pub carry_in: Option<f64>,
}

/// Place every point on its aligned minute. Later points overwrite earlier
/// ones on the same minute. Points outside the window are not mapped; the
/// latest one before the window start is kept as `carry_in`.
pub fn map_points(points: &[TrendPoint], bounds: &WindowBounds) -> DenseMapping {
    let mut mapping = DenseMapping::default();
    let mut carry_minute = i32::MIN;

    for point in points {
        let minute = bounds.align_to_now(parse_label_to_minutes(&point.label));

        if bounds.contains(minute) {
            mapping.observed.insert(minute, point.value);
        } else if minute < bounds.start && minute >= carry_minute {
            carry_minute = minute;
            mapping.carry_in = Some(point.value);
        }
    }

    mapping
}

/// Fill the 31 slots from a mapping.
///
/// Slots up to now hold the last known value; leading slots with nothing
/// before them take the first value that follows. Future slots stay `None`.
pub fn interpolate(bounds: &WindowBounds, mapping: &DenseMapping) -> Vec<Option<f64>> {
    let mut values: Vec<Option<f64>> = Vec::with_capacity(WINDOW_LEN);

    for index in 0..WINDOW_LEN {
        let minute = bounds.slot_minute(index);

        let value = if minute > bounds.now {
            None
        } else if let Some(&observed) = mapping.observed.get(&minute) {
            Some(observed)
        } else if index == 0 {
            mapping.carry_in
        } else {
            values[index - 1]
        };

        values.push(value);
    }

    let mut following = None;
    for index in (0..=NOW_INDEX).rev() {
        match values[index] {
            Some(value) => following = Some(value),
            None => values[index] = following,
        }
    }

    values
}

/// Dense, render-ready trend window
#[derive(Debug, Clone, PartialEq)]
pub struct TrendWindow {
    pub slots: Vec<WindowSlot>,
}

impl TrendWindow {
    pub fn now_slot(&self) -> &WindowSlot {
        &self.slots[NOW_INDEX]
    }

    pub fn first_label(&self) -> &str {
        &self.slots[0].label
    }

    pub fn last_label(&self) -> &str {
        &self.slots[WINDOW_LEN - 1].label
    }

    pub fn values(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.slots.iter().map(|slot| slot.value)
    }

    /// True when no slot has a value (nothing to draw)
    pub fn is_blank(&self) -> bool {
        self.slots.iter().all(|slot| slot.value.is_none())
    }

    /// Min and max over the filled slots
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values().flatten().fold(None, |range, value| match range {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
    }
}

/// Resample a trend series onto the window ending at its last point.
///
/// Returns `None` for an empty series so the caller can show a "no data"
/// state instead of an empty window.
pub fn resample(points: &[TrendPoint]) -> Option<TrendWindow> {
    let bounds = WindowBounds::from_points(points)?;
    let mapping = map_points(points, &bounds);
    let values = interpolate(&bounds, &mapping);

    let slots = values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let minute = bounds.slot_minute(index);
            WindowSlot {
                minute_of_day: normalize_minutes(minute),
                label: format_minutes_to_label(minute),
                value,
            }
        })
        .collect();

    Some(TrendWindow { slots })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(raw: &[(&str, f64)]) -> Vec<TrendPoint> {
        raw.iter().map(|(label, value)| TrendPoint::new(*label, *value)).collect()
    }

    #[test]
    fn test_empty_series_has_no_window() {
        assert!(resample(&[]).is_none());
        assert!(WindowBounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_window_always_has_31_slots() {
        let cases = vec![
            points(&[("10:00", 5.0)]),
            points(&[("00:00", 1.0), ("00:01", 2.0)]),
            points(&[("23:59", 1.0)]),
            points(&[("garbage", 3.0)]),
            points(&[("08:00", 1.0), ("12:00", 2.0), ("16:00", 3.0)]),
        ];

        for case in cases {
            let window = resample(&case).expect("non-empty input");
            assert_eq!(window.slots.len(), 31);
            assert_eq!(WINDOW_LEN, 31);
        }
    }

    #[test]
    fn test_future_slots_are_always_blank() {
        // A mapped point in the future must still not be drawn
        let series = points(&[("10:05", 9.0), ("10:00", 5.0)]);
        let window = resample(&series).unwrap();

        for slot in &window.slots[NOW_INDEX + 1..] {
            assert_eq!(slot.value, None);
        }
    }

    #[test]
    fn test_now_slot_matches_last_point() {
        let series = points(&[("13:40", 1.0), ("13:52", 7.5)]);
        let window = resample(&series).unwrap();

        assert_eq!(window.now_slot().label, "13:52");
        assert_eq!(window.now_slot().minute_of_day, 13 * 60 + 52);
        assert_eq!(window.now_slot().value, Some(7.5));
        assert_eq!(NOW_INDEX, 20);
    }

    #[test]
    fn test_single_point_fills_whole_past() {
        let window = resample(&points(&[("10:00", 5.0)])).unwrap();

        assert_eq!(window.first_label(), "09:40");
        assert_eq!(window.last_label(), "10:10");
        for slot in &window.slots[..=NOW_INDEX] {
            assert_eq!(slot.value, Some(5.0));
        }
    }

    #[test]
    fn test_hold_last_value_between_samples() {
        let series = points(&[("10:00", 1.0), ("10:05", 2.0), ("10:10", 3.0)]);
        let window = resample(&series).unwrap();

        // 09:50 .. 10:20, now = 10:10
        let values: Vec<Option<f64>> = window.values().collect();
        assert_eq!(values[9], Some(1.0)); // 09:59, filled backward
        assert_eq!(values[10], Some(1.0)); // 10:00
        assert_eq!(values[14], Some(1.0)); // 10:04
        assert_eq!(values[15], Some(2.0)); // 10:05
        assert_eq!(values[19], Some(2.0)); // 10:09
        assert_eq!(values[20], Some(3.0)); // 10:10
    }

    #[test]
    fn test_leading_gap_takes_first_following_value() {
        let series = points(&[("10:12", 4.0), ("10:15", 6.0), ("10:20", 8.0)]);
        let window = resample(&series).unwrap();

        // 10:00 .. 10:11 have nothing before them
        for slot in &window.slots[..12] {
            assert_eq!(slot.value, Some(4.0));
        }
        assert_eq!(window.slots[15].value, Some(6.0));
    }

    #[test]
    fn test_day_wraparound_keeps_late_evening_point() {
        let series = points(&[("23:50", 42.0), ("00:05", 50.0)]);
        let bounds = WindowBounds::from_points(&series).unwrap();

        assert_eq!(bounds.now, 5);
        assert_eq!(bounds.align_to_now(23 * 60 + 50), -10);

        let mapping = map_points(&series, &bounds);
        assert_eq!(mapping.observed.get(&-10), Some(&42.0));

        let window = resample(&series).unwrap();
        assert_eq!(window.first_label(), "23:45");
        assert_eq!(window.slots[5].label, "23:50");
        assert_eq!(window.slots[5].value, Some(42.0));
        assert_eq!(window.slots[19].value, Some(42.0));
        assert_eq!(window.now_slot().value, Some(50.0));
        assert_eq!(window.last_label(), "00:15");
    }

    #[test]
    fn test_day_wraparound_in_other_direction() {
        // now is just before midnight, so 00:02 belongs to the next day
        let series = points(&[("00:02", 9.0), ("23:55", 3.0)]);
        let bounds = WindowBounds::from_points(&series).unwrap();

        assert_eq!(bounds.align_to_now(2), 1442);
        let window = resample(&series).unwrap();
        // 00:02 next day is in the future, so it is never drawn
        assert_eq!(window.slots[27].label, "00:02");
        assert_eq!(window.slots[27].value, None);
        assert!(window.slots.iter().all(|slot| slot.minute_of_day < 1440));
    }

    #[test]
    fn test_point_outside_window_is_not_mapped() {
        let series = points(&[("09:35", 3.0), ("10:00", 10.0)]);
        let bounds = WindowBounds::from_points(&series).unwrap();
        let mapping = map_points(&series, &bounds);

        assert_eq!(mapping.observed.len(), 1);
        assert!(!mapping.observed.contains_key(&(9 * 60 + 35)));
        assert_eq!(mapping.observed.get(&600), Some(&10.0));
    }

    #[test]
    fn test_far_future_point_is_not_mapped() {
        let series = points(&[("10:11", 3.0), ("10:00", 10.0)]);
        let bounds = WindowBounds::from_points(&series).unwrap();
        let mapping = map_points(&series, &bounds);

        assert!(!mapping.observed.contains_key(&611));
        assert_eq!(mapping.carry_in, None);
    }

    #[test]
    fn test_window_edges_are_inclusive() {
        let series = points(&[("09:40", 1.0), ("09:39", 2.0), ("10:10", 3.0), ("10:00", 4.0)]);
        let bounds = WindowBounds::from_points(&series).unwrap();
        let mapping = map_points(&series, &bounds);

        assert_eq!(mapping.observed.len(), 3);
        assert_eq!(mapping.observed.get(&580), Some(&1.0));
        assert_eq!(mapping.observed.get(&610), Some(&3.0));
        assert_eq!(mapping.carry_in, Some(2.0));

        let window = resample(&series).unwrap();
        assert_eq!(window.slots[0].label, "09:40");
        // The observed edge value beats the carried-in one
        assert_eq!(window.slots[0].value, Some(1.0));
        assert_eq!(window.now_slot().value, Some(4.0));
        assert_eq!(window.slots[WINDOW_LEN - 1].label, "10:10");
        assert_eq!(window.slots[WINDOW_LEN - 1].value, None);
    }

    #[test]
    fn test_duplicate_minutes_last_write_wins() {
        let series = points(&[("10:00", 1.0), ("09:50", 2.0), ("09:50", 3.0), ("10:00", 4.0)]);
        let window = resample(&series).unwrap();

        assert_eq!(window.slots[10].value, Some(3.0));
        assert_eq!(window.now_slot().value, Some(4.0));
    }

    #[test]
    fn test_carry_in_uses_latest_point_before_window() {
        let series = points(&[("09:00", 1.0), ("09:30", 2.0), ("09:10", 7.0), ("10:00", 5.0)]);
        let bounds = WindowBounds::from_points(&series).unwrap();
        let mapping = map_points(&series, &bounds);

        assert_eq!(mapping.carry_in, Some(2.0));
    }

    #[test]
    fn test_resample_is_idempotent() {
        let series = points(&[("11:01", 1.25), ("11:07", 0.1 + 0.2), ("11:20", 99.5)]);
        let first = resample(&series).unwrap();
        let second = resample(&series).unwrap();

        assert_eq!(first, second);
        for (a, b) in first.values().zip(second.values()) {
            assert_eq!(a.map(f64::to_bits), b.map(f64::to_bits));
        }
    }

    #[test]
    fn test_malformed_labels_still_place_points() {
        let series = points(&[("??", 4.0)]);
        let window = resample(&series).unwrap();

        assert_eq!(window.now_slot().label, "00:00");
        assert_eq!(window.first_label(), "23:40");
        assert_eq!(window.now_slot().value, Some(4.0));
    }

    #[test]
    fn test_evening_session_scenario() {
        let series = points(&[
            ("19:00", 78.0),
            ("19:30", 72.0),
            ("20:00", 55.0),
            ("20:30", 63.0),
            ("21:00", 88.0),
            ("21:30", 119.0),
        ]);
        let window = resample(&series).unwrap();

        assert_eq!(window.slots.len(), 31);
        assert_eq!(window.first_label(), "21:10");
        assert_eq!(window.last_label(), "21:40");
        assert_eq!(window.slots[0].value, Some(88.0));
        assert_eq!(window.slots[19].value, Some(88.0));
        assert_eq!(window.slots[20].label, "21:30");
        assert_eq!(window.slots[20].value, Some(119.0));
        for (offset, slot) in window.slots[21..].iter().enumerate() {
            assert_eq!(slot.label, format!("21:{}", 31 + offset));
            assert_eq!(slot.value, None);
        }
        assert_eq!(window.value_range(), Some((88.0, 119.0)));
    }

    #[test]
    fn test_blank_window_reports_no_range() {
        let window = TrendWindow {
            slots: (0..WINDOW_LEN as i32)
                .map(|minute| WindowSlot {
                    minute_of_day: minute as u32,
                    label: format_minutes_to_label(minute),
                    value: None,
                })
                .collect(),
        };

        assert!(window.is_blank());
        assert_eq!(window.value_range(), None);
    }
}
