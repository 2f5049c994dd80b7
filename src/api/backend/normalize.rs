//! Trend payload normalization.
//!
//! The backend has shipped several shapes for team trend data. Everything
//! alias-tolerant lives here; the rest of the bot only sees [`TrendPoint`]s.

use chrono::{DateTime, NaiveDateTime, NaiveTime, Timelike};
use lazy_static::lazy_static;
use serde_json::Value;

use crate::models::TrendPoint;
use crate::trend::{format_minutes_to_label, try_parse_label};

const CONTAINER_KEYS: [&str; 5] = ["data", "points", "trend", "history", "items"];
const LABEL_KEYS: [&str; 4] = ["label", "timestamp", "bucket", "time"];
const VALUE_KEYS: [&str; 4] = ["value", "amount", "total", "price"];

lazy_static! {
    /// Sample evening session shown when a team has no trend data yet
    static ref FALLBACK_TREND: Vec<TrendPoint> = vec![
        TrendPoint::new("19:00", 78.0),
        TrendPoint::new("19:30", 72.0),
        TrendPoint::new("20:00", 55.0),
        TrendPoint::new("20:30", 63.0),
        TrendPoint::new("21:00", 88.0),
        TrendPoint::new("21:30", 119.0),
    ];
}

pub fn fallback_trend() -> Vec<TrendPoint> {
    FALLBACK_TREND.clone()
}

/// Convert any known trend payload shape into an ordered point list.
///
/// Entries without a usable value are dropped. Unknown label formats are
/// passed through as-is.
pub fn normalize_trend_payload(payload: &Value) -> Vec<TrendPoint> {
    let entries = match find_entries(payload) {
        Some(entries) => entries,
        None => {
            tracing::warn!("Trend payload has no point array");
            return Vec::new();
        }
    };

    let points: Vec<TrendPoint> = entries.iter().filter_map(normalize_entry).collect();

    if points.len() != entries.len() {
        tracing::debug!(
            "Dropped {} of {} trend entries during normalization",
            entries.len() - points.len(),
            entries.len()
        );
    }

    points
}

fn find_entries(payload: &Value) -> Option<&Vec<Value>> {
    match payload {
        Value::Array(entries) => Some(entries),
        Value::Object(map) => CONTAINER_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(find_entries),
        _ => None,
    }
}

fn normalize_entry(entry: &Value) -> Option<TrendPoint> {
    let object = entry.as_object()?;

    let value = VALUE_KEYS
        .iter()
        .filter_map(|key| object.get(*key))
        .find_map(numeric_value)?;

    let label = LABEL_KEYS
        .iter()
        .filter_map(|key| object.get(*key))
        .find_map(|raw| raw.as_str())
        .map(normalize_label)
        .unwrap_or_default();

    Some(TrendPoint { label, value })
}

fn numeric_value(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    value.is_finite().then_some(value)
}

/// Reduce a timestamp to `HH:MM`
pub fn normalize_label(raw: &str) -> String {
    let raw = raw.trim();

    if let Some(minutes) = try_parse_label(raw) {
        return format_minutes_to_label(minutes as i32);
    }
    if let Ok(time) = NaiveTime::parse_from_str(raw, "%H:%M:%S") {
        return format_time(time);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return format_time(datetime.time());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return format_time(datetime.time());
        }
    }

    raw.to_string()
}

fn format_time(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_array_with_canonical_fields() {
        let payload = json!([
            {"label": "10:00", "value": 5},
            {"label": "10:01", "value": 5.5}
        ]);
        let points = normalize_trend_payload(&payload);

        assert_eq!(points, vec![TrendPoint::new("10:00", 5.0), TrendPoint::new("10:01", 5.5)]);
    }

    #[test]
    fn test_aliases_inside_wrapped_object() {
        let payload = json!({
            "data": {
                "history": [
                    {"timestamp": "2024-05-01T21:00:00+09:00", "price": "88"},
                    {"bucket": "2024-05-01 21:30:00", "total": 119},
                    {"time": "21:31:45", "amount": 120.5}
                ]
            }
        });
        let points = normalize_trend_payload(&payload);

        assert_eq!(
            points,
            vec![
                TrendPoint::new("21:00", 88.0),
                TrendPoint::new("21:30", 119.0),
                TrendPoint::new("21:31", 120.5),
            ]
        );
    }

    #[test]
    fn test_entries_without_usable_value_are_dropped() {
        let payload = json!({"points": [
            {"label": "10:00"},
            {"label": "10:01", "value": "NaN"},
            {"label": "10:02", "value": "inf"},
            {"label": "10:03", "value": null},
            {"label": "10:04", "value": "12.5"},
            "not an object"
        ]});
        let points = normalize_trend_payload(&payload);

        assert_eq!(points, vec![TrendPoint::new("10:04", 12.5)]);
    }

    #[test]
    fn test_short_labels_are_zero_padded() {
        assert_eq!(normalize_label(" 7:05 "), "07:05");
        assert_eq!(normalize_label("21:30"), "21:30");
        assert_eq!(normalize_label("07:05:59"), "07:05");
        assert_eq!(normalize_label("+7:05"), "+7:05");
    }

    #[test]
    fn test_unknown_label_is_kept_verbatim() {
        let payload = json!([{"label": "yesterday", "value": 1}, {"value": 2}]);
        let points = normalize_trend_payload(&payload);

        assert_eq!(points[0].label, "yesterday");
        assert_eq!(points[1].label, "");
    }

    #[test]
    fn test_payload_without_array_is_empty() {
        assert!(normalize_trend_payload(&json!({"status": "ok"})).is_empty());
        assert!(normalize_trend_payload(&json!(null)).is_empty());
    }

    #[test]
    fn test_fallback_ends_at_half_past_nine() {
        let fallback = fallback_trend();
        assert_eq!(fallback.len(), 6);
        assert_eq!(fallback.last().map(|p| p.label.as_str()), Some("21:30"));
    }
}
