//! Trend chart models

use serde::{Deserialize, Serialize};

/// One observed share-price sample, labelled with its time of day (`HH:MM`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub label: String,
    pub value: f64,
}

impl TrendPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A minute-granularity position in the rendering window.
///
/// `value` is `None` for future slots and for slots nothing could be carried into.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSlot {
    pub minute_of_day: u32,
    pub label: String,
    pub value: Option<f64>,
}

/// Team trend as handed to the chart command
#[derive(Debug, Clone)]
pub struct TeamTrend {
    pub team_id: i64,
    pub team_name: String,
    pub points: Vec<TrendPoint>,
    /// True when the backend had no samples and the built-in series was used
    pub is_fallback: bool,
}
