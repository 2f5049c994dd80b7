//! Trend chart resampling

pub mod time;
pub mod window;

pub use time::{format_minutes_to_label, try_parse_label};
pub use window::{resample, TrendWindow, NOW_INDEX, WINDOW_LEN};
