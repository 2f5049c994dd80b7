//! Conversions between `HH:MM` labels and minute-of-day values

pub const MINUTES_PER_DAY: i32 = 1440;

/// Strictly parse an `HH:MM` label into a minute-of-day value.
///
/// Returns `None` when the label is not two colon-separated unsigned
/// integers with `hour < 24` and `minute < 60`.
pub fn try_parse_label(label: &str) -> Option<u32> {
    let (hour, minute) = label.trim().split_once(':')?;
    let hour = parse_digits(hour.trim())?;
    let minute = parse_digits(minute.trim())?;

    if hour >= 24 || minute >= 60 {
        return None;
    }

    Some(hour * 60 + minute)
}

// `str::parse` alone would take a leading `+`
fn parse_digits(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Parse an `HH:MM` label into a minute-of-day value.
///
/// Malformed labels collapse to minute 0 instead of failing, so a bad
/// timestamp still lands somewhere on the chart. Use [`try_parse_label`]
/// when the point should be dropped instead.
pub fn parse_label_to_minutes(label: &str) -> u32 {
    match try_parse_label(label) {
        Some(minutes) => minutes,
        None => {
            tracing::debug!("Unparseable trend label '{}', treating as 00:00", label);
            0
        }
    }
}

/// Wrap any minute value (negative or past midnight) into `[0, 1440)`.
pub fn normalize_minutes(minutes: i32) -> u32 {
    (((minutes % MINUTES_PER_DAY) + MINUTES_PER_DAY) % MINUTES_PER_DAY) as u32
}

/// Format a minute value as a zero-padded `HH:MM` label
pub fn format_minutes_to_label(minutes: i32) -> String {
    let minutes = normalize_minutes(minutes);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
