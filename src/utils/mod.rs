pub mod backend_ratelimit;
pub mod encryption;
pub mod errors;
pub mod ratelimit;
pub mod table;

pub use encryption::SessionCipher;
pub use errors::extract_clean_error;
pub use ratelimit::CommandRateLimiter;
pub use table::Table;

/// Format a money amount with thousands separators, dropping `.00`
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = (amount.abs() * 100.0).round() / 100.0;
    let whole = rounded.trunc() as u64;
    let cents = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative && (whole > 0 || cents > 0) { "-" } else { "" };
    if cents == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{:02}", sign, grouped, cents)
    }
}

/// Format a price change rate as a signed percentage
pub fn format_change(rate: Option<f64>) -> String {
    match rate {
        Some(rate) if rate > 0.0 => format!("▲ {:.2}%", rate),
        Some(rate) if rate < 0.0 => format!("▼ {:.2}%", rate.abs()),
        Some(_) => "0.00%".to_string(),
        None => "-".to_string(),
    }
}

/// Parse a page argument such as `2` or `p2`; defaults to 1
pub fn parse_page_arg(arg: Option<&str>) -> Result<usize, String> {
    let Some(arg) = arg else {
        return Ok(1);
    };

    let arg = arg.to_lowercase();
    let number = arg.strip_prefix('p').unwrap_or(&arg);
    match number.parse::<usize>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(format!("❌ Invalid page number: `{}`", arg)),
    }
}

/// Slice one page out of a list; `Err` if the page is past the end
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> Result<(&[T], usize), String> {
    let total_pages = items.len().div_ceil(per_page).max(1);

    if page < 1 || page > total_pages {
        return Err(format!(
            "❌ Invalid page number. This list has {} page(s)",
            total_pages
        ));
    }

    let start = (page - 1) * per_page;
    let end = std::cmp::min(start + per_page, items.len());
    Ok((&items[start..end], total_pages))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1000.0), "1,000");
        assert_eq!(format_amount(1234567.5), "1,234,567.50");
        assert_eq!(format_amount(-2500.0), "-2,500");
        assert_eq!(format_amount(-0.001), "0");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(Some(3.456)), "▲ 3.46%");
        assert_eq!(format_change(Some(-1.2)), "▼ 1.20%");
        assert_eq!(format_change(Some(0.0)), "0.00%");
        assert_eq!(format_change(None), "-");
    }

    #[test]
    fn test_parse_page_arg() {
        assert_eq!(parse_page_arg(None), Ok(1));
        assert_eq!(parse_page_arg(Some("3")), Ok(3));
        assert_eq!(parse_page_arg(Some("P2")), Ok(2));
        assert!(parse_page_arg(Some("0")).is_err());
        assert!(parse_page_arg(Some("next")).is_err());
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=25).collect();
        let (page, total) = paginate(&items, 3, 10).unwrap();
        assert_eq!(page, &[21, 22, 23, 24, 25]);
        assert_eq!(total, 3);
        assert!(paginate(&items, 4, 10).is_err());

        let empty: Vec<u32> = Vec::new();
        let (page, total) = paginate(&empty, 1, 10).unwrap();
        assert!(page.is_empty());
        assert_eq!(total, 1);
    }
}
