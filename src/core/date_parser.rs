use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Cumulative-quarter markers and the (month, day) each period ends on.
/// Checked in order, most specific first.
const QUARTER_MARKERS: &[(&str, u32, u32)] = &[
    ("第1-4季度", 12, 31),
    ("第1-3季度", 9, 30),
    ("第1-2季度", 6, 30),
    ("第1季度", 3, 31),
];

/// Parse a provider period label such as "2024年第1-4季度" or "2024年03月".
///
/// Never fails loudly: any label that cannot be read yields `None`.
pub fn parse_period_label(label: &str) -> Option<NaiveDate> {
    for (marker, month, day) in QUARTER_MARKERS {
        if label.contains(marker) {
            let year = parse_digits(&label.replace(&format!("年{}", marker), ""))?;
            return NaiveDate::from_ymd_opt(year, *month, *day);
        }
    }

    if label.contains('年') && label.contains('月') {
        let chars: Vec<char> = label.chars().collect();
        let year = parse_digits(&char_slice(&chars, 0, 4))?;
        let month = parse_digits(&char_slice(&chars, 5, 7))?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }

    None
}

/// Unsigned decimal only; `str::parse` would also take a leading sign.
fn parse_digits<T: std::str::FromStr>(s: &str) -> Option<T> {
    let s = s.trim();
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn char_slice(chars: &[char], start: usize, end: usize) -> String {
    let end = end.min(chars.len());
    if start >= end {
        return String::new();
    }
    chars[start..end].iter().collect()
}

/// Parse a native provider timestamp cell: ISO dates/datetimes or epoch milliseconds.
pub fn parse_native_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_native_str(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

fn parse_native_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(chrono::NaiveTime::default()).and_utc())
}
