use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// SI byte formatting (factor 1000, one decimal). The sign is kept for
/// negative inputs; `i64::MIN` has no positive counterpart and is formatted
/// as `i64::MAX`.
pub fn format_bytes(bytes: i64) -> String {
    let bytes = if bytes == i64::MIN { i64::MAX } else { bytes };
    let sign = if bytes < 0 { "-" } else { "" };

    let mut size = bytes.unsigned_abs() as f64;
    let mut unit = 0;
    while size >= 1000.0 && unit < UNITS.len() - 1 {
        size /= 1000.0;
        unit += 1;
    }

    format!("{sign}{size:.1} {}", UNITS[unit])
}

/// Counters are unsigned; anything past `i64::MAX` saturates.
pub fn format_bytes_u64(bytes: u64) -> String {
    format_bytes(i64::try_from(bytes).unwrap_or(i64::MAX))
}

pub fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * part as f64 / total as f64
}

pub fn format_duration_secs(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else {
        format!("{minutes}m {seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bytes() {
        assert_eq!(format_bytes(0), "0.0 B");
    }

    #[test]
    fn scales_by_thousands() {
        assert_eq!(format_bytes(999), "999.0 B");
        assert_eq!(format_bytes(1500), "1.5 kB");
        assert_eq!(format_bytes(3_200_000_000), "3.2 GB");
    }

    #[test]
    fn negative_values_keep_sign() {
        assert_eq!(format_bytes(-2_500_000), "-2.5 MB");
        assert_eq!(format_bytes(-1), "-1.0 B");
    }

    #[test]
    fn min_value_is_formatted_as_max() {
        assert_eq!(format_bytes(i64::MIN), format_bytes(i64::MAX));
        assert_eq!(format_bytes(i64::MAX), "9.2 EB");
    }

    #[test]
    fn unsigned_saturates() {
        assert_eq!(format_bytes_u64(u64::MAX), format_bytes(i64::MAX));
        assert_eq!(format_bytes_u64(1500), "1.5 kB");
    }

    #[test]
    fn percent_of_zero_total() {
        assert_eq!(percent(10, 0), 0.0);
        assert!((percent(1, 4) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn duration_buckets() {
        assert_eq!(format_duration_secs(59), "0m 59s");
        assert_eq!(format_duration_secs(3_661), "1h 1m 1s");
        assert_eq!(format_duration_secs(90_061), "1d 1h 1m");
    }

    #[test]
    fn truncates_wide_names() {
        assert_eq!(truncate_unicode("short", 10), "short");
        assert_eq!(truncate_unicode("averylongname", 5), "aver\u{2026}");
    }
}
