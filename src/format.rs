use chrono::{DateTime, Utc};

/// Comma-group an integer, e.g. `1234567` -> `1,234,567`.
pub fn group_digits(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parse a numeric-string counter, treating anything unparseable as zero.
pub fn parse_count(s: &str) -> u64 {
    s.trim().parse().unwrap_or(0)
}

/// Korean 억/만 formatting for view/subscriber counts.
///
/// 만 values round to the nearest whole unit: `150000000` -> `1.5억`,
/// `25000` -> `3만`.
pub fn format_count(num_str: &str) -> String {
    let n = parse_count(num_str);
    if n >= 100_000_000 {
        format!("{:.1}억", n as f64 / 100_000_000.0)
    } else if n >= 10_000 {
        let man = (n as f64 / 10_000.0).round();
        format!("{man:.0}만")
    } else {
        group_digits(n)
    }
}

/// Korean 억/만 formatting for KRW revenue figures.
///
/// Unlike [`format_count`], sub-억 values floor to whole 만 units, and a
/// trailing `.0` on 억 values is stripped.
pub fn format_revenue(value: f64) -> String {
    if value >= 100_000_000.0 {
        let s = format!("{:.1}", value / 100_000_000.0);
        let s = s.strip_suffix(".0").unwrap_or(&s);
        format!("{s}억")
    } else if value >= 10_000.0 {
        format!("{}만", (value / 10_000.0).floor() as i64)
    } else {
        group_digits(value.max(0.0) as u64)
    }
}

/// Long-form Korean publish date, e.g. `2024년 5월 2일`.
pub fn format_published(dt: DateTime<Utc>) -> String {
    dt.format("%Y년 %-m월 %-d일").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn groups_digits_in_threes() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1_000), "1,000");
        assert_eq!(group_digits(1_234_567), "1,234,567");
    }

    #[test]
    fn counts_use_eok_and_man_units() {
        assert_eq!(format_count("150000000"), "1.5억");
        assert_eq!(format_count("100000000"), "1.0억");
        assert_eq!(format_count("25000"), "3만");
        assert_eq!(format_count("24999"), "2만");
        assert_eq!(format_count("9999"), "9,999");
    }

    #[test]
    fn unparseable_count_renders_as_zero() {
        assert_eq!(format_count("not-a-number"), "0");
        assert_eq!(format_count(""), "0");
    }

    #[test]
    fn revenue_floors_man_and_strips_trailing_zero() {
        assert_eq!(format_revenue(150_000_000.0), "1.5억");
        assert_eq!(format_revenue(100_000_000.0), "1억");
        assert_eq!(format_revenue(25_000.0), "2만");
        assert_eq!(format_revenue(29_999.0), "2만");
        assert_eq!(format_revenue(9_999.0), "9,999");
    }

    #[test]
    fn published_date_is_long_form_korean() {
        let dt = Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap();
        assert_eq!(format_published(dt), "2024년 5월 2일");
    }
}
