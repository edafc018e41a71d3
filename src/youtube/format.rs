//! Display helpers shared by the tools.

use chrono::{DateTime, Utc};

/// Format an integer with thousands separators (`1234567` → `1,234,567`).
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a count compactly (`1.2K`, `3.4M`, `5.6B`); small counts keep separators.
pub fn compact(n: u64) -> String {
    let n_f = n as f64;
    if n >= 1_000_000_000 {
        format!("{:.1}B", n_f / 1e9)
    } else if n >= 1_000_000 {
        format!("{:.1}M", n_f / 1e6)
    } else if n >= 1_000 {
        format!("{:.1}K", n_f / 1e3)
    } else {
        thousands(n)
    }
}

/// Truncate to `max_chars` characters, appending `...` when cut.
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

/// `YYYY-MM-DD`, or `Unknown`.
pub fn short_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Capitalise the first letter (`public` → `Public`).
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `[MM:SS]` timestamp; minutes are not wrapped into hours.
pub fn minute_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("[{:02}:{:02}]", total / 60, total % 60)
}

/// A parsed ISO 8601 duration as used by `contentDetails.duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsoDuration {
    pub total_seconds: u64,
}

impl IsoDuration {
    /// Parse `P[nD]T[nH][nM][nS]`. Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        let rest = raw.trim().strip_prefix('P')?;
        let (date_part, time_part) = match rest.split_once('T') {
            Some((d, t)) => (d, t),
            None => (rest, ""),
        };
        if date_part.is_empty() && time_part.is_empty() {
            return None;
        }

        const DATE_UNITS: &[(char, u64)] = &[('W', 604_800), ('D', 86_400)];
        const TIME_UNITS: &[(char, u64)] = &[('H', 3_600), ('M', 60), ('S', 1)];

        let mut total = 0u64;
        for (part, units) in [(date_part, DATE_UNITS), (time_part, TIME_UNITS)] {
            let mut number = String::new();
            for ch in part.chars() {
                if ch.is_ascii_digit() {
                    number.push(ch);
                    continue;
                }
                let &(_, factor) = units.iter().find(|(u, _)| *u == ch)?;
                let value: u64 = number.parse().ok()?;
                total = value.checked_mul(factor).and_then(|v| total.checked_add(v))?;
                number.clear();
            }
            if !number.is_empty() {
                return None;
            }
        }

        Some(Self { total_seconds: total })
    }

    pub fn minutes(&self) -> u64 {
        self.total_seconds / 60
    }

    /// The minutes shown next to the hours, e.g. 5 for `1h 5m 3s`.
    pub fn minute_component(&self) -> u64 {
        (self.total_seconds % 3600) / 60
    }
}

impl std::fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hours = self.total_seconds / 3600;
        let minutes = self.minute_component();
        let secs = self.total_seconds % 60;

        let mut parts = Vec::new();
        if hours > 0 {
            parts.push(format!("{}h", hours));
        }
        if minutes > 0 {
            parts.push(format!("{}m", minutes));
        }
        if secs > 0 || parts.is_empty() {
            parts.push(format!("{}s", secs));
        }
        write!(f, "{}", parts.join(" "))
    }
}

/// Human-readable duration, falling back to the raw value or `Unknown`.
pub fn display_duration(raw: Option<&str>) -> String {
    match raw {
        Some(r) => IsoDuration::parse(r)
            .map(|d| d.to_string())
            .unwrap_or_else(|| r.to_string()),
        None => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_compact() {
        assert_eq!(compact(950), "950");
        assert_eq!(compact(1_500), "1.5K");
        assert_eq!(compact(2_340_000), "2.3M");
        assert_eq!(compact(1_600_000_000), "1.6B");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("héllo wörld", 4), "héll...");
        assert_eq!(truncate("exact", 5), "exact");
    }

    #[test]
    fn test_iso_duration() {
        assert_eq!(IsoDuration::parse("PT4M13S").unwrap().total_seconds, 253);
        assert_eq!(IsoDuration::parse("PT1H").unwrap().minutes(), 60);
        assert_eq!(IsoDuration::parse("P1DT2H").unwrap().total_seconds, 93_600);
        assert_eq!(IsoDuration::parse("PT0S").unwrap().total_seconds, 0);
        assert!(IsoDuration::parse("4:13").is_none());
        assert!(IsoDuration::parse("P").is_none());
        assert!(IsoDuration::parse("PT5X").is_none());
        assert!(IsoDuration::parse("PT5").is_none());
    }

    #[test]
    fn test_iso_duration_overflow_is_rejected() {
        assert!(IsoDuration::parse("P99999999999999999W").is_none());
        assert!(IsoDuration::parse("P18446744073709551615DT1S").is_none());
        assert_eq!(display_duration(Some("P99999999999999999W")), "P99999999999999999W");
    }

    #[test]
    fn test_minute_component() {
        assert_eq!(IsoDuration::parse("PT1H5M3S").unwrap().minute_component(), 5);
        assert_eq!(IsoDuration::parse("PT2H").unwrap().minute_component(), 0);
        assert_eq!(IsoDuration::parse("PT45M").unwrap().minute_component(), 45);
    }

    #[test]
    fn test_display_duration() {
        assert_eq!(display_duration(Some("PT1H2M3S")), "1h 2m 3s");
        assert_eq!(display_duration(Some("PT4M")), "4m");
        assert_eq!(display_duration(Some("PT0S")), "0s");
        assert_eq!(display_duration(Some("weird")), "weird");
        assert_eq!(display_duration(None), "Unknown");
    }

    #[test]
    fn test_dates_and_timestamps() {
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        assert_eq!(short_date(Some(date)), "2024-03-09");
        assert_eq!(short_date(None), "Unknown");
        assert_eq!(minute_timestamp(75.9), "[01:15]");
        assert_eq!(minute_timestamp(3725.0), "[62:05]");
        assert_eq!(capitalize("public"), "Public");
        assert_eq!(capitalize(""), "");
    }
}
