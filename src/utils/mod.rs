// Tue Oct 13 2026 - Alex

pub mod logging;
pub mod process;

pub use logging::{LoggingUtils, ScopedTimer};
pub use process::ProcessUtils;

use std::net::{IpAddr, Ipv6Addr};
use std::time::Duration;

pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs_f64();

    if total_secs < 0.001 {
        format!("{}µs", duration.as_micros())
    } else if total_secs < 1.0 {
        format!("{}ms", duration.as_millis())
    } else if total_secs < 60.0 {
        format!("{:.2}s", total_secs)
    } else {
        let mins = (total_secs / 60.0).floor();
        let secs = total_secs % 60.0;
        format!("{:.0}m {:.1}s", mins, secs)
    }
}

pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len >= 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Turns an arbitrary target string into something safe to embed in a file name.
pub fn sanitize_file_component(s: &str) -> String {
    let cleaned: String = s
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' { c } else { '_' })
        .collect();

    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        "target".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Collapses line breaks so a message fits on a single output line.
pub fn single_line(s: &str) -> String {
    s.split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses an IP literal. IPv6 may be wrapped in exactly one pair of brackets.
pub fn parse_ip_literal(s: &str) -> Option<IpAddr> {
    match s.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        Some(inner) => inner.parse::<Ipv6Addr>().ok().map(IpAddr::V6),
        None => s.parse::<IpAddr>().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30.0s");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "module", "modules"), "1 module");
        assert_eq!(pluralize(3, "module", "modules"), "3 modules");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a much longer string", 10), "a much ...");
    }

    #[test]
    fn test_sanitize_file_component() {
        assert_eq!(sanitize_file_component("example.com"), "example.com");
        assert_eq!(sanitize_file_component("10.0.0.1:8080"), "10.0.0.1_8080");
        assert_eq!(sanitize_file_component("../../etc"), "_.._etc");
        assert_eq!(sanitize_file_component("   "), "target");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("first\n  second\r\n\nthird"), "first second third");
        assert_eq!(single_line("plain"), "plain");
    }

    #[test]
    fn test_parse_ip_literal() {
        assert_eq!(parse_ip_literal("10.0.0.1"), Some("10.0.0.1".parse().unwrap()));
        assert_eq!(parse_ip_literal("[2001:db8::1]"), Some("2001:db8::1".parse().unwrap()));
        assert_eq!(parse_ip_literal("::1"), Some("::1".parse().unwrap()));

        for bad in ["[10.0.0.1", "10.0.0.1]", "[10.0.0.1]", "[[[::1]]", "[::1", "::1]", "[]", "example.com"] {
            assert!(parse_ip_literal(bad).is_none(), "{:?} should not parse", bad);
        }
    }
}
