//! Log line parser.
//!
//! Turns `"<timestamp>: <STATUS>: <message>"` lines into [`Event`]s. Lines
//! that don't have that shape are skipped, never reported as errors.

use chrono::{Local, NaiveDateTime, Weekday};

use crate::model::{Event, Status};

/// Status tokens accepted between the timestamp and the message, in match order.
pub const STATUS_TOKENS: [&str; 10] = [
    "PASS",
    "FAIL",
    "PARTIAL",
    "INFO",
    "VERIFICATION PASSED",
    "VERIFICATION FAILED",
    "NFS VERIFICATION PASSED",
    "NFS VERIFICATION FAILED",
    "YUM REPO VERIFICATION PASSED",
    "YUM REPO VERIFICATION FAILED",
];

/// `Wed Jan 02 15:04:05 UTC 2024` with the weekday already stripped.
const VERBOSE_FORMAT: &str = "%b %d %H:%M:%S %Z %Y";
const ISO_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Collapse a raw status token into one of the four normalized statuses.
///
/// Returns `None` for tokens outside [`STATUS_TOKENS`].
pub fn normalize_status(token: &str) -> Option<Status> {
    if !STATUS_TOKENS.contains(&token) {
        return None;
    }
    if token.contains("PASSED") {
        Some(Status::Pass)
    } else if token.contains("FAILED") {
        Some(Status::Fail)
    } else {
        token.parse().ok()
    }
}

/// Parse a timestamp in either supported format.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    parse_verbose_timestamp(text)
        .or_else(|| NaiveDateTime::parse_from_str(text, ISO_FORMAT).ok())
}

/// `date(1)` style timestamps. The weekday is checked for shape only, so a
/// weekday that disagrees with the date still parses.
fn parse_verbose_timestamp(text: &str) -> Option<NaiveDateTime> {
    let (weekday, rest) = text.split_once(char::is_whitespace)?;
    if weekday.len() != 3 || weekday.parse::<Weekday>().is_err() {
        return None;
    }
    NaiveDateTime::parse_from_str(rest.trim_start(), VERBOSE_FORMAT).ok()
}

/// The three raw fields of a line that has the expected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawFields<'a> {
    timestamp: &'a str,
    token: &'a str,
    message: &'a str,
}

/// Split a trimmed line at the first `": <TOKEN>: "` separator.
///
/// The timestamp needs at least one character, the separators at least one
/// whitespace character each, and the message must be non-empty.
fn split_fields(line: &str) -> Option<RawFields<'_>> {
    for (idx, _) in line.match_indices(':') {
        if idx == 0 {
            continue;
        }
        let after_colon = &line[idx + 1..];
        let Some(after_ws) = strip_whitespace(after_colon) else {
            continue;
        };
        for token in STATUS_TOKENS {
            let Some(rest) = after_ws.strip_prefix(token) else {
                continue;
            };
            let Some(rest) = rest.strip_prefix(':') else {
                continue;
            };
            let Some(message) = strip_whitespace(rest) else {
                continue;
            };
            if message.is_empty() {
                continue;
            }
            return Some(RawFields {
                timestamp: &line[..idx],
                token,
                message,
            });
        }
    }
    None
}

/// Strip one or more leading whitespace characters; `None` if there were none.
fn strip_whitespace(s: &str) -> Option<&str> {
    let stripped = s.trim_start();
    (stripped.len() < s.len()).then_some(stripped)
}

/// Parse one log line, using the current local time when the timestamp
/// can't be read.
pub fn parse_line(line_number: usize, line: &str) -> Option<Event> {
    parse_line_at(line_number, line, Local::now().naive_local())
}

/// Parse one log line with an explicit fallback timestamp.
pub fn parse_line_at(line_number: usize, line: &str, fallback: NaiveDateTime) -> Option<Event> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let fields = split_fields(line)?;
    let status = normalize_status(fields.token)?;

    let (timestamp, timestamp_fallback) = match parse_timestamp(fields.timestamp) {
        Some(ts) => (ts, false),
        None => {
            tracing::debug!(
                line = line_number,
                raw = fields.timestamp,
                "unparseable timestamp, using fallback"
            );
            (fallback, true)
        }
    };

    Some(Event {
        line_number,
        timestamp,
        timestamp_fallback,
        status,
        message: fields.message.trim().to_string(),
    })
}

/// Result of parsing a whole log.
#[derive(Debug, Clone, Default)]
pub struct ParsedLog {
    /// Valid events in file order.
    pub events: Vec<Event>,
    /// Non-blank lines that did not match the expected shape.
    pub skipped_lines: usize,
}

/// Parse every line of a log. All fallback timestamps share one wall-clock reading.
pub fn parse_log(content: &str) -> ParsedLog {
    parse_log_at(content, Local::now().naive_local())
}

/// Parse every line of a log with an explicit fallback timestamp.
pub fn parse_log_at(content: &str, fallback: NaiveDateTime) -> ParsedLog {
    let mut parsed = ParsedLog::default();
    for (idx, line) in content.lines().enumerate() {
        let line_number = idx + 1;
        match parse_line_at(line_number, line, fallback) {
            Some(event) => parsed.events.push(event),
            None if line.trim().is_empty() => {}
            None => {
                tracing::debug!(line = line_number, "skipping unrecognized line");
                parsed.skipped_lines += 1;
            }
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fallback() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1999, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap()
    }

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, ss)
            .unwrap()
    }

    #[test]
    fn parse_verbose_timestamp_line() {
        let event = parse_line_at(
            1,
            "Mon Jan 01 10:00:00 UTC 2024: FAIL: user sally exists check",
            fallback(),
        )
        .unwrap();
        assert_eq!(event.line_number, 1);
        assert_eq!(event.timestamp, at(2024, 1, 1, 10, 0, 0));
        assert!(!event.timestamp_fallback);
        assert_eq!(event.status, Status::Fail);
        assert_eq!(event.message, "user sally exists check");
    }

    #[test]
    fn parse_iso_timestamp_line() {
        let event = parse_line_at(7, "2024-03-05 08:09:10: PASS: fstab entry present", fallback())
            .unwrap();
        assert_eq!(event.timestamp, at(2024, 3, 5, 8, 9, 10));
        assert_eq!(event.status, Status::Pass);
    }

    #[test]
    fn weekday_mismatch_still_parses() {
        // Jan 02 2024 was a Tuesday.
        let ts = parse_timestamp("Wed Jan 02 15:04:05 UTC 2024").unwrap();
        assert_eq!(ts, at(2024, 1, 2, 15, 4, 5));
    }

    #[test]
    fn other_timezone_abbreviations_parse() {
        assert!(parse_timestamp("Tue Feb 13 09:30:00 EST 2024").is_some());
    }

    #[test]
    fn unparseable_timestamp_falls_back() {
        let event = parse_line_at(3, "yesterday-ish: PASS: nfs mount of shares ok", fallback())
            .unwrap();
        assert_eq!(event.timestamp, fallback());
        assert!(event.timestamp_fallback);
        assert_eq!(event.status, Status::Pass);
    }

    #[test]
    fn verification_tokens_normalize() {
        let cases = [
            ("VERIFICATION PASSED", Status::Pass),
            ("VERIFICATION FAILED", Status::Fail),
            ("NFS VERIFICATION PASSED", Status::Pass),
            ("NFS VERIFICATION FAILED", Status::Fail),
            ("YUM REPO VERIFICATION PASSED", Status::Pass),
            ("YUM REPO VERIFICATION FAILED", Status::Fail),
            ("PARTIAL", Status::Partial),
            ("INFO", Status::Info),
        ];
        for (token, expected) in cases {
            let line = format!("2024-01-01 00:00:00: {token}: lab done");
            let event = parse_line_at(1, &line, fallback()).unwrap();
            assert_eq!(event.status, expected, "token {token}");
        }
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert_eq!(normalize_status("WARN"), None);
        assert_eq!(normalize_status("pass"), None);
        assert!(parse_line_at(1, "2024-01-01 00:00:00: WARN: disk low", fallback()).is_none());
        assert!(parse_line_at(1, "2024-01-01 00:00:00: pass: lowercase", fallback()).is_none());
    }

    #[test]
    fn blank_and_malformed_lines_are_skipped() {
        assert!(parse_line_at(1, "", fallback()).is_none());
        assert!(parse_line_at(2, "   \t ", fallback()).is_none());
        assert!(parse_line_at(3, "Mon Jan 01 10:00:00 UTC 2024 PASS user exists", fallback())
            .is_none());
        assert!(parse_line_at(4, ": PASS: no timestamp", fallback()).is_none());
        assert!(parse_line_at(5, "2024-01-01 00:00:00: PASS:", fallback()).is_none());
    }

    #[test]
    fn timestamp_ends_at_first_separator() {
        let event = parse_line_at(
            1,
            "2024-01-01 00:00:00: INFO: checking: PASS: nested",
            fallback(),
        )
        .unwrap();
        assert_eq!(event.status, Status::Info);
        assert_eq!(event.message, "checking: PASS: nested");
    }

    #[test]
    fn extra_whitespace_around_separators() {
        let event =
            parse_line_at(1, "  2024-01-01 00:00:00:   PASS:   repo configured  ", fallback())
                .unwrap();
        assert_eq!(event.timestamp, at(2024, 1, 1, 0, 0, 0));
        assert_eq!(event.message, "repo configured");
    }

    #[test]
    fn parse_log_counts_skipped_lines() {
        let content = "\
Mon Jan 01 10:00:00 UTC 2024: FAIL: user sally exists check

garbage without separators
Mon Jan 01 10:05:00 UTC 2024: PASS: user sally exists check
";
        let parsed = parse_log_at(content, fallback());
        assert_eq!(parsed.events.len(), 2);
        assert_eq!(parsed.skipped_lines, 1);
        assert_eq!(parsed.events[1].line_number, 4);
    }
}
