//! Helper functions for description sanitization, date formatting, and
//! logging.
//!
//! The sanitization rules exist because aggregator feeds (Hacker News in
//! particular) embed metadata lines such as `Points:` and `Comments:` in the
//! entry summary; those lines are noise in an email digest and are stripped
//! before the description reaches the pipeline.

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

/// Line prefixes identifying aggregator metadata inside feed summaries.
/// Matching is case-sensitive against the trimmed line.
const METADATA_PREFIXES: [&str; 5] = [
    "Article URL:",
    "Comments URL:",
    "Points:",
    "# Comments:",
    "Comments:",
];

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Brazilian Portuguese month names, indexed by `month0`.
const MONTHS_PT: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Sanitize a raw feed summary into a single digest-ready line.
///
/// Splits the input into lines, drops empty lines and any line carrying an
/// aggregator-metadata prefix, joins the survivors with single spaces,
/// collapses whitespace runs, and truncates the result to 300 characters.
///
/// # Examples
///
/// ```ignore
/// let raw = "Points: 50\nComments: 3\nReal content here";
/// assert_eq!(clean_description(raw), "Real content here");
/// ```
pub fn clean_description(raw: &str) -> String {
    let joined = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !METADATA_PREFIXES.iter().any(|p| line.starts_with(p)))
        .join(" ");
    let collapsed = WHITESPACE.replace_all(&joined, " ");
    collapsed.trim().chars().take(300).collect()
}

/// Format a date the way the digest subject and header expect it,
/// e.g. `7 de Agosto de 2026`.
pub fn format_date_pt(date: NaiveDate) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        MONTHS_PT[date.month0() as usize],
        date.year()
    )
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at a character boundary with an ellipsis and byte
/// count appended, so a malformed LLM response can be previewed in a log
/// line without flooding it.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let prefix: String = s.chars().take(max).collect();
    format!("{}…(+{} bytes)", prefix, s.len() - prefix.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_description_strips_aggregator_metadata() {
        let raw = "Points: 50\nComments: 3\nArticle URL: http://x\nReal content here";
        assert_eq!(clean_description(raw), "Real content here");
    }

    #[test]
    fn test_clean_description_strips_all_known_prefixes() {
        let raw = "Article URL: https://a\nComments URL: https://b\nPoints: 12\n# Comments: 4\nBody";
        assert_eq!(clean_description(raw), "Body");
    }

    #[test]
    fn test_clean_description_joins_surviving_lines() {
        let raw = "First line\n\nSecond   line\n   Third line   ";
        assert_eq!(clean_description(raw), "First line Second line Third line");
    }

    #[test]
    fn test_clean_description_prefix_match_is_case_sensitive() {
        // Lowercase "points:" is ordinary content, not metadata.
        let raw = "points: a scoring explainer";
        assert_eq!(clean_description(raw), "points: a scoring explainer");
    }

    #[test]
    fn test_clean_description_caps_at_300_chars() {
        let raw = "a".repeat(500);
        let cleaned = clean_description(&raw);
        assert_eq!(cleaned.chars().count(), 300);
    }

    #[test]
    fn test_clean_description_empty_input() {
        assert_eq!(clean_description(""), "");
        assert_eq!(clean_description("Points: 99\n# Comments: 1"), "");
    }

    #[test]
    fn test_format_date_pt() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(format_date_pt(date), "7 de Agosto de 2026");

        let january = NaiveDate::from_ymd_opt(2027, 1, 15).unwrap();
        assert_eq!(format_date_pt(january), "15 de Janeiro de 2027");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("short", 100), "short");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte_boundary() {
        let s = "é".repeat(10);
        let result = truncate_for_log(&s, 4);
        assert!(result.starts_with("éééé"));
    }
}
