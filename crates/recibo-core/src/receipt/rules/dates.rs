//! Transaction date extraction for receipt text.

use regex::Regex;

use super::FieldExtractor;
use super::patterns::{
    DATE_DAY_MON_YEAR, DATE_ISO, DATE_MON_DAY_APOS, DATE_SLASH_MDY, DATE_SLASH_MDY_SHORT,
    DATE_SLASH_YMD, FULL_TIMESTAMP, SHORT_TIMESTAMP,
};
use crate::models::config::DateStyle;

/// Source pattern a date candidate was matched by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    /// `YYYY/M/D HH:MM:SS` line.
    FullTimestamp,
    /// `M/D/YY HH:MM` line.
    ShortTimestamp,
    /// `YYYY-MM-DD`, optionally with ` HH:MM`.
    Iso,
    /// `YYYY/M/D`.
    SlashYmd,
    /// `M/D/YYYY`.
    SlashMdy,
    /// `M/D/YY`.
    SlashMdyShort,
    /// `DD Mon YYYY`, e.g. "02 Sep 2025".
    DayMonYear,
    /// `Mon D'YY`, e.g. "Aug31'25".
    MonDayApos,
}

/// A parsed calendar date candidate, scoped to one extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCandidate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Pattern that produced this candidate.
    pub pattern: DatePattern,
    /// Zero-based line index in the transcript.
    pub line: usize,
    /// Matched date text, two-digit years already expanded.
    raw: String,
}

impl DateCandidate {
    /// Render the candidate per the configured output style.
    ///
    /// Timestamp-line matches keep their original slash style under
    /// [`DateStyle::AsMatched`]; every structural-scan match is normalized
    /// to `YYYY-MM-DD` either way.
    pub fn render(&self, style: DateStyle) -> String {
        match (style, self.pattern) {
            (
                DateStyle::AsMatched,
                DatePattern::FullTimestamp | DatePattern::ShortTimestamp,
            ) => self.raw.clone(),
            _ => format!("{:04}-{:02}-{:02}", self.year, self.month, self.day),
        }
    }
}

/// Date field extractor.
pub struct DateExtractor {
    style: DateStyle,
}

impl DateExtractor {
    pub fn new() -> Self {
        Self {
            style: DateStyle::AsMatched,
        }
    }

    /// Set the output style used by [`extract_display`](Self::extract_display).
    pub fn with_style(mut self, style: DateStyle) -> Self {
        self.style = style;
        self
    }

    /// Extract and render the transaction date.
    pub fn extract_display(&self, text: &str) -> Option<String> {
        self.extract(text).map(|c| c.render(self.style))
    }

    /// Timestamp lines carry both a date and a time of sale and are the
    /// most reliable signal, so they pre-empt the structural scan.
    /// Timestamp candidates are not range-validated: the two-digit pivot
    /// may legitimately produce a 19xx year here.
    fn scan_timestamp_lines(&self, text: &str) -> Option<DateCandidate> {
        for (line_idx, line) in text.lines().enumerate() {
            if let Some(caps) = FULL_TIMESTAMP.captures(line) {
                return Some(DateCandidate {
                    year: caps[1].parse().unwrap_or(0),
                    month: caps[2].parse().unwrap_or(0),
                    day: caps[3].parse().unwrap_or(0),
                    pattern: DatePattern::FullTimestamp,
                    line: line_idx,
                    raw: format!("{}/{}/{}", &caps[1], &caps[2], &caps[3]),
                });
            }
        }

        for (line_idx, line) in text.lines().enumerate() {
            if let Some(caps) = SHORT_TIMESTAMP.captures(line) {
                let year = expand_two_digit_year(caps[3].parse().unwrap_or(0));
                return Some(DateCandidate {
                    year,
                    month: caps[1].parse().unwrap_or(0),
                    day: caps[2].parse().unwrap_or(0),
                    pattern: DatePattern::ShortTimestamp,
                    line: line_idx,
                    raw: format!("{}/{}/{}", &caps[1], &caps[2], year),
                });
            }
        }

        None
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = DateCandidate;

    /// Full priority chain: timestamp lines first, then the structural
    /// whole-text scan. Total over any string input.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.scan_timestamp_lines(text)
            .or_else(|| self.extract_all(text).into_iter().next())
    }

    /// All range-valid structural-scan candidates, in pattern priority
    /// order and text order within a pattern. Timestamp-line matches are
    /// not included here.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let patterns: [(&Regex, DatePattern); 6] = [
            (&DATE_ISO, DatePattern::Iso),
            (&DATE_SLASH_YMD, DatePattern::SlashYmd),
            (&DATE_SLASH_MDY, DatePattern::SlashMdy),
            (&DATE_SLASH_MDY_SHORT, DatePattern::SlashMdyShort),
            (&DATE_DAY_MON_YEAR, DatePattern::DayMonYear),
            (&DATE_MON_DAY_APOS, DatePattern::MonDayApos),
        ];

        let mut results = Vec::new();

        for (regex, pattern) in patterns {
            for caps in regex.captures_iter(text) {
                let Some(candidate) = build_candidate(text, &caps, pattern) else {
                    continue;
                };

                // Invalid candidates are discarded, not surfaced
                if !in_range(candidate.year, candidate.month, candidate.day) {
                    continue;
                }

                if results.iter().any(|r: &DateCandidate| {
                    r.year == candidate.year && r.month == candidate.month && r.day == candidate.day
                }) {
                    continue;
                }

                results.push(candidate);
            }
        }

        results
    }
}

fn build_candidate(
    text: &str,
    caps: &regex::Captures<'_>,
    pattern: DatePattern,
) -> Option<DateCandidate> {
    let full_match = caps.get(0)?;
    let line = text[..full_match.start()].matches('\n').count();
    let raw = full_match.as_str().to_string();

    let (year, month, day) = match pattern {
        DatePattern::Iso | DatePattern::SlashYmd => (
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        ),
        DatePattern::SlashMdy => (
            caps[3].parse().ok()?,
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
        ),
        DatePattern::SlashMdyShort => (
            expand_two_digit_year(caps[3].parse().ok()?),
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
        ),
        DatePattern::DayMonYear => (
            caps[3].parse().ok()?,
            month_abbr_to_number(&caps[2])?,
            caps[1].parse().ok()?,
        ),
        DatePattern::MonDayApos => (
            2000 + caps[3].parse::<i32>().ok()?,
            month_abbr_to_number(&caps[1])?,
            caps[2].parse().ok()?,
        ),
        DatePattern::FullTimestamp | DatePattern::ShortTimestamp => return None,
    };

    Some(DateCandidate {
        year,
        month,
        day,
        pattern,
        line,
        raw,
    })
}

/// Structural-scan candidates must look like a plausible receipt date.
fn in_range(year: i32, month: u32, day: u32) -> bool {
    (2000..=2100).contains(&year) && (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// Two-digit year pivot: values up to 30 read as 20xx, the rest as 19xx.
fn expand_two_digit_year(year: i32) -> i32 {
    if year <= 30 { 2000 + year } else { 1900 + year }
}

fn month_abbr_to_number(month: &str) -> Option<u32> {
    match month.to_lowercase().as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

/// Extract the transaction date from receipt text with default settings.
pub fn extract_date(text: &str) -> Option<String> {
    DateExtractor::new().extract_display(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_timestamp_line() {
        let text = "COSTCO\n2024/01/15 10:32:01\nTOTAL 45.67";
        assert_eq!(extract_date(text), Some("2024/01/15".to_string()));
    }

    #[test]
    fn test_short_timestamp_recent_year() {
        let text = "01/15/24 10:32";
        assert_eq!(extract_date(text), Some("01/15/2024".to_string()));
    }

    #[test]
    fn test_short_timestamp_pivot_to_1900s() {
        let text = "01/15/95 10:32";
        assert_eq!(extract_date(text), Some("01/15/1995".to_string()));
    }

    #[test]
    fn test_timestamp_beats_structural_scan() {
        // An ISO date earlier in the transcript loses to a timestamp line
        let text = "2023-05-05\n2024/01/15 10:32:01";
        assert_eq!(extract_date(text), Some("2024/01/15".to_string()));
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(
            extract_date("Visit us at example.com\n2024-01-15"),
            Some("2024-01-15".to_string())
        );
    }

    #[test]
    fn test_iso_date_with_time() {
        assert_eq!(
            extract_date("2024-01-15 10:32"),
            Some("2024-01-15".to_string())
        );
    }

    #[test]
    fn test_slash_ymd_normalized() {
        assert_eq!(extract_date("2024/1/5"), Some("2024-01-05".to_string()));
    }

    #[test]
    fn test_slash_mdy_normalized() {
        assert_eq!(extract_date("01/15/2024"), Some("2024-01-15".to_string()));
    }

    #[test]
    fn test_slash_mdy_short_pivot() {
        assert_eq!(extract_date("12/31/24"), Some("2024-12-31".to_string()));
    }

    #[test]
    fn test_slash_mdy_short_out_of_range_discarded() {
        // The pivot maps 95 to 1995, which fails the scan-path range check
        assert_eq!(extract_date("12/31/95"), None);
    }

    #[test]
    fn test_day_mon_year() {
        assert_eq!(extract_date("02 Sep 2025"), Some("2025-09-02".to_string()));
    }

    #[test]
    fn test_mon_day_apostrophe() {
        assert_eq!(extract_date("Aug31'25"), Some("2025-08-31".to_string()));
        assert_eq!(extract_date("Aug 31'25"), Some("2025-08-31".to_string()));
    }

    #[test]
    fn test_invalid_candidates_discarded() {
        assert_eq!(extract_date("99/99/2024"), None);
        assert_eq!(
            extract_date("99/99/2024\n2024-01-15"),
            Some("2024-01-15".to_string())
        );
    }

    #[test]
    fn test_iso_style_normalizes_timestamps() {
        let extractor = DateExtractor::new().with_style(DateStyle::Iso);
        assert_eq!(
            extractor.extract_display("2024/01/15 10:32:01"),
            Some("2024-01-15".to_string())
        );
        assert_eq!(
            extractor.extract_display("01/15/24 10:32"),
            Some("2024-01-15".to_string())
        );
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(extract_date(""), None);
        assert_eq!(extract_date("no dates here"), None);
    }

    #[test]
    fn test_extract_all_dedupes() {
        let extractor = DateExtractor::new();
        let candidates = extractor.extract_all("2024-01-15\n2024/1/15");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].pattern, DatePattern::Iso);
    }
}
