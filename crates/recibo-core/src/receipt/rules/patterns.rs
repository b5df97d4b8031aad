//! Common regex patterns for receipt field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Amount patterns
    pub static ref CURRENCY_AMOUNT: Regex = Regex::new(
        r"(\$|CAD)\s?([\d,]+\.\d{2})"
    ).unwrap();

    pub static ref BARE_AMOUNT: Regex = Regex::new(
        r"([\d,]+\.\d{2})"
    ).unwrap();

    // Timestamp lines, checked before any structural date scan
    pub static ref FULL_TIMESTAMP: Regex = Regex::new(
        r"\b(\d{4})/(\d{1,2})/(\d{1,2})\s+\d{1,2}:\d{2}:\d{2}"
    ).unwrap();

    pub static ref SHORT_TIMESTAMP: Regex = Regex::new(
        r"\b(\d{1,2})/(\d{1,2})/(\d{2})\s+\d{1,2}:\d{2}"
    ).unwrap();

    // Structural date patterns, in decreasing priority
    pub static ref DATE_ISO: Regex = Regex::new(
        r"\b(\d{4})-(\d{2})-(\d{2})(?: \d{2}:\d{2})?"
    ).unwrap();

    pub static ref DATE_SLASH_YMD: Regex = Regex::new(
        r"\b(\d{4})/(\d{1,2})/(\d{1,2})\b"
    ).unwrap();

    pub static ref DATE_SLASH_MDY: Regex = Regex::new(
        r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b"
    ).unwrap();

    pub static ref DATE_SLASH_MDY_SHORT: Regex = Regex::new(
        r"\b(\d{1,2})/(\d{1,2})/(\d{2})\b"
    ).unwrap();

    // e.g. "02 Sep 2025"
    pub static ref DATE_DAY_MON_YEAR: Regex = Regex::new(
        r"\b(\d{1,2}) ([A-Za-z]{3}) (\d{4})\b"
    ).unwrap();

    // e.g. "Aug31'25" or "Aug 31'25"
    pub static ref DATE_MON_DAY_APOS: Regex = Regex::new(
        r"([A-Za-z]{3})\s?(\d{1,2})'(\d{2})"
    ).unwrap();
}
