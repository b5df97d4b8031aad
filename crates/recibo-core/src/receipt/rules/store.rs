//! Store name matching against the known-merchant alias registry.

use lazy_static::lazy_static;
use regex::Regex;

use super::FieldExtractor;

/// Header lines that are never a merchant name.
const GENERIC_HEADERS: [&str; 4] = [
    "RECEIPT",
    "TRANSACTION RECORD",
    "CUSTOMER COPY",
    "MERCHANT COPY",
];

/// A known-merchant alias: trigger phrases mapped to a canonical name.
#[derive(Debug)]
pub struct MerchantAlias {
    /// Canonical display name returned on a match.
    pub canonical: &'static str,

    /// Uppercase literal phrases matched as case-insensitive substrings.
    pub triggers: &'static [&'static str],

    /// Fuzzy pattern tolerating OCR character confusion.
    pub fuzzy: Option<Regex>,

    /// Scan across the entire transcript before the ordinary per-line
    /// pass. Set for merchants whose name appears inconsistently within
    /// receipts rather than at the top.
    pub whole_text: bool,

    /// Report the matched receipt line verbatim instead of the canonical
    /// name (co-branded stores where the printed banner varies).
    pub use_source_line: bool,
}

impl MerchantAlias {
    fn literal(canonical: &'static str, triggers: &'static [&'static str]) -> Self {
        Self {
            canonical,
            triggers,
            fuzzy: None,
            whole_text: false,
            use_source_line: false,
        }
    }

    /// Test a single receipt line against this alias.
    pub fn matches(&self, line: &str) -> bool {
        let upper = line.to_uppercase();
        if self.triggers.iter().any(|t| upper.contains(t)) {
            return true;
        }
        self.fuzzy.as_ref().is_some_and(|re| re.is_match(line))
    }

    /// Resolve the display name for a matched line.
    pub fn resolve(&self, line: &str) -> String {
        if self.use_source_line {
            line.trim().to_string()
        } else {
            self.canonical.to_string()
        }
    }
}

lazy_static! {
    /// Process-wide merchant alias registry, read-only at runtime.
    pub static ref MERCHANT_ALIASES: Vec<MerchantAlias> = vec![
        // "Hmart" is frequently misread with H/G confusion by OCR
        MerchantAlias {
            canonical: "Hmart",
            triggers: &["HMART"],
            fuzzy: Some(Regex::new(r"(?i)\b[hg]mart\b").unwrap()),
            whole_text: true,
            use_source_line: false,
        },
        // Ferry receipts bury the operator name mid-transcript
        MerchantAlias {
            canonical: "BC Ferries",
            triggers: &["BC FERRIES"],
            fuzzy: Some(Regex::new(r"(?i)bc\s*ferries").unwrap()),
            whole_text: true,
            use_source_line: false,
        },
        MerchantAlias::literal("Costco", &["COSTCO WHOLESALE", "COSTCO"]),
        MerchantAlias::literal("Walmart", &["WALMART"]),
        MerchantAlias::literal("Save-On-Foods", &["SAVE-ON-FOODS", "SAVE ON FOODS"]),
        MerchantAlias::literal("London Drugs", &["LONDON DRUGS LIMITED", "LONDON DRUGS"]),
        MerchantAlias::literal("Superstore", &["SUPERSTORE"]),
        MerchantAlias::literal("Pharmasave", &["PHARMASAVE"]),
        MerchantAlias::literal("Canadian Tire", &["CANADIAN TIRE", "TRIANGLE"]),
        MerchantAlias::literal("Old Navy", &["OLD NAVY"]),
        MerchantAlias::literal("Petro-Canada", &["PETRO-CANADA", "PETRO CANADA"]),
        // Co-branded banner varies per location; keep the printed line
        MerchantAlias {
            canonical: "Carter's OshKosh",
            triggers: &["CARTER", "OSHKOSH"],
            fuzzy: None,
            whole_text: false,
            use_source_line: true,
        },
    ];
}

/// Store name matcher.
pub struct StoreNameMatcher {
    scan_limit: Option<usize>,
}

impl StoreNameMatcher {
    pub fn new() -> Self {
        Self { scan_limit: None }
    }

    /// Cap the number of lines scanned in the ordinary per-line alias
    /// pass. High-priority aliases always see the whole transcript.
    pub fn with_scan_limit(mut self, limit: Option<usize>) -> Self {
        self.scan_limit = limit;
        self
    }
}

impl Default for StoreNameMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for StoreNameMatcher {
    type Output = String;

    /// Full priority match: whole-text aliases, then the per-line alias
    /// scan, then the generic-header fallback, then the first non-empty
    /// line. Total over any string input.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        if lines.is_empty() {
            return None;
        }

        // High-priority aliases see every line before anything else
        for alias in MERCHANT_ALIASES.iter().filter(|a| a.whole_text) {
            for line in &lines {
                if alias.matches(line) {
                    return Some(alias.resolve(line));
                }
            }
        }

        // Ordinary pass: line order first, then registry order
        let limit = self.scan_limit.unwrap_or(lines.len());
        for line in lines.iter().take(limit) {
            for alias in MERCHANT_ALIASES.iter().filter(|a| !a.whole_text) {
                if alias.matches(line) {
                    return Some(alias.resolve(line));
                }
            }
        }

        // Fallback: first line that is not a generic header and is long
        // enough to be a name
        for line in &lines {
            let upper = line.to_uppercase();
            if !GENERIC_HEADERS.contains(&upper.as_str()) && line.chars().count() > 2 {
                return Some((*line).to_string());
            }
        }

        // Last resort: whatever the transcript starts with
        lines.first().map(|l| (*l).to_string())
    }

    /// All alias hits in scan order, without the fallback steps.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let mut results = Vec::new();

        for alias in MERCHANT_ALIASES.iter().filter(|a| a.whole_text) {
            for line in &lines {
                if alias.matches(line) {
                    let name = alias.resolve(line);
                    if !results.contains(&name) {
                        results.push(name);
                    }
                    break;
                }
            }
        }

        for line in &lines {
            for alias in MERCHANT_ALIASES.iter().filter(|a| !a.whole_text) {
                if alias.matches(line) {
                    let name = alias.resolve(line);
                    if !results.contains(&name) {
                        results.push(name);
                    }
                }
            }
        }

        results
    }
}

/// Extract the store name from receipt text with default settings.
pub fn extract_store_name(text: &str) -> Option<String> {
    StoreNameMatcher::new().extract(text)
}
