//! Total amount extraction for receipt text.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::FieldExtractor;
use super::patterns::{BARE_AMOUNT, CURRENCY_AMOUNT};
use crate::models::config::AmountConfig;
use crate::models::receipt::Money;

/// A decimal value found in the transcript, with its source context.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountCandidate {
    /// Parsed value, thousands separators stripped.
    pub value: Decimal,
    /// Zero-based index of the source line among non-empty lines.
    pub line: usize,
    /// Matched context: a currency marker or keyword, when present.
    pub context: Option<String>,
}

/// Total amount extractor.
pub struct AmountExtractor {
    keyword_tiers: Vec<Vec<String>>,
    currency: String,
}

impl AmountExtractor {
    pub fn new() -> Self {
        let config = AmountConfig::default();
        Self {
            keyword_tiers: config.keyword_tiers,
            currency: config.currency,
        }
    }

    /// Replace the keyword tiers (priority order preserved).
    pub fn with_keyword_tiers(mut self, tiers: Vec<Vec<String>>) -> Self {
        self.keyword_tiers = tiers;
        self
    }

    /// Set the currency label for the normalized output.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Extract the grand total.
    ///
    /// Keyword tiers are tried in priority order; within a tier the last
    /// matching line wins, because receipts restate the total near the
    /// bottom. When no keyword line yields a value, falls back to the
    /// largest decimal found anywhere in the transcript. The fallback is a
    /// known heuristic limitation: with no two-decimal keyword amount
    /// present it can pick up non-monetary numbers.
    pub fn extract_total(&self, text: &str) -> Option<Money> {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

        for tier in &self.keyword_tiers {
            let mut hit: Option<Decimal> = None;
            for line in &lines {
                let lower = line.to_lowercase();
                if tier.iter().any(|kw| lower.contains(kw.as_str())) {
                    if let Some(value) = first_amount_on_line(line) {
                        hit = Some(value);
                    }
                }
            }
            if let Some(value) = hit {
                return Some(Money::new(&self.currency, value));
            }
        }

        self.extract_all(text)
            .into_iter()
            .map(|c| c.value)
            .max()
            .map(|value| Money::new(&self.currency, value))
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = AmountCandidate;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Every decimal-looking token in the transcript, currency-marked
    /// matches first per line, then bare decimals. Malformed tokens are
    /// skipped, not surfaced.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<AmountCandidate> = Vec::new();

        for (line_idx, line) in text.lines().filter(|l| !l.trim().is_empty()).enumerate() {
            for caps in CURRENCY_AMOUNT.captures_iter(line) {
                if let Some(value) = parse_amount(&caps[2]) {
                    results.push(AmountCandidate {
                        value,
                        line: line_idx,
                        context: Some(caps[1].to_string()),
                    });
                }
            }

            for caps in BARE_AMOUNT.captures_iter(line) {
                if let Some(value) = parse_amount(&caps[1]) {
                    // Skip tokens already collected with a currency marker
                    if results
                        .iter()
                        .any(|c| c.line == line_idx && c.value == value)
                    {
                        continue;
                    }
                    results.push(AmountCandidate {
                        value,
                        line: line_idx,
                        context: None,
                    });
                }
            }
        }

        results
    }
}

/// First decimal token on a keyword line.
fn first_amount_on_line(line: &str) -> Option<Decimal> {
    BARE_AMOUNT
        .captures(line)
        .and_then(|caps| parse_amount(&caps[1]))
}

/// Parse a decimal token, stripping thousands separators.
fn parse_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(&s.replace(',', "")).ok()
}

/// Extract the grand total from receipt text with default settings.
pub fn extract_total_amount(text: &str) -> Option<Money> {
    AmountExtractor::new().extract_total(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_line_beats_larger_value() {
        let text = "Item A $99.99\nTOTAL: $45.67\n$12.00";
        // Tier-1 keyword hit wins even though 99.99 is larger
        assert_eq!(
            extract_total_amount(text).unwrap().to_string(),
            "CAD 45.67"
        );
    }

    #[test]
    fn test_balance_due_beats_total() {
        let text = "TOTAL 20.00\nBALANCE DUE 15.00";
        assert_eq!(
            extract_total_amount(text).unwrap().to_string(),
            "CAD 15.00"
        );
    }

    #[test]
    fn test_credit_beats_total_tier() {
        let text = "TOTAL 10.00\nCredit 30.00";
        assert_eq!(
            extract_total_amount(text).unwrap().to_string(),
            "CAD 30.00"
        );
    }

    #[test]
    fn test_last_keyword_line_wins_within_tier() {
        let text = "SUBTOTAL 40.00\nTOTAL 41.99\nItems 3\nTOTAL 45.67";
        assert_eq!(
            extract_total_amount(text).unwrap().to_string(),
            "CAD 45.67"
        );
    }

    #[test]
    fn test_largest_value_fallback() {
        let text = "12.00\nsome item 45.67\n3.50";
        assert_eq!(
            extract_total_amount(text).unwrap().to_string(),
            "CAD 45.67"
        );
    }

    #[test]
    fn test_thousands_separator_stripped() {
        let text = "TOTAL $1,234.56";
        assert_eq!(
            extract_total_amount(text).unwrap().to_string(),
            "CAD 1234.56"
        );
    }

    #[test]
    fn test_keyword_line_without_number_falls_through() {
        // The "total" line carries no parseable token, so the tier yields
        // nothing and the max-value fallback takes over
        let text = "TOTAL SAVINGS APPLIED\n12.00\n45.67";
        assert_eq!(
            extract_total_amount(text).unwrap().to_string(),
            "CAD 45.67"
        );
    }

    #[test]
    fn test_normalization_idempotent() {
        let text = "CAD 45.67";
        assert_eq!(
            extract_total_amount(text).unwrap().to_string(),
            "CAD 45.67"
        );
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(extract_total_amount(""), None);
        assert_eq!(extract_total_amount("no numbers here"), None);
    }

    #[test]
    fn test_custom_currency() {
        let extractor = AmountExtractor::new().with_currency("USD");
        let text = "TOTAL $45.67";
        assert_eq!(
            extractor.extract_total(text).unwrap().to_string(),
            "USD 45.67"
        );
    }

    #[test]
    fn test_extract_all_contexts() {
        let extractor = AmountExtractor::new();
        let candidates = extractor.extract_all("CAD 45.67\n12.00");

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].context.as_deref(), Some("CAD"));
        assert_eq!(candidates[0].line, 0);
        assert_eq!(candidates[1].context, None);
        assert_eq!(candidates[1].line, 1);
    }
}
