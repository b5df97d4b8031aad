//! The canonical receipt parser combining the three field extractors.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::config::{DateStyle, ExtractionConfig};
use crate::models::receipt::ReceiptFields;

use super::rules::{AmountExtractor, DateExtractor, FieldExtractor, StoreNameMatcher};

/// Result of a receipt extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted receipt fields.
    pub fields: ReceiptFields,
    /// The transcript the fields were extracted from.
    pub raw_text: String,
    /// Extraction warnings (one per missing field).
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for receipt parsing.
pub trait ReceiptParser {
    /// Parse receipt fields from an OCR transcript.
    ///
    /// Total over any string input: an empty or garbage transcript yields
    /// absent fields, never an error.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Heuristic receipt parser.
///
/// The single authoritative extraction engine; the historical deployment
/// variants (keyword priority orders, date output formats, store scan
/// depths) are expressed through [`ExtractionConfig`], not separate
/// implementations.
pub struct HeuristicReceiptParser {
    config: ExtractionConfig,
}

impl HeuristicReceiptParser {
    /// Create a parser with the default rule set.
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// Create a parser from a full extraction configuration.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Cap the store matcher's ordinary per-line scan.
    pub fn with_store_scan_limit(mut self, limit: Option<usize>) -> Self {
        self.config.store.scan_limit = limit;
        self
    }

    /// Replace the amount keyword tiers.
    pub fn with_amount_keywords(mut self, tiers: Vec<Vec<String>>) -> Self {
        self.config.amount.keyword_tiers = tiers;
        self
    }

    /// Set the output currency label.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.config.amount.currency = currency.into();
        self
    }

    /// Set the date output style.
    pub fn with_date_style(mut self, style: DateStyle) -> Self {
        self.config.date.style = style;
        self
    }
}

impl Default for HeuristicReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptParser for HeuristicReceiptParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("Parsing receipt from {} characters of text", text.len());

        // The three extractors are independent and order-free; each sees
        // the same immutable transcript.
        let store_name = StoreNameMatcher::new()
            .with_scan_limit(self.config.store.scan_limit)
            .extract(text);

        let total_amount = AmountExtractor::new()
            .with_keyword_tiers(self.config.amount.keyword_tiers.clone())
            .with_currency(self.config.amount.currency.clone())
            .extract_total(text);

        let date = DateExtractor::new()
            .with_style(self.config.date.style)
            .extract_display(text);

        if store_name.is_none() {
            warnings.push("Could not extract store name".to_string());
        }
        if total_amount.is_none() {
            warnings.push("Could not extract total amount".to_string());
        }
        if date.is_none() {
            warnings.push("Could not extract date".to_string());
        }

        let fields = ReceiptFields {
            store_name,
            total_amount,
            date,
        };

        debug!(
            "Extracted store={:?} amount={:?} date={:?}",
            fields.store_name,
            fields.total_amount.as_ref().map(|m| m.to_string()),
            fields.date
        );

        ExtractionResult {
            fields,
            raw_text: text.to_string(),
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_full_receipt() {
        let text = "COSTCO WHOLESALE\n\
                    Richmond #231\n\
                    2024/01/15 10:32:01\n\
                    MILK 2% 4L        5.99\n\
                    EGGS LARGE       12.00\n\
                    SUBTOTAL         40.18\n\
                    TOTAL: $45.67\n\
                    MASTERCARD       45.67";

        let result = HeuristicReceiptParser::new().parse(text);

        assert_eq!(result.fields.store_name.as_deref(), Some("Costco"));
        assert_eq!(
            result.fields.total_amount.map(|m| m.to_string()),
            Some("CAD 45.67".to_string())
        );
        assert_eq!(result.fields.date.as_deref(), Some("2024/01/15"));
        assert!(result.warnings.is_empty());
        assert_eq!(result.raw_text, text);
    }

    #[test]
    fn test_parse_empty_text() {
        let result = HeuristicReceiptParser::new().parse("");

        assert!(result.fields.is_empty());
        assert_eq!(result.warnings.len(), 3);
    }

    #[test]
    fn test_fields_independent() {
        // A date with no amount and no merchant still comes through
        let result = HeuristicReceiptParser::new().parse("xx\n2024-01-15");

        assert_eq!(result.fields.date.as_deref(), Some("2024-01-15"));
        assert_eq!(result.fields.total_amount, None);
        // "xx" is too short for the header fallback, so the date line
        // doubles as the store name; the fields stay independent
        assert_eq!(result.fields.store_name.as_deref(), Some("2024-01-15"));
    }

    #[test]
    fn test_contract_json_shape() {
        let result = HeuristicReceiptParser::new().parse("RECEIPT\n$10.00");
        let json = serde_json::to_value(&result.fields).unwrap();

        assert_eq!(json["total_amount"], "CAD 10.00");
        assert!(json.get("date").unwrap().is_null());
    }

    #[test]
    fn test_configured_variant() {
        let parser = HeuristicReceiptParser::new()
            .with_currency("USD")
            .with_date_style(DateStyle::Iso);

        let result = parser.parse("TOTAL 9.99\n01/15/24 10:32");

        assert_eq!(
            result.fields.total_amount.map(|m| m.to_string()),
            Some("USD 9.99".to_string())
        );
        assert_eq!(result.fields.date.as_deref(), Some("2024-01-15"));
    }

    #[test]
    fn test_deterministic() {
        let text = "HMART\nTOTAL 23.45\n2024-03-01";
        let parser = HeuristicReceiptParser::new();

        let first = parser.parse(text);
        let second = parser.parse(text);

        assert_eq!(first.fields, second.fields);
    }
}
