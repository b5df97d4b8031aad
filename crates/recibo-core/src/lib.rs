//! Core library for receipt OCR text extraction.
//!
//! This crate provides:
//! - Store name matching against a known-merchant alias registry
//! - Total amount extraction (keyword tiers with a largest-value fallback)
//! - Transaction date extraction across common receipt date formats
//! - A combined parser producing the three-field receipt record
//!
//! The input is a raw OCR transcript (line-oriented free text of
//! unpredictable quality); the OCR step itself is an external collaborator.
//! Every extractor is a pure function of the text: same input, same output,
//! and absence of a match is `None`, never an error.

pub mod error;
pub mod models;
pub mod receipt;

pub use error::{ReciboError, Result};
pub use models::config::{
    AmountConfig, DateConfig, DateStyle, ExtractionConfig, OutputConfig, ReciboConfig, StoreConfig,
};
pub use models::receipt::{Money, ReceiptFields};
pub use receipt::rules::{
    AmountExtractor, DateExtractor, FieldExtractor, StoreNameMatcher, extract_date,
    extract_store_name, extract_total_amount,
};
pub use receipt::{ExtractionResult, HeuristicReceiptParser, ReceiptParser};
