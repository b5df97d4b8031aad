//! Rule-based field extractors for receipt transcripts.

pub mod amounts;
pub mod dates;
pub mod patterns;
pub mod store;

pub use amounts::{AmountCandidate, AmountExtractor, extract_total_amount};
pub use dates::{DateCandidate, DateExtractor, DatePattern, extract_date};
pub use store::{MerchantAlias, StoreNameMatcher, extract_store_name};

/// Trait for field extractors.
///
/// Extractors are pure functions of the transcript: no shared state, no
/// I/O, and `None` for absence rather than an error.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field, applying the extractor's full priority rules.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all raw occurrences of the field, without the priority
    /// tie-breaking applied by [`extract`](Self::extract).
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
