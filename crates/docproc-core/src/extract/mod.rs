//! Schema-driven field extraction for each document type.

mod invoice;
mod medical;
mod news;
pub mod patterns;
mod registry;
pub mod rules;

pub use invoice::{parse_amount, InvoiceExtractor};
pub use medical::MedicalReportExtractor;
pub use news::NewsArticleExtractor;
pub use registry::ExtractorRegistry;

use crate::error::ExtractionError;
use crate::models::document::{DocumentType, Record};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Turns the text of one document type into its record.
///
/// Extractors hold no mutable state and may be called from several workers at once.
pub trait DocumentExtractor: Send + Sync {
    /// Document type this extractor handles.
    fn document_type(&self) -> DocumentType;

    /// Extract a record from preprocessed text.
    fn extract(&self, text: &str) -> Result<Record>;
}

/// Normalize raw content before extraction. Only surrounding whitespace is removed.
pub fn preprocess(content: &str) -> &str {
    content.trim()
}

/// Preprocess and extract a single document with the built-in extractor for its type.
pub fn extract(doc_type: DocumentType, content: &str) -> Result<Record> {
    let text = preprocess(content);
    match doc_type {
        DocumentType::Invoice => InvoiceExtractor.extract(text),
        DocumentType::MedicalReport => MedicalReportExtractor.extract(text),
        DocumentType::NewsArticle => NewsArticleExtractor.extract(text),
    }
}
