//! Registry mapping document type tags to extractors.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::DocprocError;
use crate::models::document::DocumentType;

use super::{DocumentExtractor, InvoiceExtractor, MedicalReportExtractor, NewsArticleExtractor};

/// Lookup table from document type to its extractor.
#[derive(Clone)]
pub struct ExtractorRegistry {
    extractors: HashMap<DocumentType, Arc<dyn DocumentExtractor>>,
}

impl ExtractorRegistry {
    /// Registry with the built-in invoice, medical report and news article extractors.
    pub fn new() -> Self {
        Self::empty()
            .with(InvoiceExtractor::new())
            .with(MedicalReportExtractor::new())
            .with(NewsArticleExtractor::new())
    }

    /// Registry with no extractors.
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Add an extractor, replacing any previous one for the same type.
    pub fn register(&mut self, extractor: impl DocumentExtractor + 'static) {
        self.extractors
            .insert(extractor.document_type(), Arc::new(extractor));
    }

    pub fn with(mut self, extractor: impl DocumentExtractor + 'static) -> Self {
        self.register(extractor);
        self
    }

    /// Extractor for a wire tag, or `None` for unknown or unregistered types.
    pub fn get(&self, tag: &str) -> Option<Arc<dyn DocumentExtractor>> {
        DocumentType::from_tag(tag).and_then(|t| self.extractors.get(&t).cloned())
    }

    /// Like [`get`](Self::get), but an unknown tag is a [`DocprocError::UnknownType`].
    pub fn resolve(&self, tag: &str) -> crate::Result<Arc<dyn DocumentExtractor>> {
        self.get(tag)
            .ok_or_else(|| DocprocError::UnknownType(tag.to_string()))
    }

    /// Registered type tags, sorted.
    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<_> = self.extractors.keys().map(|t| t.tag()).collect();
        tags.sort_unstable();
        tags
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
