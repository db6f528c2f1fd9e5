//! Input documents, document types, and the grouped batch output.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::invoice::InvoiceRecord;
use super::medical::MedicalReport;
use super::news::NewsArticle;

/// Discriminator selecting an extractor for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Commercial invoice.
    Invoice,
    /// Clinical visit report with prescriptions.
    MedicalReport,
    /// News article with key points.
    NewsArticle,
}

impl DocumentType {
    /// All built-in document types.
    pub const ALL: [DocumentType; 3] = [
        DocumentType::Invoice,
        DocumentType::MedicalReport,
        DocumentType::NewsArticle,
    ];

    /// Wire tag used in the `type` field of an input document.
    pub fn tag(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoice",
            DocumentType::MedicalReport => "medical_report",
            DocumentType::NewsArticle => "news_article",
        }
    }

    /// Key of the output group that collects records of this type.
    pub fn group(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoices",
            DocumentType::MedicalReport => "medical_reports",
            DocumentType::NewsArticle => "news_articles",
        }
    }

    /// Parse a wire tag. Matching is exact; no case folding.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A raw input document.
///
/// The type is kept as the submitted string so unknown tags survive
/// deserialization and can be skipped by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document type tag (`invoice`, `medical_report`, `news_article`).
    #[serde(rename = "type")]
    pub doc_type: String,

    /// Free-form document text.
    pub content: String,
}

impl Document {
    pub fn new(doc_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            doc_type: doc_type.into(),
            content: content.into(),
        }
    }
}

/// A record produced by one of the extractors.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Invoice(InvoiceRecord),
    MedicalReport(MedicalReport),
    NewsArticle(NewsArticle),
}

impl Record {
    /// Type of the document this record was extracted from.
    pub fn document_type(&self) -> DocumentType {
        match self {
            Record::Invoice(_) => DocumentType::Invoice,
            Record::MedicalReport(_) => DocumentType::MedicalReport,
            Record::NewsArticle(_) => DocumentType::NewsArticle,
        }
    }
}

/// Records grouped by output category, each group in submission order.
///
/// Empty groups are omitted when serialized, so an empty batch renders as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedOutput {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invoices: Vec<InvoiceRecord>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub medical_reports: Vec<MedicalReport>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub news_articles: Vec<NewsArticle>,
}

impl GroupedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the group matching its type.
    pub fn push(&mut self, record: Record) {
        match record {
            Record::Invoice(r) => self.invoices.push(r),
            Record::MedicalReport(r) => self.medical_reports.push(r),
            Record::NewsArticle(r) => self.news_articles.push(r),
        }
    }

    /// Total number of records across all groups.
    pub fn len(&self) -> usize {
        self.invoices.len() + self.medical_reports.len() + self.news_articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
