//! News article field extraction.

use crate::models::document::{DocumentType, Record};
use crate::models::news::NewsArticle;

use super::patterns::{AUTHOR, DATE, KEY_POINTS_MARKER, SUMMARY, TITLE};
use super::rules::{bullets_after, FieldExtractor, LabeledField};
use super::{DocumentExtractor, Result};

/// Extracts [`NewsArticle`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewsArticleExtractor;

impl NewsArticleExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, text: &str) -> NewsArticle {
        NewsArticle {
            title: LabeledField::new(&TITLE).extract(text),
            date: LabeledField::new(&DATE).extract(text),
            author: LabeledField::new(&AUTHOR).extract(text),
            summary: LabeledField::new(&SUMMARY).extract(text),
            key_points: bullets_after(text, KEY_POINTS_MARKER),
        }
    }
}

impl DocumentExtractor for NewsArticleExtractor {
    fn document_type(&self) -> DocumentType {
        DocumentType::NewsArticle
    }

    fn extract(&self, text: &str) -> Result<Record> {
        Ok(Record::NewsArticle(self.parse(text)))
    }
}
