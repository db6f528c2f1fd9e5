//! Core library for typed document extraction.
//!
//! This crate provides:
//! - Field extraction for invoices, medical reports, and news articles
//! - An extractor registry keyed by document type tag
//! - Drug label lookups for enriching medical report prescriptions
//! - A bounded, order-preserving batch dispatcher

pub mod dispatch;
pub mod drug_info;
pub mod error;
pub mod extract;
pub mod models;

pub use dispatch::{BatchProcessor, BatchReport};
pub use drug_info::{DrugInfoSource, OfflineDrugInfo, OpenFdaClient, NO_INFORMATION};
pub use error::{DocprocError, ExtractionError, Result};
pub use extract::{DocumentExtractor, ExtractorRegistry};
pub use models::config::DocprocConfig;
pub use models::document::{Document, DocumentType, GroupedOutput, Record};
pub use models::invoice::{InvoiceItem, InvoiceRecord};
pub use models::medical::{MedicalReport, Prescription};
pub use models::news::NewsArticle;
