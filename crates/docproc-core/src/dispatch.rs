//! Concurrent batch dispatcher.
//!
//! Documents are routed to extractors by type tag and extracted on the
//! blocking pool, at most `workers` at a time. Results are slotted back by
//! submission index, so group order always follows input order regardless
//! of completion order. Medical reports are then enriched with drug label
//! information before being grouped.

use std::sync::Arc;
use std::time::Instant;

use futures_util::future::{join_all, ready, Either};
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::drug_info::{self, DrugInfoSource, NO_INFORMATION};
use crate::error::{DocprocError, Result};
use crate::extract::{preprocess, ExtractorRegistry};
use crate::models::config::DocprocConfig;
use crate::models::document::{Document, GroupedOutput, Record};
use crate::models::medical::MedicalReport;

/// Default worker pool width.
pub const DEFAULT_WORKERS: usize = 4;

/// Per-batch counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Documents handed to an extractor.
    pub submitted: usize,
    /// Documents skipped because their type has no extractor.
    pub skipped_unknown: usize,
    /// Extractions that returned an error or panicked.
    pub failed: usize,
    /// Records emitted.
    pub succeeded: usize,
}

/// Routes documents to extractors and assembles the grouped output.
pub struct BatchProcessor {
    registry: ExtractorRegistry,
    drug_info: Arc<dyn DrugInfoSource>,
    workers: usize,
}

impl BatchProcessor {
    pub fn new(registry: ExtractorRegistry, drug_info: Arc<dyn DrugInfoSource>) -> Self {
        Self {
            registry,
            drug_info,
            workers: DEFAULT_WORKERS,
        }
    }

    /// Processor with the built-in extractors and the configured drug info source.
    pub fn from_config(config: &DocprocConfig) -> Result<Self> {
        config.validate()?;
        let drug_info: Arc<dyn DrugInfoSource> = Arc::from(drug_info::from_config(&config.drug_info)?);
        Ok(Self::new(ExtractorRegistry::new(), drug_info).with_workers(config.dispatcher.workers))
    }

    /// Set the worker pool width (at least 1).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    /// Process a batch and return the grouped records.
    pub async fn process(&self, documents: Vec<Document>) -> GroupedOutput {
        self.process_with_report(documents).await.0
    }

    /// Process a batch, also returning per-batch counters.
    pub async fn process_with_report(
        &self,
        documents: Vec<Document>,
    ) -> (GroupedOutput, BatchReport) {
        let start = Instant::now();
        let mut report = BatchReport::default();
        let mut slots: Vec<Option<Record>> = vec![None; documents.len()];

        let permits = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();

        for (index, doc) in documents.into_iter().enumerate() {
            let extractor = match self.registry.resolve(&doc.doc_type) {
                Ok(extractor) => extractor,
                Err(e) => {
                    report.skipped_unknown += 1;
                    warn!("Skipping document #{}: {}", index, e);
                    continue;
                }
            };
            report.submitted += 1;

            let permits = permits.clone();
            let content = doc.content;
            tasks.spawn(async move {
                // Held until the blocking extraction finishes; the semaphore is never closed.
                let _permit = permits.acquire_owned().await;
                let doc_type = extractor.document_type();
                let outcome =
                    tokio::task::spawn_blocking(move || extractor.extract(preprocess(&content)))
                        .await;
                (index, doc_type, outcome)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let (index, doc_type, outcome) = match joined {
                Ok(done) => done,
                Err(e) => {
                    report.failed += 1;
                    error!("Dispatch task failed: {}", e);
                    continue;
                }
            };

            match outcome {
                Ok(Ok(record)) => {
                    debug!("Extracted document #{} ({})", index, doc_type);
                    slots[index] = Some(record);
                }
                Ok(Err(e)) => {
                    report.failed += 1;
                    error!(
                        "Error processing document #{} ({}): {}",
                        index,
                        doc_type,
                        DocprocError::from(e)
                    );
                }
                Err(e) => {
                    report.failed += 1;
                    error!("Extraction task for document #{} ({}) failed: {}", index, doc_type, e);
                }
            }
        }

        let mut output = GroupedOutput::new();
        for record in slots.into_iter().flatten() {
            let record = match record {
                Record::MedicalReport(mut medical) => {
                    self.enrich(&mut medical).await;
                    Record::MedicalReport(medical)
                }
                other => other,
            };
            output.push(record);
            report.succeeded += 1;
        }

        info!(
            "Processed batch: {} submitted, {} succeeded, {} failed, {} skipped in {:?}",
            report.submitted,
            report.succeeded,
            report.failed,
            report.skipped_unknown,
            start.elapsed()
        );

        (output, report)
    }

    /// Attach drug information to every prescription, preserving list order.
    ///
    /// A blank drug name gets [`NO_INFORMATION`] without consulting the source.
    pub async fn enrich(&self, report: &mut MedicalReport) {
        let infos = join_all(report.prescriptions.iter().map(|p| {
            if p.drug.trim().is_empty() {
                Either::Left(ready(NO_INFORMATION.to_string()))
            } else {
                Either::Right(self.drug_info.lookup(&p.drug))
            }
        }))
        .await;

        for (prescription, info) in report.prescriptions.iter_mut().zip(infos) {
            prescription.drug_info = Some(info);
        }
    }
}
