//! Medical report field extraction.

use crate::models::document::{DocumentType, Record};
use crate::models::medical::{MedicalReport, Prescription};

use super::patterns::{
    DATE_OF_BIRTH, DATE_OF_VISIT, DIAGNOSIS, PATIENT_NAME, PRESCRIPTION_LINE,
    RECOMMENDATIONS_MARKER,
};
use super::rules::{bullets_after, section_before, BulletPairs, FieldExtractor, LabeledField};
use super::{DocumentExtractor, Result};

/// Extracts [`MedicalReport`]s.
///
/// Prescriptions are the `- drug: dosage` lines before `Recommendations:`;
/// recommendations are the bullet lines after it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedicalReportExtractor;

impl MedicalReportExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, text: &str) -> MedicalReport {
        let prescriptions = BulletPairs::new(&PRESCRIPTION_LINE)
            .extract_all(section_before(text, RECOMMENDATIONS_MARKER))
            .into_iter()
            .map(|(drug, dosage)| Prescription::new(drug, dosage))
            .collect();

        MedicalReport {
            patient_name: LabeledField::new(&PATIENT_NAME).extract(text),
            date_of_birth: LabeledField::new(&DATE_OF_BIRTH).extract(text),
            date_of_visit: LabeledField::new(&DATE_OF_VISIT).extract(text),
            diagnosis: LabeledField::new(&DIAGNOSIS).extract(text),
            prescriptions,
            recommendations: bullets_after(text, RECOMMENDATIONS_MARKER),
        }
    }
}

impl DocumentExtractor for MedicalReportExtractor {
    fn document_type(&self) -> DocumentType {
        DocumentType::MedicalReport
    }

    fn extract(&self, text: &str) -> Result<Record> {
        Ok(Record::MedicalReport(self.parse(text)))
    }
}
