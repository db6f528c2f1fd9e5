//! Medical report record model.

use serde::{Deserialize, Serialize};

/// Structured data extracted from a medical report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicalReport {
    #[serde(rename = "Patient Name")]
    pub patient_name: Option<String>,

    #[serde(rename = "Date of Birth")]
    pub date_of_birth: Option<String>,

    #[serde(rename = "Date of Visit")]
    pub date_of_visit: Option<String>,

    #[serde(rename = "Diagnosis")]
    pub diagnosis: Option<String>,

    /// Prescriptions listed before the recommendations section.
    #[serde(rename = "Prescriptions")]
    pub prescriptions: Vec<Prescription>,

    #[serde(rename = "Recommendations")]
    pub recommendations: Vec<String>,
}

/// A prescribed drug with its dosage and, after enrichment, label information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    #[serde(rename = "Drug")]
    pub drug: String,

    #[serde(rename = "Dosage")]
    pub dosage: String,

    /// Drug label description. `None` only before enrichment has run.
    #[serde(rename = "Drug Info", skip_serializing_if = "Option::is_none", default)]
    pub drug_info: Option<String>,
}

impl Prescription {
    pub fn new(drug: impl Into<String>, dosage: impl Into<String>) -> Self {
        Self {
            drug: drug.into(),
            dosage: dosage.into(),
            drug_info: None,
        }
    }

    pub fn is_enriched(&self) -> bool {
        self.drug_info.is_some()
    }
}

impl MedicalReport {
    /// Whether every prescription carries drug information.
    pub fn is_enriched(&self) -> bool {
        self.prescriptions.iter().all(Prescription::is_enriched)
    }
}
