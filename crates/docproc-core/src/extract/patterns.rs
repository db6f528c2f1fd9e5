//! Regex patterns for labeled fields and bullet lines.
//!
//! Labels are matched literally and case-sensitively anywhere in the text.
//! The value runs to the end of the label's line.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Invoice
    pub static ref INVOICE_NUMBER: Regex = Regex::new(r"Invoice Number:[ \t]*(.*)").unwrap();
    pub static ref DATE: Regex = Regex::new(r"Date:[ \t]*(.*)").unwrap();
    pub static ref CUSTOMER_NAME: Regex = Regex::new(r"Customer Name:[ \t]*(.*)").unwrap();
    pub static ref ADDRESS: Regex = Regex::new(r"Address:[ \t]*(.*)").unwrap();
    pub static ref TOTAL_AMOUNT: Regex = Regex::new(r"Total Amount:[ \t]*\$(.*)").unwrap();

    // `- Widget A: $50.00`, item name ends at the first ": $"
    pub static ref ITEM_LINE: Regex = Regex::new(r"- (.*?): \$(.*)").unwrap();

    // Medical report
    pub static ref PATIENT_NAME: Regex = Regex::new(r"Patient Name:[ \t]*(.*)").unwrap();
    pub static ref DATE_OF_BIRTH: Regex = Regex::new(r"Date of Birth:[ \t]*(.*)").unwrap();
    pub static ref DATE_OF_VISIT: Regex = Regex::new(r"Date of Visit:[ \t]*(.*)").unwrap();
    pub static ref DIAGNOSIS: Regex = Regex::new(r"Diagnosis:[ \t]*(.*)").unwrap();

    // `- Amoxicillin: 500mg, twice daily`, dosage starts after the last ": "
    pub static ref PRESCRIPTION_LINE: Regex = Regex::new(r"- (.*): (.*)").unwrap();

    // News article
    pub static ref TITLE: Regex = Regex::new(r"Title:[ \t]*(.*)").unwrap();
    pub static ref AUTHOR: Regex = Regex::new(r"Author:[ \t]*(.*)").unwrap();
    pub static ref SUMMARY: Regex = Regex::new(r"Summary:[ \t]*(.*)").unwrap();

    // Any `- text` bullet
    pub static ref BULLET_LINE: Regex = Regex::new(r"- (.*)").unwrap();
}

/// Marker opening the recommendations section of a medical report.
pub const RECOMMENDATIONS_MARKER: &str = "Recommendations:";

/// Marker opening the key points section of a news article.
pub const KEY_POINTS_MARKER: &str = "Key Points:";
