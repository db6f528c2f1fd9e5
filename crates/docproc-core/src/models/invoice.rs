//! Invoice record model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Structured data extracted from an invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Invoice number/identifier.
    #[serde(rename = "Invoice Number")]
    pub invoice_number: Option<String>,

    /// Invoice date, in the form it was written.
    #[serde(rename = "Date")]
    pub date: Option<String>,

    #[serde(rename = "Customer Name")]
    pub customer_name: Option<String>,

    #[serde(rename = "Address")]
    pub address: Option<String>,

    /// Line items in source order.
    #[serde(rename = "Items")]
    pub items: Vec<InvoiceItem>,

    /// Amount due. Always present on an extracted invoice.
    #[serde(rename = "Total Amount")]
    pub total_amount: Decimal,
}

/// A single priced line on the invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    #[serde(rename = "Item")]
    pub item: String,

    #[serde(rename = "Price")]
    pub price: Decimal,
}

impl InvoiceItem {
    pub fn new(item: impl Into<String>, price: Decimal) -> Self {
        Self {
            item: item.into(),
            price,
        }
    }
}

impl InvoiceRecord {
    /// Sum of all item prices.
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(|i| i.price).sum()
    }

    /// Check the record for inconsistencies that do not prevent extraction.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.invoice_number.is_none() {
            issues.push("Missing invoice number".to_string());
        }

        if self.items.is_empty() {
            issues.push("No line items".to_string());
        } else if self.items_total() != self.total_amount {
            issues.push(format!(
                "Line item total ({}) differs from total amount ({})",
                self.items_total(),
                self.total_amount
            ));
        }

        issues
    }
}
