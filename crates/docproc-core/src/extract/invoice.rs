//! Invoice field extraction.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::ExtractionError;
use crate::models::document::{DocumentType, Record};
use crate::models::invoice::{InvoiceItem, InvoiceRecord};

use super::patterns::{ADDRESS, CUSTOMER_NAME, DATE, INVOICE_NUMBER, ITEM_LINE, TOTAL_AMOUNT};
use super::rules::{BulletPairs, FieldExtractor, LabeledField};
use super::{DocumentExtractor, Result};

const TOTAL_AMOUNT_FIELD: &str = "Total Amount";

/// Extracts [`InvoiceRecord`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceExtractor;

impl InvoiceExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Parse invoice text. Fails if `Total Amount` is missing or not a valid amount.
    pub fn parse(&self, text: &str) -> Result<InvoiceRecord> {
        let total_raw = LabeledField::new(&TOTAL_AMOUNT)
            .extract(text)
            .ok_or_else(|| ExtractionError::MissingField(TOTAL_AMOUNT_FIELD.to_string()))?;
        let total_amount = parse_amount(TOTAL_AMOUNT_FIELD, &total_raw)?;

        let items = BulletPairs::new(&ITEM_LINE)
            .extract_all(text)
            .into_iter()
            .filter_map(|(item, price)| match parse_amount("Price", &price) {
                Ok(price) => Some(InvoiceItem::new(item, price)),
                Err(e) => {
                    warn!("Skipping invoice item {:?}: {}", item, e);
                    None
                }
            })
            .collect();

        let record = InvoiceRecord {
            invoice_number: LabeledField::new(&INVOICE_NUMBER).extract(text),
            date: LabeledField::new(&DATE).extract(text),
            customer_name: LabeledField::new(&CUSTOMER_NAME).extract(text),
            address: LabeledField::new(&ADDRESS).extract(text),
            items,
            total_amount,
        };

        for issue in record.validate() {
            debug!("Invoice {:?}: {}", record.invoice_number, issue);
        }

        Ok(record)
    }
}

impl DocumentExtractor for InvoiceExtractor {
    fn document_type(&self) -> DocumentType {
        DocumentType::Invoice
    }

    fn extract(&self, text: &str) -> Result<Record> {
        self.parse(text).map(Record::Invoice)
    }
}

/// Parse a `.`-separated decimal amount; negative amounts are rejected.
pub fn parse_amount(field: &str, raw: &str) -> Result<Decimal> {
    let value = raw.trim();
    let amount = Decimal::from_str(value).map_err(|_| ExtractionError::Parse {
        field: field.to_string(),
        value: value.to_string(),
    })?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ExtractionError::InvalidValue {
            field: field.to_string(),
            reason: format!("negative amount {}", amount),
        });
    }

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const INVOICE: &str = "Invoice Number: 12345
        Date: 2024-07-15
        Customer Name: John Doe
        Address: 123 Elm Street, Springfield, IL, 62701
        Items:
          - Widget A: $50.00
          - Widget B: $30.00
          - Widget C: $20.00
        Total Amount: $100.00";

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_full_invoice() {
        let record = InvoiceExtractor::new().parse(INVOICE).unwrap();

        assert_eq!(record.invoice_number.as_deref(), Some("12345"));
        assert_eq!(record.date.as_deref(), Some("2024-07-15"));
        assert_eq!(record.customer_name.as_deref(), Some("John Doe"));
        assert_eq!(
            record.address.as_deref(),
            Some("123 Elm Street, Springfield, IL, 62701")
        );
        assert_eq!(
            record.items,
            vec![
                InvoiceItem::new("Widget A", dec("50.00")),
                InvoiceItem::new("Widget B", dec("30.00")),
                InvoiceItem::new("Widget C", dec("20.00")),
            ]
        );
        assert_eq!(record.total_amount, dec("100.00"));
    }

    #[test]
    fn test_missing_total_amount_fails() {
        let text = INVOICE.replace("Total Amount: $100.00", "");
        assert_eq!(
            InvoiceExtractor::new().parse(&text),
            Err(ExtractionError::MissingField("Total Amount".to_string()))
        );
    }

    #[test]
    fn test_unparseable_total_amount_fails() {
        let text = INVOICE.replace("$100.00", "$one hundred");
        assert!(matches!(
            InvoiceExtractor::new().parse(&text),
            Err(ExtractionError::Parse { .. })
        ));
    }

    #[test]
    fn test_negative_total_amount_fails() {
        let text = INVOICE.replace("$100.00", "$-100.00");
        assert!(matches!(
            InvoiceExtractor::new().parse(&text),
            Err(ExtractionError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_missing_labels_are_none() {
        let record = InvoiceExtractor::new().parse("Total Amount: $5").unwrap();
        assert_eq!(record.invoice_number, None);
        assert_eq!(record.customer_name, None);
        assert!(record.items.is_empty());
        assert_eq!(record.total_amount, dec("5"));
    }

    #[test]
    fn test_unparseable_item_price_skipped() {
        let text = "- Widget A: $50.00\n- Widget B: $n/a\nTotal Amount: $50.00";
        let record = InvoiceExtractor::new().parse(text).unwrap();
        assert_eq!(record.items, vec![InvoiceItem::new("Widget A", dec("50.00"))]);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("Price", " 12.50 "), Ok(dec("12.50")));
        assert_eq!(parse_amount("Price", "0"), Ok(Decimal::ZERO));
        assert!(parse_amount("Price", "1,000.00").is_err());
        assert!(parse_amount("Price", "-3").is_err());
    }
}
