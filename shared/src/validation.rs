//! Validation utilities for the Pharmaceutical Inventory Dashboard

use std::collections::HashSet;

use crate::models::InventoryRecord;

// ============================================================================
// Inventory Validations
// ============================================================================

/// Validate that a record carries the fields needed to identify and group it
pub fn validate_record(record: &InventoryRecord) -> Result<(), &'static str> {
    if record.id.trim().is_empty() {
        return Err("Record id must not be empty");
    }
    if record.particulars.trim().is_empty() {
        return Err("Record particulars must not be empty");
    }
    Ok(())
}

/// Validate every record and require ids to be unique within the dataset
pub fn validate_records(records: &[InventoryRecord]) -> Result<(), &'static str> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        validate_record(record)?;
        if !seen.insert(record.id.as_str()) {
            return Err("Record ids must be unique");
        }
    }
    Ok(())
}

// ============================================================================
// Upload & Alert Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Invalid email format");
    };
    if local.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err("Invalid email format");
    }
    if email.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
        return Err("Invalid email format");
    }
    // Must not read as an option to the mailer
    if email.starts_with('-') {
        return Err("Invalid email format");
    }
    Ok(())
}

/// Validate the name of an uploaded CSV file.
///
/// Names must be a bare file name (no directory components) ending in `.csv`.
pub fn validate_upload_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("File name must not be empty");
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err("File name must not contain path components");
    }
    if !name.to_lowercase().ends_with(".csv") {
        return Err("Only CSV files are accepted");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::QuantityField;
    use crate::types::Amount;

    fn record(id: &str, particulars: &str) -> InventoryRecord {
        InventoryRecord {
            id: id.to_string(),
            particulars: particulars.to_string(),
            particular_id: "LOT".to_string(),
            manufacturing_date: "01-Jan-24".to_string(),
            expiry_date: "31-Dec-25".to_string(),
            type_of_good: None,
            quantity: QuantityField::Count(1),
            rate: Amount::default(),
            value: Amount::default(),
            minimum_stock: None,
            monthly_avg_sales: None,
        }
    }

    #[test]
    fn test_validate_record() {
        assert!(validate_record(&record("1", "Foo - 10ml")).is_ok());
        assert!(validate_record(&record(" ", "Foo - 10ml")).is_err());
        assert!(validate_record(&record("1", "")).is_err());
    }

    #[test]
    fn test_validate_records_duplicate_ids() {
        let records = vec![record("1", "Foo"), record("1", "Bar")];
        assert_eq!(validate_records(&records), Err("Record ids must be unique"));
        assert!(validate_records(&[]).is_ok());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("buyer@pharma.example").is_ok());
        assert!(validate_email("no-at-sign.example").is_err());
        assert!(validate_email("@pharma.example").is_err());
        assert!(validate_email("buyer@localhost").is_err());
        assert!(validate_email("a'b@pharma.example").is_err());
        assert!(validate_email("-x@a.b").is_err());
        assert!(validate_email("--help@pharma.example").is_err());
        assert!(validate_email("x-ray@pharma.example").is_ok());
    }

    #[test]
    fn test_validate_upload_name() {
        assert!(validate_upload_name("TRADING PRODUCT DETAILS 05.02.2025.csv").is_ok());
        assert!(validate_upload_name("stock.CSV").is_ok());
        assert!(validate_upload_name("../secrets.csv").is_err());
        assert!(validate_upload_name("dir/stock.csv").is_err());
        assert!(validate_upload_name("stock.xlsx").is_err());
        assert!(validate_upload_name("").is_err());
    }
}
