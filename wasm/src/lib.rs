//! WebAssembly module for the Pharmaceutical Inventory Dashboard
//!
//! Provides client-side computation for:
//! - Quantity normalization
//! - Product rollups and reorder planning
//! - Expiry classification
//! - Upload form validation
//!
//! Collections cross the boundary as JSON strings in the dashboard's
//! camelCase shape.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use shared::{GroupingKey, InventoryRecord, ProductAggregate, QuantityField};

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    let message = format!("{}: {}", context, err);
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_error("Serialization failed", e))
}

fn parse_records(records_json: &str) -> Result<Vec<InventoryRecord>, JsValue> {
    serde_json::from_str(records_json).map_err(|e| js_error("Invalid records JSON", e))
}

/// `YYYY-MM-DD` at midnight, or the browser clock when empty
fn resolve_now(as_of: &str) -> Result<NaiveDateTime, JsValue> {
    let as_of = as_of.trim();
    if as_of.is_empty() {
        return browser_now();
    }
    NaiveDate::parse_from_str(as_of, "%Y-%m-%d")
        .map(|day| day.and_time(NaiveTime::MIN))
        .map_err(|e| js_error("Invalid asOf date", e))
}

fn browser_now() -> Result<NaiveDateTime, JsValue> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .and_then(|day| {
            day.and_hms_opt(now.get_hours(), now.get_minutes(), now.get_seconds())
        })
        .ok_or_else(|| JsValue::from_str("Browser clock returned an invalid date"))
}

fn parse_grouping(grouping: &str) -> GroupingKey {
    match grouping.trim().to_lowercase().as_str() {
        "normalized" => GroupingKey::Normalized,
        _ => GroupingKey::Exact,
    }
}

/// On-hand count of a raw quantity cell, e.g. `"5654 amp"` -> 5654
#[wasm_bindgen(js_name = normalizeQuantity)]
pub fn normalize_quantity(raw: &str) -> i64 {
    QuantityField::from(raw).on_hand()
}

/// Expiry classification of one date as `{daysUntilExpiry, status}` JSON
#[wasm_bindgen(js_name = classifyExpiry)]
pub fn classify_expiry(expiry_date: &str, as_of: &str) -> Result<String, JsValue> {
    let now = resolve_now(as_of)?;
    to_json(&shared::classify_expiry_at(expiry_date, now))
}

/// Per-product rollups for a JSON record list
#[wasm_bindgen(js_name = aggregateProducts)]
pub fn aggregate_products(records_json: &str, grouping: &str) -> Result<String, JsValue> {
    let records = parse_records(records_json)?;
    to_json(&shared::aggregate_by_product_with(&records, parse_grouping(grouping)))
}

/// Reorder plan for a JSON list of product aggregates
#[wasm_bindgen(js_name = planReorders)]
pub fn plan_reorders(aggregates_json: &str) -> Result<String, JsValue> {
    let aggregates: Vec<ProductAggregate> = serde_json::from_str(aggregates_json)
        .map_err(|e| js_error("Invalid aggregates JSON", e))?;
    to_json(&shared::plan_reorders(&aggregates))
}

/// Reorder plan straight from a JSON record list
#[wasm_bindgen(js_name = reorderPlanForRecords)]
pub fn reorder_plan_for_records(records_json: &str) -> Result<String, JsValue> {
    let records = parse_records(records_json)?;
    to_json(&shared::plan_reorders(&shared::aggregate_by_product(&records)))
}

/// Expiry timeline with counts per status
#[wasm_bindgen(js_name = expiryReport)]
pub fn expiry_report(records_json: &str, as_of: &str) -> Result<String, JsValue> {
    let records = parse_records(records_json)?;
    let now = resolve_now(as_of)?;
    to_json(&shared::expiry_report(&records, now))
}

/// Headline dashboard numbers
#[wasm_bindgen(js_name = dashboardStats)]
pub fn dashboard_stats(records_json: &str, as_of: &str) -> Result<String, JsValue> {
    let records = parse_records(records_json)?;
    let now = resolve_now(as_of)?;
    to_json(&shared::dashboard_stats(&records, now))
}

/// The built-in dataset, for running the dashboard without a backend
#[wasm_bindgen(js_name = seedInventory)]
pub fn seed_inventory() -> Result<String, JsValue> {
    to_json(&shared::seed::inventory_seed())
}

/// Basic email check for the alert form
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email(email: &str) -> bool {
    shared::validate_email(email.trim()).is_ok()
}

/// Upload name check for the file pickers
#[wasm_bindgen(js_name = isValidUploadName)]
pub fn is_valid_upload_name(name: &str) -> bool {
    shared::validate_upload_name(name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const RECORDS: &str = r#"[
        {"id": "1", "particulars": "Foo - 10ml", "particularId": "F1",
         "manufacturingDate": "01-Jan-23", "expiryDate": "15-Mar-24",
         "quantity": "100 amp", "rate": 2, "value": 200, "minimumStock": 50},
        {"id": "2", "particulars": "Foo - 5ml", "particularId": "F2",
         "manufacturingDate": "01-Jan-23", "expiryDate": "31-Dec-30",
         "quantity": 80, "rate": 1, "value": 80, "minimumStock": 120},
        {"id": "3", "particulars": "Bar - 1 strip", "particularId": "B1",
         "manufacturingDate": "01-Jan-23", "expiryDate": "31-Dec-30",
         "quantity": 40, "rate": 1, "value": 40, "minimumStock": 120}
    ]"#;

    #[test]
    fn test_normalize_quantity() {
        assert_eq!(normalize_quantity("5654 amp"), 5654);
        assert_eq!(normalize_quantity("4979"), 4979);
        assert_eq!(normalize_quantity("n/a"), 0);
    }

    #[test]
    fn test_normalize_quantity_matches_shared_rules() {
        for raw in ["-12", " 12", "+5", "5654 amp", "12.5 vials", ""] {
            assert_eq!(
                normalize_quantity(raw),
                shared::normalize_quantity(&QuantityField::from(raw)),
                "{raw:?}"
            );
        }
        assert_eq!(normalize_quantity("-12"), 0);
        assert_eq!(normalize_quantity(" 12"), 0);
        assert_eq!(normalize_quantity("+5"), 0);
    }

    #[test]
    fn test_classify_expiry() {
        let json: Value = serde_json::from_str(&classify_expiry("15-Mar-24", "2024-01-01").unwrap()).unwrap();
        assert_eq!(json["daysUntilExpiry"], 74);
        assert_eq!(json["status"], "expiring-soon");

        let json: Value = serde_json::from_str(&classify_expiry("31-Foo-24", "2024-01-01").unwrap()).unwrap();
        assert_eq!(json["status"], "error");
    }

    #[test]
    fn test_aggregate_and_plan() {
        let aggregates = aggregate_products(RECORDS, "exact").unwrap();
        let parsed: Value = serde_json::from_str(&aggregates).unwrap();
        let foo = parsed
            .as_array()
            .unwrap()
            .iter()
            .find(|a| a["name"] == "Foo")
            .unwrap();
        assert_eq!(foo["currentStock"], 180);
        assert_eq!(foo["status"], "good");

        let plan: Value = serde_json::from_str(&plan_reorders(&aggregates).unwrap()).unwrap();
        assert_eq!(plan.as_array().unwrap().len(), 1);
        assert_eq!(plan[0]["name"], "Bar");
        assert_eq!(plan[0]["orderQuantity"], 116);

        let direct: Value = serde_json::from_str(&reorder_plan_for_records(RECORDS).unwrap()).unwrap();
        assert_eq!(direct, plan);
    }

    #[test]
    fn test_expiry_report_and_stats() {
        let report: Value = serde_json::from_str(&expiry_report(RECORDS, "2024-01-01").unwrap()).unwrap();
        assert_eq!(report["counts"]["expiringSoon"], 1);
        assert_eq!(report["counts"]["good"], 2);

        let stats: Value = serde_json::from_str(&dashboard_stats(RECORDS, "2024-01-01").unwrap()).unwrap();
        assert_eq!(stats["totalQuantity"], 220);
        assert_eq!(stats["uniqueProducts"], 2);
    }

    #[test]
    fn test_seed_round_trips_through_json() {
        let seed = seed_inventory().unwrap();
        let records: Vec<InventoryRecord> = serde_json::from_str(&seed).unwrap();
        assert_eq!(records.len(), 28);
    }

    #[test]
    fn test_form_validation() {
        assert!(is_valid_email("buyer@pharma.example"));
        assert!(!is_valid_email("buyer"));
        assert!(is_valid_upload_name("stock.csv"));
        assert!(!is_valid_upload_name("../stock.csv"));
    }
}
