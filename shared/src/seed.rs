//! Built-in dataset served until an inventory export is processed

use rust_decimal::Decimal;

use crate::models::InventoryRecord;
use crate::quantity::QuantityField;
use crate::types::Amount;

fn dec(mantissa: i64, scale: u32) -> Decimal {
    Decimal::new(mantissa, scale)
}

#[allow(clippy::too_many_arguments)]
fn batch(
    id: &str,
    particulars: &str,
    particular_id: &str,
    manufacturing_date: &str,
    expiry_date: &str,
    quantity: QuantityField,
    rate: Decimal,
    value: Decimal,
) -> InventoryRecord {
    InventoryRecord {
        id: id.to_string(),
        particulars: particulars.to_string(),
        particular_id: particular_id.to_string(),
        manufacturing_date: manufacturing_date.to_string(),
        expiry_date: expiry_date.to_string(),
        type_of_good: Some("Finished Goods".to_string()),
        quantity,
        rate: Amount::Number(rate),
        value: Amount::Number(value),
        minimum_stock: None,
        monthly_avg_sales: None,
    }
}

/// Finished-goods batches of the trading product range
pub fn inventory_seed() -> Vec<InventoryRecord> {
    vec![
        batch("1", "Asphyllin LS Drops - 15ml", "LD2902", "01-Dec-24", "31-May-26", 4979i64.into(), dec(1221, 2), dec(6079359, 2)),
        batch("2", "Asphyllin-M Oral Suspension - 60ml", "ELM24009", "01-Jun-24", "31-May-26", 648i64.into(), dec(1525, 2), dec(9882, 0)),
        batch("3", "Asphyllin-M Oral Suspension - 60ml", "ELM24010", "01-Dec-24", "30-Nov-26", 4826i64.into(), dec(1525, 2), dec(735965, 1)),
        batch("4", "Clopikon-A Capsules - 10's", "COF2301", "01-Jul-23", "30-Jun-25", 2420i64.into(), dec(1671, 2), dec(4044819, 2)),
        batch("5", "Cofkon D Softgel Capsules - 10's", "CS033", "01-Dec-24", "30-Nov-26", 12i64.into(), dec(9, 0), dec(108, 0)),
        batch("6", "D-Lutin 10 Tablets - 10's", "DUT 2402", "01-Oct-24", "30-Sep-26", 4000i64.into(), dec(75, 0), dec(300000, 0)),
        batch("7", "D-Lutin 10 Tablets - 10's (Ps)", "DUT2401", "01-Apr-24", "31-Mar-26", 1i64.into(), dec(8833, 2), dec(8833, 2)),
        batch("8", "D-Lutin 10 Tablets - 4's (Ps)", "DUT 2401", "01-Apr-24", "31-Mar-26", 118i64.into(), dec(8861, 2), dec(1045598, 2)),
        batch("9", "Doxybiotic LB Capsules - 10's", "DOLB 2401", "01-Mar-24", "31-Aug-25", 1165i64.into(), dec(16, 0), dec(18640, 0)),
        batch("10", "Escalate 15 Tablets - 10's", "LC24G080A", "01-Jul-24", "30-Jun-26", 7035i64.into(), dec(858, 2), dec(6034954, 2)),
        batch("11", "Gapad-10 Tablets - 10's", "ADT-004", "01-Apr-24", "31-Mar-26", 1450i64.into(), dec(12, 0), dec(17400, 0)),
        batch("12", "Gapad-10 Tablets - 10's (Ps)", "ADT-004", "01-Apr-24", "31-Mar-26", 1i64.into(), dec(1146, 2), dec(1146, 2)),
        batch("13", "Gapad-10 Tablets - 4's (Ps)", "ADT-004", "01-Apr-24", "31-Mar-26", 330i64.into(), dec(0, 0), dec(0, 0)),
        batch("14", "Gapad - M Tablets - 10's", "ADT-007", "01-Oct-24", "30-Sep-26", 725i64.into(), dec(15, 0), dec(10875, 0)),
        batch("15", "Ilgov-GM1 Tablets - 10 's", "IGPT2401", "01-Jun-24", "31-May-26", 2880i64.into(), dec(105, 1), dec(30240, 0)),
        batch("16", "Ilgov-GM2 Tablets - 10's", "IMPT2401", "01-Jun-24", "31-May-26", 3830i64.into(), dec(12, 0), dec(45960, 0)),
        batch("17", "JABEZ Capsules - 10's", "AYC001", "01-Mar-24", "28-Feb-26", 78i64.into(), dec(31, 0), dec(2418, 0)),
        batch("18", "Lutin 250 Inj - 1ml (TRD)", "CPI240154", "01-Jan-24", "31-Dec-25", "5654 amp".into(), dec(14, 0), dec(79156, 0)),
        batch("19", "Lutin 500 Inj - 2ml (TRD)", "CPI 2404350", "01-Apr-24", "31-Mar-26", "2155 amp".into(), dec(19, 0), dec(40945, 0)),
        batch("20", "Neptin M Tablets - 10's", "NTPT2401", "01-Feb-24", "31-Jan-26", 812i64.into(), dec(155, 1), dec(12586, 0)),
        batch("21", "Neptin M Tablets - 10's", "NTPT2402", "31-Dec-24", "30-Nov-26", 4852i64.into(), dec(155, 1), dec(75206, 0)),
        batch("22", "NEU NT 200 Tablets - 10's", "NNT 2401", "01-Feb-24", "31-Jan-26", 3250i64.into(), dec(1791, 2), dec(5819379, 2)),
        batch("23", "N-Lutin 100 Soft Gel Capsules - 10's", "CX001", "01-Dec-24", "30-Nov-26", 4975i64.into(), dec(22, 0), dec(109450, 0)),
        batch("24", "N-Lutin 100 Soft Gel Capsules - 10's", "WP 001", "01-Sep-23", "31-Aug-25", 425i64.into(), dec(23, 0), dec(9775, 0)),
        batch("25", "N-Lutin 200 Soft Gel Capsules - 10's", "HH784002", "01-Nov-24", "31-Oct-26", 1685i64.into(), dec(33, 0), dec(55605, 0)),
        batch("26", "N-Lutin 300 SR  Tablets - 10's", "NTU2401", "01-Jun-24", "31-May-26", 3186i64.into(), dec(48, 0), dec(152928, 0)),
        batch("27", "Norifer Injection - 10ml", "ES0625001E", "01-Jan-25", "31-Dec-26", 1494i64.into(), dec(11507, 2), dec(17190959, 2)),
        batch("28", "Norifer Injection - 10ml", "ES0924004", "01-May-24", "30-Apr-26", 639i64.into(), dec(14508, 2), dec(9270825, 2)),
    ]
}
