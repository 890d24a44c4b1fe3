//! CSV import for inventory exports and minimum-stock sheets
//!
//! Accounting exports carry title and address lines above the real header,
//! so the header row is located by scanning for the columns a file needs.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use rust_decimal::Decimal;
use shared::{leading_integer, Amount, InventoryRecord, MinimumStockRow, QuantityField};
use thiserror::Error;

/// Errors raised while turning a CSV file into records
#[derive(Error, Debug)]
pub enum CsvImportError {
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Columns understood by the importer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Column {
    Id,
    Product,
    Batch,
    ManufacturingDate,
    ExpiryDate,
    TypeOfGood,
    Quantity,
    Rate,
    Value,
    MinimumStock,
    MonthlyAvgSales,
    Packing,
}

impl Column {
    fn from_header(header: &str) -> Option<Self> {
        let header = header.trim().trim_end_matches('.').to_lowercase();
        let column = match header.as_str() {
            "id" => Column::Id,
            "particulars" | "product" | "product name" | "products name" | "item" => {
                Column::Product
            }
            "particular id" | "batch" | "batch no" => Column::Batch,
            "mfg date" | "manufacturing date" => Column::ManufacturingDate,
            "exp date" | "expiry date" | "expiry" => Column::ExpiryDate,
            "type of good" | "type" => Column::TypeOfGood,
            "quantity" => Column::Quantity,
            "rate" => Column::Rate,
            "value" => Column::Value,
            "minimum stock" => Column::MinimumStock,
            "monthly avg sales" => Column::MonthlyAvgSales,
            "packing" => Column::Packing,
            _ => return None,
        };
        Some(column)
    }

    fn label(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Product => "particulars",
            Column::Batch => "particular id",
            Column::ManufacturingDate => "mfg date",
            Column::ExpiryDate => "exp date",
            Column::TypeOfGood => "type of good",
            Column::Quantity => "quantity",
            Column::Rate => "rate",
            Column::Value => "value",
            Column::MinimumStock => "minimum stock",
            Column::MonthlyAvgSales => "monthly avg sales",
            Column::Packing => "packing",
        }
    }
}

/// Column positions of a detected header row
#[derive(Debug)]
struct HeaderMap {
    positions: HashMap<Column, usize>,
}

impl HeaderMap {
    fn from_row(row: &StringRecord) -> Self {
        let mut positions = HashMap::new();
        for (index, cell) in row.iter().enumerate() {
            if let Some(column) = Column::from_header(cell) {
                // First occurrence wins
                positions.entry(column).or_insert(index);
            }
        }
        Self { positions }
    }

    fn has(&self, column: Column) -> bool {
        self.positions.contains_key(&column)
    }

    /// Trimmed, non-empty cell for a column
    fn get<'r>(&self, row: &'r StringRecord, column: Column) -> Option<&'r str> {
        self.positions
            .get(&column)
            .and_then(|&index| row.get(index))
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
    }
}

fn read_rows<R: Read>(reader: R) -> Result<Vec<StringRecord>, CsvImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Find the first row carrying every required column
fn locate_header(
    rows: &[StringRecord],
    required: &[Column],
) -> Result<(usize, HeaderMap), CsvImportError> {
    let mut best_missing: Option<Column> = None;
    for (index, row) in rows.iter().enumerate() {
        let header = HeaderMap::from_row(row);
        match required.iter().find(|column| !header.has(**column)) {
            None => return Ok((index, header)),
            Some(missing) if missing != &required[0] => {
                // Row names the key column but lacks another one
                best_missing.get_or_insert(*missing);
            }
            Some(_) => {}
        }
    }
    let missing = best_missing.unwrap_or(required[0]);
    Err(CsvImportError::MissingColumn(missing.label()))
}

fn is_blank(row: &StringRecord) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

fn parse_amount(cell: Option<&str>) -> Amount {
    match cell {
        None => Amount::default(),
        Some(text) => text
            .replace(',', "")
            .parse::<Decimal>()
            .map(Amount::Number)
            .unwrap_or_else(|_| Amount::Text(text.to_string())),
    }
}

fn parse_quantity(cell: Option<&str>) -> QuantityField {
    match cell {
        None => QuantityField::Count(0),
        Some(text) => match text.parse::<i64>() {
            Ok(count) => QuantityField::Count(count),
            Err(_) => QuantityField::Text(text.to_string()),
        },
    }
}

/// Parse an inventory export into batch records
pub fn parse_inventory<R: Read>(reader: R) -> Result<Vec<InventoryRecord>, CsvImportError> {
    let rows = read_rows(reader)?;
    let (header_index, header) = locate_header(&rows, &[Column::Product, Column::Quantity])?;

    let mut records = Vec::new();
    for (offset, row) in rows[header_index + 1..].iter().enumerate() {
        let row_number = offset + 1;
        if is_blank(row) {
            continue;
        }
        let Some(particulars) = header.get(row, Column::Product) else {
            tracing::warn!(row = row_number, "Skipping inventory row without a product name");
            continue;
        };

        records.push(InventoryRecord {
            id: header
                .get(row, Column::Id)
                .map(str::to_string)
                .unwrap_or_else(|| row_number.to_string()),
            particulars: particulars.to_string(),
            particular_id: header.get(row, Column::Batch).unwrap_or_default().to_string(),
            manufacturing_date: header
                .get(row, Column::ManufacturingDate)
                .unwrap_or_default()
                .to_string(),
            expiry_date: header.get(row, Column::ExpiryDate).unwrap_or_default().to_string(),
            type_of_good: header.get(row, Column::TypeOfGood).map(str::to_string),
            quantity: parse_quantity(header.get(row, Column::Quantity)),
            rate: parse_amount(header.get(row, Column::Rate)),
            value: parse_amount(header.get(row, Column::Value)),
            minimum_stock: header.get(row, Column::MinimumStock).map(leading_integer),
            monthly_avg_sales: header.get(row, Column::MonthlyAvgSales).map(leading_integer),
        });
    }

    Ok(records)
}

/// Parse a minimum-stock sheet. Quantities such as `"50 BOT"` keep their
/// leading integer.
pub fn parse_minimum_stock<R: Read>(reader: R) -> Result<Vec<MinimumStockRow>, CsvImportError> {
    let rows = read_rows(reader)?;
    let (header_index, header) = locate_header(&rows, &[Column::Product, Column::MinimumStock])?;

    let mut sheet = Vec::new();
    for (offset, row) in rows[header_index + 1..].iter().enumerate() {
        if is_blank(row) {
            continue;
        }
        let Some(product_name) = header.get(row, Column::Product) else {
            tracing::warn!(row = offset + 1, "Skipping minimum stock row without a product name");
            continue;
        };

        sheet.push(MinimumStockRow {
            product_name: product_name.to_string(),
            packing: header.get(row, Column::Packing).map(str::to_string),
            monthly_avg_sales: header
                .get(row, Column::MonthlyAvgSales)
                .map(leading_integer)
                .unwrap_or(0),
            minimum_stock: header
                .get(row, Column::MinimumStock)
                .map(leading_integer)
                .unwrap_or(0),
        });
    }

    Ok(sheet)
}

async fn read_file(path: &Path) -> Result<Vec<u8>, CsvImportError> {
    tokio::fs::read(path).await.map_err(|source| CsvImportError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Load an inventory export from disk
pub async fn load_inventory_file(path: &Path) -> Result<Vec<InventoryRecord>, CsvImportError> {
    let bytes = read_file(path).await?;
    parse_inventory(bytes.as_slice())
}

/// Load a minimum-stock sheet from disk
pub async fn load_minimum_stock_file(path: &Path) -> Result<Vec<MinimumStockRow>, CsvImportError> {
    let bytes = read_file(path).await?;
    parse_minimum_stock(bytes.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TALLY_EXPORT: &str = "\
Pharmafabrikon,,,,,,
Stock Summary 05-Feb-25,,,,,,
Particulars,Particular ID,Mfg Date,Exp Date,Quantity,Rate,Value
Norifer - 5ml x 5amp,NRF2401,01-Jan-24,31-Dec-25,1200 amp,24.50,\"29,400.00\"
Norifer - 10ml,NRF2402,01-Feb-24,31-Jan-26,933,30,27990
,,,,,,
,ORPHAN,01-Feb-24,31-Jan-26,10,1,10
Zincovit Tablets - 15s,ZNC01,01-Mar-24,28-Feb-26,n/a,abc,0
";

    #[test]
    fn test_parse_inventory_skips_preamble_and_blank_rows() {
        let records = parse_inventory(TALLY_EXPORT.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);

        let first = &records[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.particulars, "Norifer - 5ml x 5amp");
        assert_eq!(first.particular_id, "NRF2401");
        assert_eq!(first.expiry_date, "31-Dec-25");
        assert_eq!(first.on_hand(), 1200);
        assert_eq!(first.value_amount(), Decimal::new(2940000, 2));

        assert_eq!(records[1].quantity, QuantityField::Count(933));
        // Ids follow the data row position, skipped rows included
        assert_eq!(records[2].id, "5");
    }

    #[test]
    fn test_parse_inventory_defaults_unreadable_numbers() {
        let records = parse_inventory(TALLY_EXPORT.as_bytes()).unwrap();
        let zinc = &records[2];
        assert_eq!(zinc.on_hand(), 0);
        assert_eq!(zinc.rate_amount(), Decimal::ZERO);
        assert_eq!(zinc.minimum_stock, None);
    }

    #[test]
    fn test_parse_inventory_header_aliases() {
        let csv = "Product Name,Batch No,Expiry,Quantity,Minimum Stock,Type\n\
                   Foo - 10ml,B1,15-Mar-24,100 amp,50,Finished Goods\n";
        let records = parse_inventory(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].particular_id, "B1");
        assert_eq!(records[0].minimum_stock, Some(50));
        assert_eq!(records[0].type_of_good.as_deref(), Some("Finished Goods"));
    }

    #[test]
    fn test_parse_inventory_missing_quantity_column() {
        let csv = "Particulars,Rate\nFoo,1\n";
        let err = parse_inventory(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, CsvImportError::MissingColumn("quantity")));

        let err = parse_inventory("a,b\n1,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CsvImportError::MissingColumn("particulars")));
    }

    #[test]
    fn test_parse_minimum_stock_sheet() {
        let csv = "\
TRADING PRODUCT MINIMUM ORDER STOCK,,,,,
S.NO,PRODUCTS NAME,PACKING,MONTHLY AVG SALES,REMARKS,MINIMUM STOCK
1,NORIFER,5ML,40 BOT,,120 BOT
2,Zincovit Tablets,15s,,,
3,,,,,
";
        let sheet = parse_minimum_stock(csv.as_bytes()).unwrap();
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet[0].product_name, "NORIFER");
        assert_eq!(sheet[0].packing.as_deref(), Some("5ML"));
        assert_eq!(sheet[0].monthly_avg_sales, 40);
        assert_eq!(sheet[0].minimum_stock, 120);
        assert_eq!(sheet[1].minimum_stock, 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_imported_quantity_is_leading_integer(qty in "[0-9]{1,6}( (amp|BOT|Vial))?") {
            let csv = format!("Particulars,Quantity\nFoo - 10ml,{}\n", qty);
            let records = parse_inventory(csv.as_bytes()).unwrap();
            prop_assert_eq!(records.len(), 1);
            prop_assert_eq!(records[0].on_hand(), leading_integer(&qty));
        }
    }
}
