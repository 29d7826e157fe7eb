use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::InventoryResult;
use crate::model::{IngredientCategory, IngredientInput};
use crate::query::IngredientRow;

/// One line of the CSV interchange format. Headers are the field
/// names; identifiers, derived costs and timestamps stay out so a file
/// exported from one database imports cleanly into another.
#[derive(Debug, Serialize, Deserialize)]
pub struct CsvRecord {
    pub name: String,
    pub category: IngredientCategory,
    pub purchase_unit: String,
    pub pack_size: f64,
    pub pack_price: f64,
    pub cost_unit: String,
    #[serde(default)]
    pub wastage_pct: f64,
    #[serde(default)]
    pub stock_qty: f64,
    #[serde(default)]
    pub reorder_level: f64,
}

impl From<CsvRecord> for IngredientInput {
    fn from(record: CsvRecord) -> Self {
        Self {
            name: record.name,
            category: record.category,
            purchase_unit: record.purchase_unit,
            pack_size: record.pack_size,
            pack_price: record.pack_price,
            cost_unit: record.cost_unit,
            wastage_pct: record.wastage_pct,
            stock_qty: record.stock_qty,
            reorder_level: record.reorder_level,
        }
    }
}

impl From<&IngredientRow> for CsvRecord {
    fn from(row: &IngredientRow) -> Self {
        Self {
            name: row.name.clone(),
            category: row.category(),
            purchase_unit: row.purchase_unit.clone(),
            pack_size: row.pack_size,
            pack_price: row.pack_price,
            cost_unit: row.cost_unit.clone(),
            wastage_pct: row.wastage_pct,
            stock_qty: row.stock_qty,
            reorder_level: row.reorder_level,
        }
    }
}

/// A row that failed to parse, with its 1-based file line. Line 1 is
/// the header.
#[derive(Debug)]
pub struct RowError {
    pub line: u64,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub inputs: Vec<IngredientInput>,
    pub errors: Vec<RowError>,
}

/// Parse an ingredient CSV. Malformed rows land in the report's error
/// list instead of aborting the batch.
pub fn read_csv<R: Read>(reader: R) -> ImportReport {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut report = ImportReport::default();

    for record in csv_reader.deserialize::<CsvRecord>() {
        match record {
            Ok(record) => report.inputs.push(record.into()),
            Err(err) => {
                // The reader tracks physical lines, so quoted
                // multi-line fields do not shift the reported number.
                let line = err.position().map(|p| p.line()).unwrap_or_default();
                report.errors.push(RowError {
                    line,
                    message: err.to_string(),
                });
            }
        }
    }

    if !report.errors.is_empty() {
        tracing::warn!(
            parsed = report.inputs.len(),
            failed = report.errors.len(),
            "csv import parsed with row errors"
        );
    }

    report
}

/// Write rows as interchange CSV. Returns how many records were
/// written.
pub fn write_csv<W: Write>(writer: W, rows: &[IngredientRow]) -> InventoryResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for row in rows {
        csv_writer.serialize(CsvRecord::from(row))?;
    }
    csv_writer.flush()?;

    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::read_csv;

    #[test]
    fn parses_well_formed_rows() {
        let data = "\
name,category,purchase_unit,pack_size,pack_price,cost_unit,wastage_pct,stock_qty,reorder_level
Flour,pantry,kg,25,18.5,g,0,5000,1000
Olive Oil,pantry,l,5,42.0,ml,0,2000,500
";
        let report = read_csv(data.as_bytes());
        assert_eq!(report.inputs.len(), 2);
        assert!(report.errors.is_empty());
        assert_eq!(report.inputs[0].name, "Flour");
        assert_eq!(report.inputs[1].cost_unit, "ml");
    }

    #[test]
    fn collects_bad_rows_and_keeps_going() {
        let data = "\
name,category,purchase_unit,pack_size,pack_price,cost_unit,wastage_pct,stock_qty,reorder_level
Flour,pantry,kg,25,18.5,g,0,5000,1000
Broken,pantry,kg,not-a-number,18.5,g,0,0,0
Sugar,pantry,kg,10,9.0,g,0,0,0
";
        let report = read_csv(data.as_bytes());
        assert_eq!(report.inputs.len(), 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].line, 3);
    }

    #[test]
    fn quoted_multi_line_fields_do_not_shift_error_lines() {
        let data = "\
name,category,purchase_unit,pack_size,pack_price,cost_unit,wastage_pct,stock_qty,reorder_level
\"Multi
Grain Flour\",pantry,kg,25,18.5,g,0,5000,1000
Broken,pantry,kg,not-a-number,18.5,g,0,0,0
";
        let report = read_csv(data.as_bytes());
        assert_eq!(report.inputs.len(), 1);
        assert_eq!(report.inputs[0].name, "Multi\nGrain Flour");
        assert_eq!(report.errors.len(), 1);
        // The record before it spans two physical lines.
        assert_eq!(report.errors[0].line, 4);
    }

    #[test]
    fn optional_columns_default_to_zero() {
        let data = "\
name,category,purchase_unit,pack_size,pack_price,cost_unit
Eggs,dairy,box,1,6.0,pc
";
        let report = read_csv(data.as_bytes());
        assert_eq!(report.inputs.len(), 1);
        assert_eq!(report.inputs[0].stock_qty, 0.0);
        assert_eq!(report.inputs[0].wastage_pct, 0.0);
    }
}
