//! Product table reader
//!
//! Reads one row per product from the product sheet. Coordinates are absolute sheet
//! positions (row 0 is the first row of the sheet), so a title row above the header is
//! addressed the same way whether or not it is empty.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use serde::Serialize;

use crate::config::SheetConfig;
use crate::error::{ProdimgError, Result, workbook as workbook_error};

/// One product row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    /// 0-based sheet row
    pub row: u32,
    /// Parsed SKU, `None` when the cell is empty or not an integer
    pub sku: Option<u64>,
    /// Display name, empty when the sheet has no name column
    pub name: String,
}

/// Read every non-empty row below the header of the configured sheet.
pub fn read_products(path: &Path, sheet: &SheetConfig) -> Result<Vec<ProductRecord>> {
    if !path.is_file() {
        return Err(crate::error::fs::not_found(path));
    }

    let mut workbook =
        open_workbook_auto(path).map_err(|e| workbook_error::read_failed(path, e))?;

    let sheet_names = workbook.sheet_names();
    let used_sheet = match &sheet.name {
        Some(name) if sheet_names.iter().any(|s| s == name) => name.clone(),
        Some(name) => return Err(ProdimgError::SheetNotFound { name: name.clone() }),
        None => sheet_names
            .first()
            .cloned()
            .ok_or(ProdimgError::NoWorksheet)?,
    };

    let range = workbook
        .worksheet_range(&used_sheet)
        .map_err(|e| workbook_error::read_failed(path, e))?;

    products_from_range(&range, sheet)
}

fn products_from_range(range: &Range<Data>, sheet: &SheetConfig) -> Result<Vec<ProductRecord>> {
    let (Some((_, first_col)), Some((last_row, last_col))) = (range.start(), range.end()) else {
        return Err(workbook_error::column_not_found(
            &sheet.sku_column,
            sheet.header_row,
        ));
    };

    let header = sheet.header_row;
    let find_column = |wanted: &str| {
        (first_col..=last_col).find(|&col| {
            range
                .get_value((header, col))
                .and_then(cell_string)
                .is_some_and(|h| h.eq_ignore_ascii_case(wanted.trim()))
        })
    };

    let sku_col = find_column(sheet.sku_column.as_str())
        .ok_or_else(|| workbook_error::column_not_found(&sheet.sku_column, header))?;
    let name_col = find_column(sheet.name_column.as_str());

    let mut products = Vec::new();
    for row in header.saturating_add(1)..=last_row {
        let is_empty = (first_col..=last_col)
            .all(|col| range.get_value((row, col)).and_then(cell_string).is_none());
        if is_empty {
            continue;
        }

        products.push(ProductRecord {
            row,
            sku: range.get_value((row, sku_col)).and_then(cell_sku),
            name: name_col
                .and_then(|col| range.get_value((row, col)))
                .and_then(cell_string)
                .unwrap_or_default(),
        });
    }

    Ok(products)
}

fn cell_string(cell: &Data) -> Option<String> {
    let value = match cell {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Float(v) => format!("{v}"),
        Data::Int(v) => format!("{v}"),
        Data::Bool(v) => v.to_string(),
        other => other.to_string(),
    };
    if value.is_empty() { None } else { Some(value) }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cell_sku(cell: &Data) -> Option<u64> {
    match cell {
        Data::Int(v) => u64::try_from(*v).ok(),
        Data::Float(v) if v.fract() == 0.0 && *v >= 0.0 && *v < u64::MAX as f64 => Some(*v as u64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
