// src/sheets/sheet_table.rs
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::error::{SheetError, SheetResult};

/// In-memory working copy of the sheet.
///
/// Every row holds exactly `columns.len()` cells; constructors and mutators
/// keep that invariant, so callers never see ragged rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> SheetResult<Self> {
        validate_header(&columns)?;
        Ok(Self { columns, rows: Vec::new() })
    }

    /// Builds a table from the raw value matrix returned by a store:
    /// the first row is the header, the rest are data rows.
    ///
    /// Short rows are padded with empty cells. Cells past the header width are
    /// dropped when blank and rejected otherwise.
    pub fn from_raw_rows(sheet: &str, raw: Vec<Vec<String>>) -> SheetResult<Self> {
        let mut raw = raw.into_iter();
        let Some(mut header) = raw.next() else {
            return Err(SheetError::Schema(format!(
                "sheet '{}' has no header row",
                sheet
            )));
        };
        while header.last().is_some_and(|h| h.is_empty()) {
            header.pop();
        }
        validate_header(&header).map_err(|e| match e {
            SheetError::Schema(msg) => SheetError::Schema(format!("sheet '{}': {}", sheet, msg)),
            other => other,
        })?;

        let width = header.len();
        let mut rows = Vec::new();
        for (data_idx, mut row) in raw.enumerate() {
            if row.len() > width {
                if row[width..].iter().any(|cell| !cell.is_empty()) {
                    // +2: one for the header, one for 1-based sheet rows
                    return Err(SheetError::Schema(format!(
                        "sheet '{}' row {} has values outside the {} header columns",
                        sheet,
                        data_idx + 2,
                        width
                    )));
                }
                row.truncate(width);
            }
            row.resize(width, String::new());
            rows.push(row);
        }

        Ok(Self { columns: header, rows })
    }

    /// Header followed by every data row, as written to the store.
    pub fn to_raw_rows(&self) -> Vec<Vec<String>> {
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        out.push(self.columns.clone());
        out.extend(self.rows.iter().cloned());
        out
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn cell(&self, index: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(index).map(|row| row[col].as_str())
    }

    /// Column/value pairs of one row, in column order.
    pub fn record(&self, index: usize) -> Option<Vec<(&str, &str)>> {
        let row = self.rows.get(index)?;
        Some(
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.iter().map(String::as_str))
                .collect(),
        )
    }

    /// Appends a row at the end. Rows are never re-sorted.
    pub fn append_row(&mut self, values: Vec<String>) -> SheetResult<()> {
        if values.len() != self.columns.len() {
            return Err(SheetError::Validation {
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        self.rows.push(values);
        Ok(())
    }

    /// Replaces a single cell. The table is untouched when the address is invalid.
    pub fn update_cell(&mut self, index: usize, column: &str, value: String) -> SheetResult<()> {
        if index >= self.rows.len() {
            return Err(SheetError::RowIndex {
                index,
                row_count: self.rows.len(),
            });
        }
        let col = self
            .column_index(column)
            .ok_or_else(|| SheetError::Column(column.to_string()))?;
        self.rows[index][col] = value;
        Ok(())
    }
}

fn validate_header(columns: &[String]) -> SheetResult<()> {
    if columns.is_empty() {
        return Err(SheetError::Schema("header row is empty".to_string()));
    }
    let mut seen = HashSet::new();
    for (idx, name) in columns.iter().enumerate() {
        if name.is_empty() {
            return Err(SheetError::Schema(format!("header cell {} is blank", idx + 1)));
        }
        if !seen.insert(name.as_str()) {
            return Err(SheetError::Schema(format!("duplicate column '{}'", name)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn people() -> Table {
        Table::from_raw_rows(
            "people",
            vec![
                s(&["Name", "Age", "City"]),
                s(&["Alice", "30", "NYC"]),
                s(&["Bob", "25", "LA"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_no_rows_is_missing_header() {
        let err = Table::from_raw_rows("people", vec![]).unwrap_err();
        assert!(matches!(err, SheetError::Schema(_)));
    }

    #[test]
    fn test_header_only_gives_empty_table() {
        let table = Table::from_raw_rows("people", vec![s(&["Name", "Age", "City"])]).unwrap();
        assert_eq!(table.columns(), s(&["Name", "Age", "City"]).as_slice());
        assert!(table.is_empty());
    }

    #[test]
    fn test_blank_or_duplicate_header_rejected() {
        let blank = Table::from_raw_rows("people", vec![vec![]]).unwrap_err();
        assert!(matches!(blank, SheetError::Schema(_)));

        let dup = Table::from_raw_rows("people", vec![s(&["Name", "Name"])]).unwrap_err();
        assert!(matches!(dup, SheetError::Schema(_)));

        let gap = Table::from_raw_rows("people", vec![s(&["Name", "", "City"])]).unwrap_err();
        assert!(matches!(gap, SheetError::Schema(_)));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = Table::from_raw_rows(
            "people",
            vec![s(&["Name", "Age", "City"]), s(&["Dora"]), vec![]],
        )
        .unwrap();
        assert_eq!(table.row(0).unwrap(), s(&["Dora", "", ""]).as_slice());
        assert_eq!(table.row(1).unwrap(), s(&["", "", ""]).as_slice());
    }

    #[test]
    fn test_wide_rows_only_allowed_when_blank() {
        let table = Table::from_raw_rows(
            "people",
            vec![s(&["Name", "Age"]), s(&["Eve", "41", "", ""])],
        )
        .unwrap();
        assert_eq!(table.row(0).unwrap(), s(&["Eve", "41"]).as_slice());

        let err = Table::from_raw_rows(
            "people",
            vec![s(&["Name", "Age"]), s(&["Eve", "41", "extra"])],
        )
        .unwrap_err();
        assert!(matches!(err, SheetError::Schema(_)));
    }

    #[test]
    fn test_raw_rows_roundtrip() {
        let table = people();
        let again = Table::from_raw_rows("people", table.to_raw_rows()).unwrap();
        assert_eq!(table, again);
    }

    #[test]
    fn test_append_preserves_prefix() {
        let before = people();
        let mut after = before.clone();
        after.append_row(s(&["Carol", "40", "SF"])).unwrap();

        assert_eq!(after.row_count(), before.row_count() + 1);
        assert_eq!(&after.rows()[..before.row_count()], before.rows());
        assert_eq!(after.row(2).unwrap(), s(&["Carol", "40", "SF"]).as_slice());
    }

    #[test]
    fn test_append_rejects_wrong_arity() {
        let mut table = people();
        let err = table.append_row(s(&["Carol", "40"])).unwrap_err();
        assert!(matches!(err, SheetError::Validation { expected: 3, actual: 2 }));
        assert_eq!(table, people());
    }

    #[test]
    fn test_update_is_localized() {
        let before = people();
        let mut after = before.clone();
        after.update_cell(0, "City", "Boston".to_string()).unwrap();

        for (idx, row) in after.rows().iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                if idx == 0 && col_idx == 2 {
                    assert_eq!(cell, "Boston");
                } else {
                    assert_eq!(cell, &before.rows()[idx][col_idx]);
                }
            }
        }
    }

    #[test]
    fn test_update_bounds_rejected() {
        let mut table = people();
        let err = table.update_cell(2, "City", "X".to_string()).unwrap_err();
        assert!(matches!(err, SheetError::RowIndex { index: 2, row_count: 2 }));

        let err = table.update_cell(0, "Country", "X".to_string()).unwrap_err();
        assert!(matches!(err, SheetError::Column(ref c) if c == "Country"));

        assert_eq!(table, people());
    }

    #[test]
    fn test_update_on_empty_table_rejected() {
        let mut table = Table::new(s(&["Name", "Age", "City"])).unwrap();
        let err = table.update_cell(0, "Name", "X".to_string()).unwrap_err();
        assert!(matches!(err, SheetError::RowIndex { index: 0, row_count: 0 }));
    }

    #[test]
    fn test_record_pairs_columns() {
        let table = people();
        assert_eq!(
            table.record(1).unwrap(),
            vec![("Name", "Bob"), ("Age", "25"), ("City", "LA")]
        );
        assert_eq!(table.cell(0, "Age"), Some("30"));
        assert!(table.record(5).is_none());
    }
}
