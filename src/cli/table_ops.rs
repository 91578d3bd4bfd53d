// src/cli/table_ops.rs
use crate::sheets::{SheetError, SheetResult, SheetSession, Table};

pub fn show(session: &mut SheetSession, row: Option<usize>) -> SheetResult<()> {
    let table = session.load()?;
    match row {
        Some(index) => {
            let record = table.record(index).ok_or(SheetError::RowIndex {
                index,
                row_count: table.row_count(),
            })?;
            let width = table.columns().iter().map(|c| c.chars().count()).max().unwrap_or(0);
            for (column, value) in record {
                println!("{:<width$}  {}", column, value, width = width);
            }
        }
        None => print!("{}", format_table(table)),
    }
    Ok(())
}

pub fn info(session: &mut SheetSession) -> SheetResult<()> {
    let backend = session.backend_name();
    let handle = session.handle().clone();
    println!("Sheet Name: {}", handle.title);
    println!("Sheet Key:  {}", handle.key);
    println!("Sheet URL:  {}", handle.url);
    println!("Worksheet:  {}", handle.worksheet);
    println!("Backend:    {}", backend);
    let table = session.load()?;
    println!("Columns:    {}", table.columns().join(", "));
    println!("Rows:       {}", table.row_count());
    Ok(())
}

pub fn add_row(session: &mut SheetSession, values: Vec<String>) -> SheetResult<()> {
    session.add_row(values)?;
    // Re-read: the save invalidated the cache.
    let rows = session.load()?.row_count();
    println!("Row added. '{}' now has {} rows.", session.handle().title, rows);
    Ok(())
}

pub fn edit_cell(session: &mut SheetSession, row: usize, column: &str, value: String) -> SheetResult<()> {
    session.update_cell(row, column, value)?;
    let table = session.load()?;
    let current = table.cell(row, column).unwrap_or_default().to_string();
    println!("Row {} column '{}' is now '{}'.", row, column, current);
    Ok(())
}

pub fn init_header(session: &mut SheetSession) -> SheetResult<()> {
    session.initialize_header()?;
    let columns = session.load()?.columns().join(", ");
    println!("Header written: {}", columns);
    Ok(())
}

/// Renders the table with a leading index column and padded cells.
pub fn format_table(table: &Table) -> String {
    let index_width = table.row_count().saturating_sub(1).to_string().len().max(1);
    let mut widths: Vec<usize> = table.columns().iter().map(|c| c.chars().count()).collect();
    for row in table.rows() {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |label: &str, cells: &[String]| {
        let mut line = format!("{:>width$}", label, width = index_width);
        for (cell, width) in cells.iter().zip(&widths) {
            line.push_str(&format!("  {:<width$}", cell, width = *width));
        }
        line.trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&render("#", table.columns()));
    out.push('\n');
    let rule_len = index_width + widths.iter().map(|w| w + 2).sum::<usize>();
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for (idx, row) in table.rows().iter().enumerate() {
        out.push_str(&render(&idx.to_string(), row));
        out.push('\n');
    }
    if table.is_empty() {
        out.push_str("(no rows)\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_format_table() {
        let table = Table::from_raw_rows(
            "people",
            vec![
                s(&["Name", "Age", "City"]),
                s(&["Alice", "30", "NYC"]),
                s(&["Bob", "25", "LA"]),
            ],
        )
        .unwrap();
        let expected = "\
#  Name   Age  City
-------------------
0  Alice  30   NYC
1  Bob    25   LA
";
        assert_eq!(format_table(&table), expected);
    }

    #[test]
    fn test_format_empty_table() {
        let table = Table::new(s(&["Name", "Age", "City"])).unwrap();
        let out = format_table(&table);
        assert!(out.starts_with("#  Name  Age  City\n"));
        assert!(out.ends_with("(no rows)\n"));
    }
}
