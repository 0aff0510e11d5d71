use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Leading column holding the board item id.
pub const ITEM_ID_COLUMN: &str = "Item ID";
/// Leading column holding the board item name.
pub const ITEM_NAME_COLUMN: &str = "Item Name";

/// Rectangular text table: every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Table with no columns and no rows.
    pub const fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding with empty cells or truncating to the table width.
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx)).map(String::as_str)
    }

    /// Renames columns by id; ids missing from `mapping` keep their name.
    pub fn rename_columns(&mut self, mapping: &HashMap<String, String>) {
        for column in self.columns.iter_mut() {
            if let Some(title) = mapping.get(column.as_str()) {
                *column = title.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(vec![
            ITEM_ID_COLUMN.to_string(),
            ITEM_NAME_COLUMN.to_string(),
            "person".to_string(),
        ]);
        table.push_row(vec!["1".into(), "Lead A".into(), "Alice".into()]);
        table
    }

    #[test]
    fn test_push_row_normalizes_width() {
        let mut table = sample();
        table.push_row(vec!["2".into()]);
        table.push_row(vec!["3".into(), "x".into(), "y".into(), "z".into()]);
        assert_eq!(table.rows[1], vec!["2", "", ""]);
        assert_eq!(table.rows[2], vec!["3", "x", "y"]);
    }

    #[test]
    fn test_rename_columns_keeps_unmapped() {
        let mut table = sample();
        let mapping = HashMap::from([("person".to_string(), "Owner".to_string())]);
        table.rename_columns(&mapping);
        assert_eq!(table.columns, vec!["Item ID", "Item Name", "Owner"]);
        assert_eq!(table.cell(0, "Owner"), Some("Alice"));
        assert_eq!(table.cell(0, "person"), None);
        assert_eq!(table.cell(5, "Owner"), None);
    }
}
