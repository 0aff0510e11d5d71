use contracts::shared::table::{Table, ITEM_ID_COLUMN, ITEM_NAME_COLUMN};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw board item as returned by the items_page queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub column_values: Vec<ColumnValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnValue {
    pub id: String,
    /// `null` for columns that were never filled in
    #[serde(default)]
    pub text: Option<String>,
}

/// Converts board items into a table: `Item ID`, `Item Name`, then one column per
/// attribute id in order of first appearance across all items.
///
/// Attributes an item does not carry become empty cells.
pub fn items_to_table(items: &[BoardItem]) -> Table {
    let mut columns = vec![ITEM_ID_COLUMN.to_string(), ITEM_NAME_COLUMN.to_string()];

    if items.is_empty() {
        tracing::warn!("No items to convert");
        return Table::new(columns);
    }

    let mut positions: HashMap<&str, usize> = HashMap::new();
    for value in items.iter().flat_map(|item| item.column_values.iter()) {
        if !positions.contains_key(value.id.as_str()) {
            positions.insert(value.id.as_str(), columns.len());
            columns.push(value.id.clone());
        }
    }

    let mut table = Table::new(columns);
    let width = table.columns.len();
    for item in items {
        let mut cells = vec![String::new(); width];
        cells[0] = item.id.clone();
        cells[1] = item.name.clone();
        for value in &item.column_values {
            cells[positions[value.id.as_str()]] = value.text.clone().unwrap_or_default();
        }
        table.push_row(cells);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, values: &[(&str, Option<&str>)]) -> BoardItem {
        BoardItem {
            id: id.to_string(),
            name: format!("Lead {}", id),
            column_values: values
                .iter()
                .map(|(cid, text)| ColumnValue {
                    id: cid.to_string(),
                    text: text.map(str::to_string),
                })
                .collect(),
        }
    }

    #[test]
    fn test_empty_input_gives_empty_table() {
        let table = items_to_table(&[]);
        assert!(table.is_empty());
        assert_eq!(table.columns, vec![ITEM_ID_COLUMN, ITEM_NAME_COLUMN]);
    }

    #[test]
    fn test_fixed_columns_lead_and_nulls_become_empty() {
        let items = vec![
            item("1", &[("person", Some("Alice")), ("numbers__1", Some("1000"))]),
            item("2", &[("person", None), ("numbers__1", Some("5"))]),
        ];
        let table = items_to_table(&items);

        assert_eq!(
            table.columns,
            vec!["Item ID", "Item Name", "person", "numbers__1"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0], vec!["1", "Lead 1", "Alice", "1000"]);
        assert_eq!(table.cell(1, "person"), Some(""));
    }

    #[test]
    fn test_attribute_ids_are_unioned_across_items() {
        let items = vec![
            item("1", &[("person", Some("Alice"))]),
            item("2", &[("date4", Some("2024-10-03")), ("person", Some("Bob"))]),
        ];
        let table = items_to_table(&items);

        assert_eq!(table.columns, vec!["Item ID", "Item Name", "person", "date4"]);
        assert_eq!(table.rows[0], vec!["1", "Lead 1", "Alice", ""]);
        assert_eq!(table.rows[1], vec!["2", "Lead 2", "Bob", "2024-10-03"]);
    }

    #[test]
    fn test_deserializes_api_item() {
        let json = r#"{
            "id": "1771",
            "name": "Acme",
            "column_values": [
                {"id": "person", "text": "Alice"},
                {"id": "subitems__1", "text": null}
            ]
        }"#;
        let item: BoardItem = serde_json::from_str(json).unwrap();
        let table = items_to_table(&[item]);
        assert_eq!(table.rows[0], vec!["1771", "Acme", "Alice", ""]);
    }
}
