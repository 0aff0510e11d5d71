use anyhow::Result;
use std::collections::HashMap;

use super::BoardSource;
use crate::shared::config::MondayConfig;
use crate::shared::data::stage_tables::StageTables;
use crate::shared::format::format_number;
use crate::shared::table::ingest::{items_to_table, BoardItem};

/// Fetches every item of a group, following `next_items_page` cursors until the last page
pub async fn fetch_group_items(
    source: &dyn BoardSource,
    board_id: &str,
    group_id: &str,
    limit: u32,
) -> Result<Vec<BoardItem>> {
    let first = source.fetch_items_page(board_id, group_id, limit).await?;
    let mut items = first.items;
    let mut cursor = first.cursor;

    while let Some(current) = cursor {
        let page = source.fetch_next_items_page(&current, limit).await?;
        if page.cursor.as_deref() == Some(current.as_str()) {
            anyhow::bail!("monday.com returned the same cursor twice for group '{}'", group_id);
        }
        items.extend(page.items);
        cursor = page.cursor;
    }

    Ok(items)
}

/// Imports every configured group into its stage table, with column titles applied.
///
/// A configured group the board does not have yields an empty stage table.
pub async fn execute_import(
    source: &dyn BoardSource,
    monday: &MondayConfig,
    columns: &HashMap<String, String>,
) -> Result<StageTables> {
    let groups = source.fetch_groups(&monday.board_id).await?;
    let total = monday.groups.len();
    let mut stages = StageTables::new();

    for (i, mapping) in monday.groups.iter().enumerate() {
        let Some(group) = groups.iter().find(|g| g.id == mapping.group_id) else {
            tracing::warn!(
                "U601: group '{}' ({}) not found in board {}, stage left empty",
                mapping.group_id,
                mapping.stage,
                monday.board_id
            );
            stages.insert(mapping.stage, items_to_table(&[]));
            continue;
        };

        tracing::info!(
            "U601: [{}/{}] fetching group '{}' ({}) as stage '{}'",
            i + 1,
            total,
            group.title,
            group.id,
            mapping.stage
        );

        let items =
            fetch_group_items(source, &monday.board_id, &group.id, monday.page_limit).await?;
        let mut table = items_to_table(&items);
        table.rename_columns(columns);

        tracing::info!(
            "U601: stage '{}' loaded, {} items",
            mapping.stage,
            format_number(table.len())
        );
        stages.insert(mapping.stage, table);
    }

    Ok(stages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::GroupMapping;
    use crate::usecases::u601_import_from_monday::testing::InMemoryBoard;
    use contracts::enums::stage_label::StageLabel;

    fn monday_config(groups: Vec<(&str, StageLabel)>) -> MondayConfig {
        MondayConfig {
            api_url: "http://localhost".to_string(),
            board_id: "42".to_string(),
            page_limit: 2,
            api_key: None,
            groups: groups
                .into_iter()
                .map(|(group_id, stage)| GroupMapping {
                    group_id: group_id.to_string(),
                    stage,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_fetch_group_items_follows_cursor() {
        let source = InMemoryBoard::sample();
        let items = fetch_group_items(&source, "42", "topics", 2).await.unwrap();

        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(
            source.calls(),
            vec!["page topics", "next topics#1", "next topics#2"]
        );
    }

    #[tokio::test]
    async fn test_execute_import_builds_renamed_stage_tables() {
        let source = InMemoryBoard::sample();
        let config = monday_config(vec![("topics", StageLabel::Scheduled), ("g_won", StageLabel::Won)]);
        let columns = HashMap::from([("person".to_string(), "Owner".to_string())]);

        let stages = execute_import(&source, &config, &columns).await.unwrap();

        let scheduled = stages.get(StageLabel::Scheduled);
        assert_eq!(
            scheduled.columns,
            vec!["Item ID", "Item Name", "Owner", "numbers__1", "date5__1"]
        );
        assert_eq!(scheduled.len(), 5);
        assert_eq!(scheduled.cell(4, "Owner"), Some("Dana"));
        assert_eq!(stages.get(StageLabel::Won).len(), 1);
        assert!(stages.get(StageLabel::Lost).is_empty());
        assert_eq!(
            source.calls().iter().filter(|c| *c == "groups").count(),
            1
        );
    }

    #[tokio::test]
    async fn test_missing_group_gives_empty_stage() {
        let source = InMemoryBoard::sample();
        let config = monday_config(vec![("topics", StageLabel::Scheduled), ("gone", StageLabel::Noshow)]);

        let stages = execute_import(&source, &config, &HashMap::new()).await.unwrap();

        assert_eq!(stages.get(StageLabel::Scheduled).len(), 5);
        assert!(stages.get(StageLabel::Noshow).is_empty());
        assert!(!source.calls().iter().any(|c| c.contains("gone")));
    }
}
