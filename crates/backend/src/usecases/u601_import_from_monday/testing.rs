use anyhow::Result;
use async_trait::async_trait;
use contracts::enums::stage_label::StageLabel;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::monday_api_client::{BoardGroup, ItemsPage};
use super::BoardSource;
use crate::shared::app_state::AppState;
use crate::shared::config::{default_config, GroupMapping};
use crate::shared::table::ingest::{BoardItem, ColumnValue};

/// Board held in memory; cursors look like "<group>#<page index>"
pub struct InMemoryBoard {
    pub groups: Vec<BoardGroup>,
    pub pages: HashMap<String, Vec<Vec<BoardItem>>>,
    calls: Mutex<Vec<String>>,
}

impl InMemoryBoard {
    pub fn new(groups: Vec<BoardGroup>, pages: HashMap<String, Vec<Vec<BoardItem>>>) -> Self {
        Self {
            groups,
            pages,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Two groups: "topics" over three pages and "g_won" on one page
    pub fn sample() -> Self {
        Self::new(
            vec![group("topics", "Scheduled"), group("g_won", "Won")],
            HashMap::from([
                (
                    "topics".to_string(),
                    vec![
                        vec![lead("1", "Alice", "2024-10-02"), lead("2", "Bob", "2024-10-03")],
                        vec![lead("3", "Alice", "2024-10-04"), lead("4", "Carol", "2024-11-20")],
                        vec![lead("5", "Dana", "")],
                    ],
                ),
                ("g_won".to_string(), vec![vec![lead("9", "Alice", "2024-10-05")]]),
            ]),
        )
    }

    /// Requests seen so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn page(&self, group_id: &str, index: usize) -> ItemsPage {
        let pages = &self.pages[group_id];
        ItemsPage {
            cursor: (index + 1 < pages.len()).then(|| format!("{}#{}", group_id, index + 1)),
            items: pages[index].clone(),
        }
    }
}

pub fn group(id: &str, title: &str) -> BoardGroup {
    BoardGroup {
        id: id.to_string(),
        title: title.to_string(),
    }
}

/// Item carrying `person`, `numbers__1` and `date5__1` like the live board
pub fn lead(id: &str, owner: &str, created: &str) -> BoardItem {
    let value = |cid: &str, text: &str| ColumnValue {
        id: cid.to_string(),
        text: Some(text.to_string()),
    };
    BoardItem {
        id: id.to_string(),
        name: format!("Lead {}", id),
        column_values: vec![
            value("person", owner),
            value("numbers__1", "100"),
            value("date5__1", created),
        ],
    }
}

#[async_trait]
impl BoardSource for InMemoryBoard {
    async fn fetch_groups(&self, _board_id: &str) -> Result<Vec<BoardGroup>> {
        self.calls.lock().unwrap().push("groups".into());
        Ok(self.groups.clone())
    }

    async fn fetch_items_page(
        &self,
        _board_id: &str,
        group_id: &str,
        _limit: u32,
    ) -> Result<ItemsPage> {
        self.calls.lock().unwrap().push(format!("page {}", group_id));
        Ok(self.page(group_id, 0))
    }

    async fn fetch_next_items_page(&self, cursor: &str, _limit: u32) -> Result<ItemsPage> {
        self.calls.lock().unwrap().push(format!("next {}", cursor));
        let (group_id, index) = cursor
            .split_once('#')
            .ok_or_else(|| anyhow::anyhow!("bad cursor {}", cursor))?;
        Ok(self.page(group_id, index.parse()?))
    }
}

/// Default config mapping the sample board's groups to scheduled and won
pub fn test_state(source: Option<Arc<InMemoryBoard>>) -> AppState {
    let mut config = default_config().unwrap();
    config.monday.groups = vec![
        GroupMapping {
            group_id: "topics".into(),
            stage: StageLabel::Scheduled,
        },
        GroupMapping {
            group_id: "g_won".into(),
            stage: StageLabel::Won,
        },
    ];
    AppState::new(config, source.map(|s| s as Arc<dyn BoardSource>))
}
