use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::BoardSource;
use crate::shared::table::ingest::BoardItem;

const GROUPS_QUERY: &str = r#"
query ($boardId: [ID!]!) {
  boards(ids: $boardId) {
    groups {
      id
      title
    }
  }
}
"#;

const ITEMS_PAGE_QUERY: &str = r#"
query ($boardId: [ID!]!, $groupId: [String!]!, $limit: Int!) {
  boards(ids: $boardId) {
    groups(ids: $groupId) {
      id
      title
      items_page(limit: $limit) {
        cursor
        items {
          id
          name
          column_values {
            id
            text
          }
        }
      }
    }
  }
}
"#;

const NEXT_ITEMS_PAGE_QUERY: &str = r#"
query ($limit: Int!, $cursor: String!) {
  next_items_page(limit: $limit, cursor: $cursor) {
    cursor
    items {
      id
      name
      column_values {
        id
        text
      }
    }
  }
}
"#;

/// HTTP client for the monday.com GraphQL API
pub struct MondayApiClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl MondayApiClient {
    pub fn new(api_url: &str, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.to_string(),
            api_key,
        })
    }

    async fn post_query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Network error calling {}: {}", self.api_url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("monday.com query failed with status {}: {}", status, body);
            anyhow::bail!("Query failed with status code {}: {}", status.as_u16(), body);
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

#[async_trait]
impl BoardSource for MondayApiClient {
    async fn fetch_groups(&self, board_id: &str) -> Result<Vec<BoardGroup>> {
        let data: BoardsData = self
            .post_query(GROUPS_QUERY, json!({ "boardId": [board_id] }))
            .await?;
        let board = data
            .boards
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No boards found with ID {}", board_id))?;
        if board.groups.is_empty() {
            anyhow::bail!("No groups found in board {}", board_id);
        }
        Ok(board.groups.into_iter().map(BoardGroup::from).collect())
    }

    async fn fetch_items_page(
        &self,
        board_id: &str,
        group_id: &str,
        limit: u32,
    ) -> Result<ItemsPage> {
        let data: BoardsData = self
            .post_query(
                ITEMS_PAGE_QUERY,
                json!({ "boardId": [board_id], "groupId": [group_id], "limit": limit }),
            )
            .await?;
        data.boards
            .into_iter()
            .next()
            .and_then(|board| board.groups.into_iter().next())
            .map(|group| group.items_page.unwrap_or_default())
            .ok_or_else(|| {
                anyhow::anyhow!("No group with ID '{}' in board {}", group_id, board_id)
            })
    }

    async fn fetch_next_items_page(&self, cursor: &str, limit: u32) -> Result<ItemsPage> {
        let data: NextItemsPageData = self
            .post_query(
                NEXT_ITEMS_PAGE_QUERY,
                json!({ "limit": limit, "cursor": cursor }),
            )
            .await?;
        Ok(data.next_items_page)
    }
}

/// Unwraps a GraphQL envelope; an `errors` array becomes an error with all messages
fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: GraphQlResponse<T> = serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(500).collect();
        anyhow::anyhow!("Failed to parse monday.com response: {}. Response: {}", e, preview)
    })?;

    if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
        let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        anyhow::bail!("GraphQL errors:\n{}", messages.join("\n"));
    }

    envelope
        .data
        .ok_or_else(|| anyhow::anyhow!("monday.com response has no data"))
}

// ============================================================================
// Response structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct BoardsData {
    #[serde(default)]
    boards: Vec<BoardNode>,
}

#[derive(Debug, Deserialize)]
struct BoardNode {
    #[serde(default)]
    groups: Vec<GroupNode>,
}

#[derive(Debug, Deserialize)]
struct GroupNode {
    id: String,
    title: String,
    #[serde(default)]
    items_page: Option<ItemsPage>,
}

#[derive(Debug, Deserialize)]
struct NextItemsPageData {
    next_items_page: ItemsPage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGroup {
    pub id: String,
    pub title: String,
}

impl From<GroupNode> for BoardGroup {
    fn from(node: GroupNode) -> Self {
        Self {
            id: node.id,
            title: node.title,
        }
    }
}

/// One page of items; `cursor` is `None` on the last page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemsPage {
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub items: Vec<BoardItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items_page_response() {
        let body = r#"{
            "data": {"boards": [{"groups": [{
                "id": "topics",
                "title": "Scheduled",
                "items_page": {
                    "cursor": "MSw2OTQy",
                    "items": [{"id": "1", "name": "Acme", "column_values": [{"id": "person", "text": "Alice"}]}]
                }
            }]}]},
            "account_id": 1
        }"#;
        let data: BoardsData = parse_response(body).unwrap();
        let group = data.boards.into_iter().next().unwrap().groups.into_iter().next().unwrap();
        let page = group.items_page.unwrap();
        assert_eq!(page.cursor.as_deref(), Some("MSw2OTQy"));
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].column_values[0].text.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_parse_last_page_has_no_cursor() {
        let body = r#"{"data": {"next_items_page": {"cursor": null, "items": []}}}"#;
        let data: NextItemsPageData = parse_response(body).unwrap();
        assert!(data.next_items_page.cursor.is_none());
        assert!(data.next_items_page.items.is_empty());
    }

    #[test]
    fn test_graphql_errors_are_reported() {
        let body = r#"{"errors": [{"message": "Not Authenticated"}, {"message": "Try again"}]}"#;
        let err = parse_response::<BoardsData>(body).unwrap_err().to_string();
        assert!(err.contains("Not Authenticated"));
        assert!(err.contains("Try again"));
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        assert!(parse_response::<BoardsData>("<html>502</html>").is_err());
        assert!(parse_response::<BoardsData>(r#"{"data": null}"#).is_err());
    }
}
