pub mod executor;
pub mod monday_api_client;
pub mod service;

#[cfg(test)]
pub mod testing;

use anyhow::Result;
use async_trait::async_trait;

use monday_api_client::{BoardGroup, ItemsPage};

/// Source of board groups and item pages
#[async_trait]
pub trait BoardSource: Send + Sync {
    /// All groups of the board
    async fn fetch_groups(&self, board_id: &str) -> Result<Vec<BoardGroup>>;

    /// First page of a group's items
    async fn fetch_items_page(&self, board_id: &str, group_id: &str, limit: u32)
        -> Result<ItemsPage>;

    /// Page following `cursor`
    async fn fetch_next_items_page(&self, cursor: &str, limit: u32) -> Result<ItemsPage>;
}
