use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Date column the funnel date range is applied to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFilterColumn {
    #[default]
    DateCreated,
    SalesCallDate,
}

impl DateFilterColumn {
    /// Title of the stage-table column holding the date
    pub fn column_name(&self) -> &'static str {
        match self {
            DateFilterColumn::DateCreated => "Date Created",
            DateFilterColumn::SalesCallDate => "Sales Call Date",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            DateFilterColumn::DateCreated => "date_created",
            DateFilterColumn::SalesCallDate => "sales_call_date",
        }
    }

    pub fn all() -> Vec<DateFilterColumn> {
        vec![DateFilterColumn::DateCreated, DateFilterColumn::SalesCallDate]
    }
}

impl FromStr for DateFilterColumn {
    type Err = String;

    /// Accepts either the column title or the snake-case key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|c| c.column_name() == s || c.key() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl std::fmt::Display for DateFilterColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}
