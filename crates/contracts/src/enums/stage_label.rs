use serde::{Deserialize, Serialize};

/// Pipeline stage a board group represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageLabel {
    Scheduled,
    Unqualified,
    Won,
    Cancelled,
    Noshow,
    Proposal,
    Lost,
}

impl StageLabel {
    /// Lower-case stage code used in config and URLs
    pub fn code(&self) -> &'static str {
        match self {
            StageLabel::Scheduled => "scheduled",
            StageLabel::Unqualified => "unqualified",
            StageLabel::Won => "won",
            StageLabel::Cancelled => "cancelled",
            StageLabel::Noshow => "noshow",
            StageLabel::Proposal => "proposal",
            StageLabel::Lost => "lost",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StageLabel::Scheduled => "Scheduled",
            StageLabel::Unqualified => "Unqualified",
            StageLabel::Won => "Won",
            StageLabel::Cancelled => "Cancelled",
            StageLabel::Noshow => "No Show",
            StageLabel::Proposal => "Proposal",
            StageLabel::Lost => "Lost",
        }
    }

    /// All stages, in board order. Owner discovery scans stages in this order.
    pub fn all() -> Vec<StageLabel> {
        vec![
            StageLabel::Scheduled,
            StageLabel::Unqualified,
            StageLabel::Won,
            StageLabel::Cancelled,
            StageLabel::Noshow,
            StageLabel::Proposal,
            StageLabel::Lost,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "scheduled" => Some(StageLabel::Scheduled),
            "unqualified" => Some(StageLabel::Unqualified),
            "won" => Some(StageLabel::Won),
            "cancelled" => Some(StageLabel::Cancelled),
            "noshow" => Some(StageLabel::Noshow),
            "proposal" => Some(StageLabel::Proposal),
            "lost" => Some(StageLabel::Lost),
            _ => None,
        }
    }

    /// A lead in this stage actually showed up for the sales call.
    pub fn counts_as_sales_call_taken(&self) -> bool {
        matches!(
            self,
            StageLabel::Unqualified | StageLabel::Proposal | StageLabel::Won | StageLabel::Lost
        )
    }
}

impl std::fmt::Display for StageLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
