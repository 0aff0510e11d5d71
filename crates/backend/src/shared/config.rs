use contracts::enums::stage_label::StageLabel;
use serde::Deserialize;
use std::collections::HashMap;

/// Env variable that overrides `monday.api_key`
pub const API_KEY_ENV: &str = "MONDAY_API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub monday: MondayConfig,
    pub cache: CacheConfig,
    /// Board column id -> column title applied to every stage table.
    /// Entries in config.toml are layered over the built-in titles.
    #[serde(default)]
    pub columns: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MondayConfig {
    pub api_url: String,
    pub board_id: String,
    /// Items requested per page
    pub page_limit: u32,
    #[serde(default)]
    pub api_key: Option<String>,
    pub groups: Vec<GroupMapping>,
}

/// Board group holding the leads of one stage
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct GroupMapping {
    pub group_id: String,
    pub stage: StageLabel,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    pub ttl_secs: u64,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000

[monday]
api_url = "https://api.monday.com/v2"
board_id = "6942829967"
page_limit = 500
groups = [
    { group_id = "topics", stage = "scheduled" },
    { group_id = "new_group34578__1", stage = "unqualified" },
    { group_id = "new_group27351__1", stage = "won" },
    { group_id = "new_group54376__1", stage = "cancelled" },
    { group_id = "new_group64021__1", stage = "noshow" },
    { group_id = "new_group65903__1", stage = "proposal" },
    { group_id = "new_group62617__1", stage = "lost" },
]

[cache]
ttl_secs = 3600
"#;

const COLUMN_TITLES: [(&str, &str); 28] = [
    ("name", "Name"),
    ("auto_number__1", "Auto number"),
    ("person", "Owner"),
    ("last_updated__1", "Last updated"),
    ("link__1", "Linkedin"),
    ("phone__1", "Phone"),
    ("email__1", "Email"),
    ("text7__1", "Company"),
    ("date4", "Sales Call Date"),
    ("status9__1", "Follow Up Tracker"),
    ("notes__1", "Notes"),
    ("interested_in__1", "Interested In"),
    ("status4__1", "Plan Type"),
    ("numbers__1", "Deal Value"),
    ("status6__1", "Email Template #1"),
    ("dup__of_email_template__1", "Email Template #2"),
    ("status__1", "Deal Status"),
    ("status2__1", "Send Panda Doc?"),
    ("utm_source__1", "UTM Source"),
    ("date__1", "Deal Status Date"),
    ("utm_campaign__1", "UTM Campaign"),
    ("utm_medium__1", "UTM Medium"),
    ("utm_content__1", "UTM Content"),
    ("link3__1", "UTM LINK"),
    ("lead_source8__1", "Lead Source"),
    ("color__1", "Channel FOR FUNNEL METRICS"),
    ("subitems__1", "Subitems"),
    ("date5__1", "Date Created"),
];

fn default_column_titles() -> HashMap<String, String> {
    COLUMN_TITLES
        .iter()
        .map(|(id, title)| (id.to_string(), title.to_string()))
        .collect()
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    default_config()
}

/// Configuration embedded in the binary
pub fn default_config() -> anyhow::Result<Config> {
    parse_config(DEFAULT_CONFIG)
}

fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config: Config = toml::from_str(contents)?;
    if config.monday.groups.is_empty() {
        anyhow::bail!("monday.groups must map at least one board group to a stage");
    }
    let mut columns = default_column_titles();
    columns.extend(config.columns);
    config.columns = columns;
    Ok(config)
}

impl MondayConfig {
    /// API key from the environment, else from config.toml
    pub fn resolve_api_key(&self) -> anyhow::Result<String> {
        let from_env = std::env::var(API_KEY_ENV).ok();
        pick_api_key(from_env, self.api_key.clone())
            .ok_or_else(|| anyhow::anyhow!("{} is not set and monday.api_key is empty", API_KEY_ENV))
    }
}

fn pick_api_key(from_env: Option<String>, from_config: Option<String>) -> Option<String> {
    [from_env, from_config]
        .into_iter()
        .flatten()
        .map(|k| k.trim().to_string())
        .find(|k| !k.is_empty())
}
