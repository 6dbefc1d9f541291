use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct AppConfig {
    /// Name or path of the package manager binary to shell out to.
    pub tool: String,
    /// How long a query must stay unchanged before a fetch starts.
    pub debounce_ms: u64,
    /// Queries shorter than this show the search prompt instead of fetching.
    pub min_query_chars: usize,
    /// Directory the notification icons are resolved against.
    pub plugin_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tool: "winget".to_string(),
            debounce_ms: 1000,
            min_query_chars: 3,
            plugin_dir: None,
        }
    }
}
