/// Config file loading and creation for the votesort CLI.
///
/// Config lives at ~/.config/votesort/config.toml.
/// All fields are optional — CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Debug, Deserialize, Default)]
pub struct VotesortConfig {
    pub items: Option<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    pub seed: Option<u64>,
    pub format: Option<String>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# votesort configuration
# All values here can be overridden by CLI flags.

# Default item file: a JSON array of titles, or one title per line
# items = \"/path/to/songs.txt\"

# Titles to leave out of every session (--exclude adds to this list)
# exclude = [\"Better\", \"Still Here\"]

# Fixed shuffle seed for reproducible pairings. Omit for a fresh shuffle each run.
# seed = 42

# Output format for the final ranking: \"table\", \"text\", or \"json\"
# format = \"table\"
";

/// Returns the default config path: ~/.config/votesort/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("votesort").join("config.toml")
}

/// Parse config text.
pub fn parse_config(content: &str, path: &Path) -> VotesortConfig {
    toml::from_str(content)
        .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display())))
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> VotesortConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content, path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => VotesortConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config(path: &Path) {
    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));
}
