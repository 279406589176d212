use std::env;
use std::path::PathBuf;

/// Origin the development server proxies `/api` to. Native builds have no
/// page origin, so an empty base URL resolves here.
pub const DEFAULT_BACKEND_ORIGIN: &str = "https://deepeucbackend-production.up.railway.app";

pub const API_BASE_URL_VAR: &str = "API_BASE_URL";
pub const DATA_DIR_VAR: &str = "DEEPEUC_DATA_DIR";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// URL prefix for the chat endpoint; empty means "same origin".
    pub api_base_url: String,
    /// Overrides the platform data directory for the persisted transcript.
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var(API_BASE_URL_VAR).unwrap_or_default(),
            data_dir: env::var(DATA_DIR_VAR)
                .ok()
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn chat_endpoint(&self) -> String {
        let base = self.api_base_url.trim().trim_end_matches('/');
        let base = if base.is_empty() {
            DEFAULT_BACKEND_ORIGIN
        } else {
            base
        };
        format!("{base}/api/chat")
    }

    /// Directory holding `chatHistory.json` on native targets.
    pub fn storage_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        if let Some(data_dir) = dirs::data_local_dir() {
            return data_dir.join("deepeuc");
        }
        PathBuf::from("cache")
    }
}

/// Applies `KEY=VALUE` lines to the process environment without overriding
/// variables that are already set.
pub fn apply_env_lines(contents: &str) {
    for (key, value) in parse_env_lines(contents) {
        if env::var(key).is_err() {
            // SAFETY: called from main before the runtime or any thread starts
            unsafe {
                env::set_var(key, value);
            }
        }
    }
}

fn parse_env_lines(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}
