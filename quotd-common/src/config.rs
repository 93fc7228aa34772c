//! Configuration resolution for the quotd services
//!
//! Values resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file (`<config dir>/quotd/config.toml`)
//! 4. Compiled default (fallback)

use std::path::PathBuf;

/// Default bind port for the quotd-web HTTP server
pub const DEFAULT_WEB_PORT: u16 = 5730;

/// Default bind port for the quotd-rt gateway
pub const DEFAULT_RT_PORT: u16 = 5731;

/// Default base URL clients use to reach the real-time gateway
pub const DEFAULT_RT_URL: &str = "http://127.0.0.1:5731";

/// Resolve the SQLite database path
pub fn resolve_database_path(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("QUOTD_DATABASE") {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Some(path) = config_file_value("database_path") {
        return PathBuf::from(path);
    }

    // Priority 4: Compiled default
    default_data_dir().join("quotd.db")
}

/// Resolve the real-time gateway base URL
///
/// The web UI embeds this URL into served pages, so it must be reachable
/// from the browser, not just from this host.
pub fn resolve_rt_url(cli_arg: Option<&str>) -> String {
    if let Some(url) = cli_arg {
        return trim_trailing_slash(url);
    }

    if let Ok(url) = std::env::var("QUOTD_RT_URL") {
        return trim_trailing_slash(&url);
    }

    if let Some(url) = config_file_value("rt_url") {
        return trim_trailing_slash(&url);
    }

    DEFAULT_RT_URL.to_string()
}

/// Read a single string key from the config file, tolerating its absence
fn config_file_value(key: &str) -> Option<String> {
    let path = dirs::config_dir()?.join("quotd").join("config.toml");
    let content = std::fs::read_to_string(path).ok()?;
    let value = toml::from_str::<toml::Value>(&content).ok()?;
    value.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

/// OS-dependent default data folder
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("quotd"))
        .unwrap_or_else(|| PathBuf::from("./quotd_data"))
}

fn trim_trailing_slash(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_wins_for_database_path() {
        let path = resolve_database_path(Some("/tmp/override.db"));
        assert_eq!(path, PathBuf::from("/tmp/override.db"));
    }

    #[test]
    fn cli_argument_wins_for_rt_url() {
        let url = resolve_rt_url(Some("http://rt.example:9000/"));
        assert_eq!(url, "http://rt.example:9000");
    }

    #[test]
    fn rt_url_keeps_path_free_form() {
        let url = resolve_rt_url(Some("https://push.example/quotes"));
        assert_eq!(url, "https://push.example/quotes");
    }
}
