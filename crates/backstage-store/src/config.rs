use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for backstage.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (BACKSTAGE_* prefix)
/// 3. Config file (~/.config/backstage/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the hosted datastore project.
    ///
    /// Can be set via:
    /// - ENV: BACKSTAGE_PROJECT_URL
    /// - Config: project_url = "https://<project>.supabase.co"
    #[serde(default)]
    pub project_url: Option<String>,

    /// Project API key sent with every request.
    ///
    /// Can be set via:
    /// - ENV: BACKSTAGE_API_KEY
    /// - Config: api_key = "..."
    #[serde(default)]
    pub api_key: Option<String>,

    /// Path to the local notepad file.
    ///
    /// Can be set via:
    /// - ENV: BACKSTAGE_NOTEPAD_PATH
    /// - Config: notepad_path = "/path/to/notepad.json"
    /// - Default: ~/.local/share/backstage/notepad.json
    #[serde(default = "default_notepad_path")]
    pub notepad_path: PathBuf,

    /// Logger options, passed to twyg as-is.
    #[serde(default)]
    pub logging: twyg::Opts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_url: None,
            api_key: None,
            notepad_path: default_notepad_path(),
            logging: twyg::Opts::default(),
        }
    }
}

/// Where the datastore lives and how to authenticate to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub project_url: String,
    pub api_key: String,
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/backstage/config.toml
    /// Reads environment variables with BACKSTAGE_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from an explicit file path plus the environment.
    ///
    /// A missing file is not an error; the defaults apply.
    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("backstage");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// The datastore connection, if both halves are configured.
    ///
    /// # Errors
    ///
    /// Names the missing setting when either is absent or blank.
    pub fn connection(&self) -> Result<Connection> {
        let project_url = non_blank(self.project_url.as_deref()).ok_or_else(|| {
            anyhow::anyhow!("project_url is not set (config file or BACKSTAGE_PROJECT_URL)")
        })?;
        let api_key = non_blank(self.api_key.as_deref()).ok_or_else(|| {
            anyhow::anyhow!("api_key is not set (config file or BACKSTAGE_API_KEY)")
        })?;
        Ok(Connection {
            project_url: project_url.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Get the default notepad path.
///
/// Returns: ~/.local/share/backstage/notepad.json (or platform equivalent)
fn default_notepad_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("backstage")
        .join("notepad.json")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/backstage/config.toml
/// - macOS: ~/Library/Application Support/backstage/config.toml
/// - Windows: %APPDATA%\backstage\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("backstage")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Backstage Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (BACKSTAGE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Base URL of the hosted datastore project
#
# Can also be set via:
# - Environment: BACKSTAGE_PROJECT_URL=https://your-project.supabase.co
project_url = "https://your-project.supabase.co"

# Project API key (the public "anon" key is enough)
#
# Can also be set via:
# - Environment: BACKSTAGE_API_KEY=your-key-here
api_key = "your-api-key-here"

# Path to the local notepad (vision, bio, set lists and other drafts)
#
# Can also be set via:
# - Environment: BACKSTAGE_NOTEPAD_PATH=/custom/notepad.json
#
# Default: Platform-specific data directory
#notepad_path = "/path/to/custom/notepad.json"

# Logger settings
#[logging]
#coloured = true
#level = "info"
"#
}

/// Create the config file at `config_path` with the example content if it
/// doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file(config_path: &std::path::Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.notepad_path.ends_with("notepad.json"));
        assert!(config.project_url.is_none());
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        assert!(Config::load().is_ok());
    }

    #[test]
    fn test_config_load_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("missing.toml"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "project_url = \"https://demo.supabase.co\"\napi_key = \"anon\"\nnotepad_path = \"/tmp/pad.json\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.notepad_path, PathBuf::from("/tmp/pad.json"));
        let connection = config.connection().unwrap();
        assert_eq!(connection.project_url, "https://demo.supabase.co");
        assert_eq!(connection.api_key, "anon");
    }

    #[test]
    fn test_ensure_config_file_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        assert!(ensure_config_file(&path).unwrap());
        assert!(!ensure_config_file(&path).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), example_config());
    }

    #[test]
    fn test_connection_requires_both_settings() {
        let config = Config {
            project_url: Some("https://demo.supabase.co".to_string()),
            api_key: Some("  ".to_string()),
            ..Config::default()
        };
        let err = config.connection().unwrap_err();
        assert!(err.to_string().contains("api_key"));
    }
}
