use std::path::Path;

use anyhow::{Context, Result};
use backstage_store::{config, Config};
use toml_edit::DocumentMut;

const VALID_KEYS: &str = "project_url, api_key, notepad_path, logging.level, logging.coloured";

/// Show the current effective configuration.
pub fn show_config(config: &Config, config_path: &Path) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config_path.display());

    let exists = config_path.exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!(
        "  project_url: {}",
        config.project_url.as_deref().unwrap_or("<not set>")
    );
    println!("  api_key: {}", mask(config.api_key.as_deref()));
    println!("  notepad_path: {}", config.notepad_path.display());
    println!("  logging.level: {:?}", config.logging.level());
    println!("  logging.coloured: {}", config.logging.coloured());
    println!("  logging.output: {:?}", config.logging.output());

    println!("\nPriority: CLI args > ENV vars (BACKSTAGE_*) > Config file > Defaults");

    Ok(())
}

/// Keys are only ever shown by their first few characters.
fn mask(key: Option<&str>) -> String {
    match key {
        None => "<not set>".to_string(),
        Some(key) => {
            let visible: String = key.chars().take(4).collect();
            format!("{visible}…")
        }
    }
}

/// Writes `key = value` into the document, keeping comments and layout.
fn apply_setting(doc: &mut DocumentMut, key: &str, value: &str) -> Result<()> {
    match key {
        "project_url" | "api_key" | "notepad_path" => {
            doc[key] = toml_edit::value(value);
        }
        "logging.level" | "logging.coloured" => {
            if !doc.contains_key("logging") {
                doc["logging"] = toml_edit::table();
            }
            let field = key.trim_start_matches("logging.");
            doc["logging"][field] = if field == "coloured" {
                let flag: bool = value
                    .parse()
                    .with_context(|| format!("{key} must be true or false, got {value}"))?;
                toml_edit::value(flag)
            } else {
                toml_edit::value(value)
            };
        }
        _ => {
            anyhow::bail!("Unknown config key: {}\n\nValid keys: {}", key, VALID_KEYS);
        }
    }
    Ok(())
}

/// Set a config value.
pub fn set_config(config_path: &Path, key: &str, value: &str) -> Result<()> {
    config::ensure_config_file(config_path)?;

    let contents = std::fs::read_to_string(config_path).context("Failed to read config file")?;
    let mut doc: DocumentMut = contents.parse().context("Failed to parse config file")?;

    apply_setting(&mut doc, key, value)?;

    std::fs::write(config_path, doc.to_string()).context("Failed to write config file")?;

    println!("✓ Updated {} = {}", key, value);
    println!("  in {}", config_path.display());

    Ok(())
}

/// Show the config file path.
pub fn show_path(config_path: &Path) -> Result<()> {
    println!("{}", config_path.display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config(config_path: &Path) -> Result<()> {
    let created = config::ensure_config_file(config_path)?;

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to point backstage at your datastore project.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask(None), "<not set>");
        assert_eq!(mask(Some("eyJhbGciOiJIUzI1NiJ9")), "eyJh…");
    }

    #[test]
    fn test_apply_setting_keeps_comments() {
        let mut doc: DocumentMut = config::example_config().parse().unwrap();
        apply_setting(&mut doc, "api_key", "anon-key").unwrap();
        apply_setting(&mut doc, "logging.coloured", "false").unwrap();

        let text = doc.to_string();
        assert!(text.contains("api_key = \"anon-key\""));
        assert!(text.contains("# Project API key"));
        assert_eq!(doc["logging"]["coloured"].as_bool(), Some(false));
    }

    #[test]
    fn test_apply_setting_rejects_unknown_key() {
        let mut doc = DocumentMut::new();
        assert!(apply_setting(&mut doc, "database_path", "x").is_err());
        assert!(apply_setting(&mut doc, "logging.coloured", "sometimes").is_err());
    }

    #[test]
    fn test_set_config_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        set_config(&path, "project_url", "https://demo.supabase.co").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.project_url.as_deref(), Some("https://demo.supabase.co"));
    }
}
