use std::sync::Arc;

use anyhow::{Context, Result};
use backstage_store::{Backend, Config, MemoryBackend, RestBackend};
use serde::Serialize;

pub mod collection;
pub mod config;
pub mod dashboard;
pub mod note;
pub mod pad;

/// The datastore the commands talk to.
///
/// `--memory` gives an empty store that lives as long as the process, which
/// is enough to try the commands without a project.
pub fn open_backend(config: &Config, memory: bool) -> Result<Arc<dyn Backend>> {
    if memory {
        log::info!("Using in-memory store; nothing will be saved");
        return Ok(Arc::new(MemoryBackend::new()));
    }

    let connection = config.connection()?;
    log::debug!("Connecting to {}", connection.project_url);
    let backend = RestBackend::new(&connection.project_url, connection.api_key)
        .context("Failed to create datastore client")?;
    Ok(Arc::new(backend))
}

/// Print a value as indented JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    println!("{text}");
    Ok(())
}

/// Parse a command-line JSON argument.
pub fn parse_json_arg(text: &str) -> Result<serde_json::Value> {
    serde_json::from_str(text).with_context(|| format!("Not valid JSON: {text}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_backend_needs_connection_unless_memory() {
        let config = Config::default();
        assert!(open_backend(&config, true).is_ok());
        let err = open_backend(&config, false).unwrap_err();
        assert!(err.to_string().contains("project_url"));
    }

    #[test]
    fn test_parse_json_arg() {
        assert_eq!(parse_json_arg(r#"{"venue":"Mohawk"}"#).unwrap()["venue"], "Mohawk");
        assert!(parse_json_arg("venue=Mohawk").is_err());
    }
}
