//! Config command - configuration management

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

use crate::args::{ConfigArgs, ConfigCommands};
use crate::config::AppConfig;

pub fn execute(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init { path, force } => {
            write_example_config(&path, force)?;
            println!("Created config file: {}", path.display());
            println!();
            println!("Export the API key named by llm.gemini.api_key_env, then run");
            println!("'news-classifier doctor' to check the setup.");
            Ok(())
        }
    }
}

/// Write the example configuration, creating missing parent directories
fn write_example_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, AppConfig::example_toml())
        .with_context(|| format!("Failed to write config file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/config.toml");

        write_example_config(&path, false).unwrap();

        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.llm.provider, "gemini");
    }

    #[test]
    fn test_force_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "# stale").unwrap();

        assert!(write_example_config(&path, false).is_err());
        write_example_config(&path, true).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[llm.gemini]"));
    }
}
