//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use quotebox_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "session_dir": config.session_dir,
                    "export_dir": config.export_dir,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:    {}", config.data_dir.display());
            println!("  session_dir: {}", config.session_dir.display());
            println!("  export_dir:  {}", config.export_dir.display());
            println!(
                "  log_file:    {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    if value.is_empty() && key != "log_file" {
        bail!("A value is required for '{}'", key);
    }

    match key {
        "data_dir" => config.data_dir = value.into(),
        "session_dir" => config.session_dir = value.into(),
        "export_dir" => config.export_dir = value.into(),
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, session_dir, export_dir, log_file",
                key
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_apply_directories() {
        let mut config = Config::default();

        apply(&mut config, "data_dir", "/tmp/quotes").unwrap();
        apply(&mut config, "export_dir", "/tmp/out").unwrap();

        assert_eq!(config.data_dir, Path::new("/tmp/quotes"));
        assert_eq!(config.export_dir, Path::new("/tmp/out"));
    }

    #[test]
    fn test_apply_clears_log_file() {
        let mut config = Config::default();

        apply(&mut config, "log_file", "/tmp/quotebox.log").unwrap();
        assert_eq!(config.log_file.as_deref(), Some(Path::new("/tmp/quotebox.log")));

        apply(&mut config, "log_file", "none").unwrap();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_apply_rejects_unknown_key() {
        let mut config = Config::default();
        let err = apply(&mut config, "sync_url", "ws://x").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
    }

    #[test]
    fn test_apply_rejects_empty_dir() {
        let mut config = Config::default();
        assert!(apply(&mut config, "data_dir", "").is_err());
    }
}
