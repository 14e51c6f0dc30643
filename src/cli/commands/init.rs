//! Init command - Write a configuration file

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use super::InitArgs;
use crate::cli::exit_codes;
use crate::config::loader::CONFIG_FILENAME;
use crate::config::Config;
use crate::transport::normalize_base_url;

pub async fn execute(args: &InitArgs, base_url: Option<&str>) -> Result<i32> {
    let config_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

    if config_path.exists() && !args.force {
        eprintln!(
            "{} Configuration file already exists. Use --force to overwrite.",
            "Error:".red().bold()
        );
        return Ok(exit_codes::INVALID_ARGS);
    }

    let mut config = Config::default();
    if let Some(url) = base_url {
        // Validate now rather than on the first request
        normalize_base_url(url)?;
        config.api.base_url = url.to_string();
    }
    if let Some(retries) = args.retries {
        config.transport.retries = retries;
    }

    let config_content = config.to_toml()?;
    fs::write(&config_path, &config_content).context("Failed to write configuration file")?;

    println!(
        "{} Created {} for {}",
        "Success:".green().bold(),
        config_path.display().to_string().cyan(),
        config.api.base_url.yellow()
    );

    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(output: PathBuf, force: bool) -> InitArgs {
        InitArgs {
            force,
            retries: Some(5),
            output: Some(output),
        }
    }

    #[tokio::test]
    async fn test_init_writes_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let code = execute(&args(path.clone(), false), Some("http://resc:8000/resc/v1"))
            .await
            .unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.api.base_url, "http://resc:8000/resc/v1");
        assert_eq!(config.transport.retries, 5);
    }

    #[tokio::test]
    async fn test_init_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "# keep me").unwrap();

        let code = execute(&args(path.clone(), false), None).await.unwrap();
        assert_eq!(code, exit_codes::INVALID_ARGS);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# keep me");

        let code = execute(&args(path.clone(), true), None).await.unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
    }

    #[tokio::test]
    async fn test_init_rejects_invalid_base_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert!(execute(&args(path.clone(), false), Some("ftp://resc"))
            .await
            .is_err());
        assert!(!path.exists());
    }
}
