//! Configuration view and scaffolding commands (`amatta config`).

use std::path::Path;

use anyhow::{Context, Result};

use amatta::config::AmattaConfig;

use super::super::ConfigCommands;

pub fn cmd_config(config_path: &Path, command: Option<ConfigCommands>) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Amatta Configuration");
            println!("====================");
            println!();
            if config_path.exists() {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No config file at {} (using defaults)", config_path.display());
            }
            println!();

            let config = AmattaConfig::resolve(config_path)?;
            println!("Effective values (with env overrides):");
            println!();
            print!("{}", config.to_toml()?);
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                anyhow::bail!(
                    "Config file already exists at {}. Remove it first to regenerate.",
                    config_path.display()
                );
            }
            let content = AmattaConfig::default().to_toml()?;
            std::fs::write(config_path, content)
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
            println!("Created {}", config_path.display());
        }
    }
    Ok(())
}
