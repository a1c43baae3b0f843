use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docsearch_core::DocsearchConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a default config file
    Init(InitArgs),
    /// Print the effective configuration as TOML
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

/// `config_override` is the global `--config` flag, `index` the global `--index` flag
pub fn run_config(
    args: ConfigArgs,
    config_override: Option<PathBuf>,
    index: Option<PathBuf>,
) -> Result<()> {
    let config_path = config_override
        .clone()
        .unwrap_or_else(DocsearchConfig::config_path);

    match args.command {
        ConfigCommands::Init(args) => run_init(args, config_override.as_deref(), index),
        ConfigCommands::Show => run_show(&config_path),
        ConfigCommands::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
    }
}

fn run_init(args: InitArgs, config_override: Option<&Path>, index: Option<PathBuf>) -> Result<()> {
    let config_path = config_override
        .map(Path::to_path_buf)
        .unwrap_or_else(DocsearchConfig::config_path);

    // Check if config already exists
    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    let mut config = DocsearchConfig::default();
    config.index.path = index;

    match config_override {
        Some(path) => config.save_to(path),
        None => config.save(),
    }
    .context(format!("Failed to write config file: {:?}", config_path))?;

    println!("Created config at: {:?}", config_path);
    if config.index.path.is_none() {
        println!("\nNext step: set index.path to your site's search.js");
    }

    Ok(())
}

fn run_show(config_path: &Path) -> Result<()> {
    let config = if config_path.exists() {
        DocsearchConfig::load_from(config_path)?
    } else {
        DocsearchConfig::default()
    };

    print!("{}", config.to_toml()?);
    Ok(())
}
