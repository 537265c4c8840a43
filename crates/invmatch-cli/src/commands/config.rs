//! Configuration management command.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use invmatch_core::EngineConfig;

use super::load_config;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a default configuration file
    Init(InitArgs),

    /// Print the default configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path (default: platform config directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show(config_path),
        ConfigCommand::Init(init) => init_config(init),
        ConfigCommand::Path => {
            println!("{}", default_config_path()?.display());
            Ok(())
        }
    }
}

fn show(config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init_config(args: InitArgs) -> anyhow::Result<()> {
    let path = match args.output {
        Some(path) => path,
        None => default_config_path()?,
    };

    if path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    EngineConfig::default().save(&path)?;
    println!("{} {}", style("Wrote").green(), path.display());

    Ok(())
}

fn default_config_path() -> anyhow::Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(base.join("invmatch").join("config.json"))
}
