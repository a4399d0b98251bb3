use std::path::PathBuf;

use tokio::fs::{create_dir_all, write};

use anyhow::Result;
use clap::Args;
use verstamp_core::Config;
use verstamp_utils::{CONFIG_FILE, get_verstamp_dir};

use crate::context::CommandContext;

#[derive(Args, Debug)]
#[command(about = "Create a verstamp configuration with the default settings")]
pub struct InitArgs {
    /// Directory to initialize (defaults to the current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// If true, do not make any filesystem changes.
    #[arg(short, long, default_value = "false")]
    pub dry_run: bool,
}

/// Initialize a verstamp configuration
///
/// # Errors
/// Returns error if the configuration already exists or cannot be written.
pub async fn handle_init(args: &InitArgs) -> Result<()> {
    let root = match &args.path {
        Some(path) => path.clone(),
        None => CommandContext::current_dir()?,
    };
    let verstamp_dir = get_verstamp_dir(&root);
    let config_file = verstamp_dir.join(CONFIG_FILE);
    if config_file.exists() {
        anyhow::bail!("verstamp already initialized in {}", verstamp_dir.display());
    }
    if !args.dry_run {
        create_dir_all(&verstamp_dir).await?;
        write(&config_file, serde_json::to_string_pretty(&Config::default())?).await?;
    }
    println!("verstamp initialized in {}", verstamp_dir.display());
    Ok(())
}
