use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use verstamp_utils::get_verstamp_config;

use crate::context::CommandContext;

#[derive(Args, Debug)]
#[command(about = "Show the effective verstamp configuration")]
pub struct ConfigArgs {
    /// Project directory (defaults to the current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

/// Display verstamp configuration
///
/// # Errors
/// Returns error if reading the configuration fails.
pub async fn handle_config(args: &ConfigArgs) -> Result<()> {
    let root = match &args.path {
        Some(path) => path.clone(),
        None => CommandContext::current_dir()?,
    };
    let config = get_verstamp_config(&root).await?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
