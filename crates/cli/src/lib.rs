use anyhow::Result;

use clap::{Parser, Subcommand};

use crate::commands::{
    CheckArgs, ConfigArgs, InitArgs, UpdateArgs, handle_check, handle_config, handle_init,
    handle_update,
};
pub mod commands;
mod context;
mod finders;
pub mod options;
pub mod prompter;

pub use prompter::UserCancelled;

#[derive(Parser, Debug)]
#[command(
    name = "verstamp",
    author,
    version,
    about = "Find and rewrite version numbers in AssemblyInfo files, resource scripts and installer projects",
    help_template = "{name} {version}\n{about}\n\n{usage-heading} {usage}\n\n{all-args}"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Init(InitArgs),
    Check(CheckArgs),
    Update(UpdateArgs),
    Config(ConfigArgs),
}

/// # Errors
/// Returns the error of the command that ran.
pub async fn main(args: &[String]) -> Result<()> {
    let cli = Cli::parse_from(args);
    match cli.command {
        Commands::Init(args) => handle_init(&args).await?,
        Commands::Check(args) => handle_check(&args).await?,
        Commands::Update(args) => handle_update(&args).await?,
        Commands::Config(args) => handle_config(&args).await?,
    }
    Ok(())
}
