use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::{Value, json};
use verstamp_core::{VersionSet, VersionStream};
use verstamp_utils::{display_version, display_version_file};

use crate::{context::CommandContext, finders::describe_file_patterns, options::FormatOptions};

#[derive(Args, Debug)]
#[command(about = "List version files and the versions they carry")]
pub struct CheckArgs {
    /// Directory to search (defaults to the current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    #[arg(short, long, default_value = "stdout")]
    pub format: FormatOptions,
}

fn slots_json(stream: &VersionStream) -> Value {
    let mut slots = serde_json::Map::new();
    for kind in stream.format().slots() {
        let value = match (stream.raw_version(*kind), stream.version(*kind)) {
            (None, _) => Value::Null,
            (Some(_), Ok(version)) => json!({ "version": version.to_string() }),
            (Some(raw), Err(error)) => json!({ "raw": raw, "error": error.to_string() }),
        };
        slots.insert(kind.to_string(), value);
    }
    Value::Object(slots)
}

/// List version files
///
/// # Errors
/// Returns error if discovery fails. Files that cannot be read are reported in the
/// listing.
pub async fn handle_check(args: &CheckArgs) -> Result<()> {
    let context = CommandContext::new(args.path.as_deref()).await?;
    let files = context.load_files().await?;

    let mut highest = VersionSet::EMPTY;
    let mut lines = Vec::new();
    let mut entries = Vec::new();
    for file in &files {
        match &file.stream {
            Ok(stream) => {
                highest = highest.max(&stream.get_versions());
                lines.push(display_version_file(&file.relative_path, stream));
                entries.push(json!({
                    "path": file.relative_path.display().to_string(),
                    "format": stream.format().name(),
                    "encoding": stream.encoding().to_string(),
                    "versions": slots_json(stream),
                }));
            }
            Err(error) => {
                lines.push(format!(
                    "{} {}\n  {}",
                    "[error]".red().bold(),
                    file.relative_path.display().to_string().bright_white().bold(),
                    format!("{error:#}").red()
                ));
                entries.push(json!({
                    "path": file.relative_path.display().to_string(),
                    "error": format!("{error:#}"),
                }));
            }
        }
    }

    let highest_version = highest.highest_populated_slot();
    let stdout_msg = if files.is_empty() {
        format!(
            "No version files found (looking for {})",
            describe_file_patterns(&context.finders)
        )
    } else {
        format!(
            "Found {} version files\n{}\n{} {}",
            files.len(),
            lines.join("\n"),
            "Highest version:".bold(),
            display_version(&highest_version)
        )
    };
    let json_msg = serde_json::to_string_pretty(&json!({
        "files": entries,
        "highest": (!highest_version.is_empty()).then(|| highest_version.to_string()),
    }))?;
    args.format.print(&stdout_msg, &json_msg);
    Ok(())
}
