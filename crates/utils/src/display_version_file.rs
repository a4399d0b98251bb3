use std::path::Path;

use colored::Colorize;
use verstamp_core::{Version, VersionStream};

pub fn display_version(version: &Version) -> String {
    if version.is_empty() {
        "none".bright_black().to_string()
    } else if version.is_concrete() {
        version.to_string().bright_green().to_string()
    } else {
        version.to_string().yellow().to_string()
    }
}

pub fn display_update(current: &Version, next: &Version) -> String {
    format!(
        "{} {} {}",
        display_version(current),
        "→".bright_cyan(),
        display_version(next)
    )
}

/// One header line for the file, then one line per slot its format can carry.
pub fn display_version_file(relative_path: &Path, stream: &VersionStream) -> String {
    let mut lines = vec![format!(
        "{} {}",
        format!("[{}]", stream.format().name()).bright_blue().bold(),
        relative_path.display().to_string().bright_white().bold()
    )];
    for kind in stream.format().slots() {
        let value = match (stream.raw_version(*kind), stream.version(*kind)) {
            (None, _) => "not found".bright_black().to_string(),
            (Some(_), Ok(version)) => display_version(&version),
            (Some(raw), Err(_)) if !stream.format().requires_numeric(*kind) => {
                format!("\"{raw}\"").bright_white().to_string()
            }
            (Some(raw), Err(_)) => format!("invalid \"{raw}\"").red().to_string(),
        };
        lines.push(format!("  {:<14} {value}", kind.to_string()));
    }
    lines.join("\n")
}
