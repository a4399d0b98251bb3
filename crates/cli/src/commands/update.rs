use std::{cmp::Ordering, path::PathBuf};

use anyhow::{Context, Result};
use clap::{ArgGroup, Args};
use colored::Colorize;
use verstamp_core::{
    ComponentIndex, NumberingOptions, Version, VersionError, VersionKind, VersionSet,
    VersionStream,
};
use verstamp_utils::{display_update, display_version};

use crate::{
    context::CommandContext,
    options::{CliComponent, CliVersionKind},
    prompter::{InquirePrompter, Prompter},
};

#[derive(Args, Debug)]
#[command(about = "Apply a version pattern or an increment to every version file")]
#[command(group(ArgGroup::new("change").required(true).args(["pattern", "increment"])))]
pub struct UpdateArgs {
    /// Directory to search (defaults to the current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Version pattern, e.g. `1.2.+.0` or `2.0.*`
    #[arg(long)]
    pub pattern: Option<String>,

    /// Component to increment
    #[arg(short, long)]
    pub increment: Option<CliComponent>,

    /// Restrict the update to these slots (defaults to all)
    #[arg(short, long = "slot")]
    pub slots: Vec<CliVersionKind>,

    /// If true, do not make any filesystem changes.
    #[arg(short, long, default_value = "false")]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long, default_value = "false")]
    pub yes: bool,

    /// Keep installer product codes even if the configuration asks to regenerate them
    #[arg(long, default_value = "false")]
    pub no_regenerate: bool,
}

/// How new versions are computed from the current ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Pattern(Version),
    Increment(ComponentIndex),
}

impl Change {
    /// # Errors
    /// Returns error if the pattern is not a version or neither option is given.
    pub fn from_args(args: &UpdateArgs) -> Result<Self> {
        if let Some(pattern) = &args.pattern {
            let pattern = pattern
                .parse::<Version>()
                .with_context(|| format!("Invalid version pattern: {pattern}"))?;
            return Ok(Self::Pattern(pattern));
        }
        args.increment
            .map(|component| Self::Increment(component.into()))
            .context("Either --pattern or --increment is required")
    }

    /// # Errors
    /// Returns the overflow or unresolved-component error of the underlying operation.
    pub fn apply(
        &self,
        current: &Version,
        options: &NumberingOptions,
    ) -> Result<Version, VersionError> {
        match self {
            Self::Pattern(pattern) => pattern.apply_to(current, options),
            Self::Increment(component) => current.increment(*component, options),
        }
    }

    /// Whether moving `current` to this change would lower it.
    fn lowers(&self, current: &Version) -> bool {
        match self {
            Self::Pattern(pattern) => current.compare_to_pattern(pattern) == Ordering::Greater,
            Self::Increment(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpdate {
    pub kind: VersionKind,
    pub current: Version,
    pub next: Version,
}

/// Proposed updates for one file. Slots the file does not carry, free-text slots and
/// slots that would not change are left out; each remaining slot yields a plan or the
/// reason it cannot be updated.
pub fn plan_updates(
    stream: &VersionStream,
    change: &Change,
    slots: &[VersionKind],
    options: &NumberingOptions,
) -> Vec<Result<PlannedUpdate>> {
    let mut plans = Vec::new();
    for kind in stream.format().slots() {
        let kind = *kind;
        if !slots.is_empty() && !slots.contains(&kind) {
            continue;
        }
        let current = match stream.version(kind) {
            Ok(current) if current.is_empty() => continue,
            Ok(current) => current,
            Err(error) if stream.format().requires_numeric(kind) => {
                plans.push(Err(error.into()));
                continue;
            }
            Err(_) => {
                tracing::debug!(
                    path = %stream.path().display(),
                    slot = %kind,
                    "skipping free-text version"
                );
                continue;
            }
        };
        if change.lowers(&current) {
            tracing::warn!(
                path = %stream.path().display(),
                slot = %kind,
                current = %current,
                "pattern would lower the version, skipping"
            );
            continue;
        }
        let plan = change
            .apply(&current, options)
            .and_then(|next| stream.format().render(kind, &next).map(|_| next))
            .with_context(|| format!("Cannot update {kind} version {current}"));
        match plan {
            Ok(next) if next == current => {}
            Ok(next) => plans.push(Ok(PlannedUpdate {
                kind,
                current,
                next,
            })),
            Err(error) => plans.push(Err(error)),
        }
    }
    plans
}

/// Update version files
///
/// # Errors
/// Returns error if discovery fails, the user cancels, or any file could not be updated.
pub async fn handle_update(args: &UpdateArgs) -> Result<()> {
    handle_update_with_prompter(args, &InquirePrompter).await
}

/// # Errors
/// See [`handle_update`].
pub async fn handle_update_with_prompter(
    args: &UpdateArgs,
    prompter: &dyn Prompter,
) -> Result<()> {
    let change = Change::from_args(args)?;
    let context = CommandContext::new(args.path.as_deref()).await?;
    let slots = args
        .slots
        .iter()
        .map(|slot| VersionKind::from(*slot))
        .collect::<Vec<_>>();
    let regenerate = context.config.regenerate_product_code && !args.no_regenerate;

    let mut failures = 0;
    let mut proposed = VersionSet::EMPTY;
    let mut work = Vec::new();
    for file in context.load_files().await? {
        let relative_path = file.relative_path.display().to_string();
        let stream = match file.stream {
            Ok(stream) => stream,
            Err(error) => {
                eprintln!("{} {relative_path}: {error:#}", "error:".red().bold());
                failures += 1;
                continue;
            }
        };
        let mut plans = Vec::new();
        for plan in plan_updates(&stream, &change, &slots, &context.config.numbering) {
            match plan {
                Ok(plan) => {
                    println!(
                        "{} {} {}",
                        relative_path.bright_white().bold(),
                        format!("[{}]", plan.kind).bright_blue(),
                        display_update(&plan.current, &plan.next)
                    );
                    proposed = proposed.max_proposed(&VersionSet::EMPTY.with(plan.kind, plan.next));
                    plans.push(plan);
                }
                Err(error) => {
                    eprintln!("{} {relative_path}: {error:#}", "error:".red().bold());
                    failures += 1;
                }
            }
        }
        if !plans.is_empty() {
            work.push((relative_path, stream, plans));
        }
    }

    if work.is_empty() {
        println!("No version changes");
        return finish(failures);
    }
    println!(
        "{} {}",
        "Highest proposed version:".bold(),
        display_version(&proposed.highest_populated_slot())
    );
    if args.dry_run {
        println!("Dry run, no updates will be made");
        return finish(failures);
    }
    if !args.yes && !prompter.confirm("Are you sure you want to update the version files?")? {
        println!("Update cancelled");
        return Ok(());
    }

    for (relative_path, mut stream, plans) in work {
        for plan in plans {
            match stream.update_version(plan.kind, &plan.next, regenerate).await {
                Ok(regenerated) => {
                    for identifier in regenerated {
                        println!(
                            "{} {} {} {} {}",
                            relative_path.bright_white().bold(),
                            identifier.name.bright_blue(),
                            identifier.old.bright_black(),
                            "→".bright_cyan(),
                            identifier.new.bright_green()
                        );
                    }
                }
                Err(error) => {
                    eprintln!("{} {relative_path}: {error}", "error:".red().bold());
                    failures += 1;
                    break;
                }
            }
        }
    }
    finish(failures)
}

fn finish(failures: usize) -> Result<()> {
    if failures > 0 {
        anyhow::bail!("{failures} version update(s) failed");
    }
    Ok(())
}
