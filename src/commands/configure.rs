//! `cacheward configure-settings`

use anyhow::{Context as _, Result};
use declarative::ApplyObserver;
use std::process::ExitCode;

use crate::Context;
use crate::host::Host;
use crate::{preflight, settings, ui};

/// Prints one line per converged (or would-be converged) setting
struct Console {
    quiet: bool,
}

impl ApplyObserver for Console {
    fn on_updated(&mut self, label: &str, display: &str) {
        if !self.quiet {
            ui::success(&format!("Updated '{label}' to '{display}'"));
        }
    }

    fn on_would_update(&mut self, label: &str, display: &str) {
        ui::info(&format!("Would update '{label}' to '{display}'"));
    }
}

pub fn run(ctx: &Context, host: &mut impl Host, dry_run: bool) -> Result<ExitCode> {
    preflight::ensure_ready(&*host)?;

    let mut console = Console { quiet: ctx.quiet };
    let table = settings::table();
    let summary = if dry_run {
        declarative::preview(&table, host.scratch(), &mut console)
    } else {
        declarative::apply(&table, host, &mut console)
    }
    .context("Could not configure page cache settings")?;

    if dry_run {
        if summary.updated == 0 {
            ui::success("All page cache settings are already configured. Nothing to do.");
        } else {
            ui::dim(&format!(
                "Dry run: {} page cache setting{} would be updated.",
                summary.updated,
                ui::plural(summary.updated)
            ));
        }
    } else if summary.updated == 0 {
        ui::success("All page cache settings are already configured. No changes made.");
    } else {
        ui::success(&format!(
            "Updated {} page cache setting{}.",
            summary.updated,
            ui::plural(summary.updated)
        ));
    }

    Ok(ExitCode::SUCCESS)
}
