//! `cacheward verify-settings`

use anyhow::Result;
use declarative::{Silent, Verification};
use std::process::ExitCode;

use crate::host::Host;
use crate::report::{self, OutputFormat};
use crate::{preflight, settings, ui};

pub fn run(host: &impl Host, format: OutputFormat) -> Result<ExitCode> {
    preflight::ensure_ready(host)?;

    let report = declarative::verify(&settings::table(), host, &mut Silent);
    println!("{}", report::render_rows(&report.rows, format)?);

    if format == OutputFormat::Table {
        print_outcome(&report);
    }

    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        log::debug!("{} divergent setting(s)", report.divergent);
        Ok(ExitCode::FAILURE)
    }
}

fn print_outcome(report: &Verification) {
    if report.is_clean() {
        ui::success("All page cache settings are configured as expected.");
    } else {
        ui::error(&format!(
            "{} page cache setting{} not configured as expected.",
            report.divergent,
            ui::plural(report.divergent)
        ));
    }
}
