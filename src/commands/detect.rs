//! `cacheward detect`

use anyhow::Result;
use std::process::ExitCode;

use crate::detect;
use crate::host::Host;
use crate::report::{self, OutputFormat};

/// Print whether a page cache is loaded and which provider supplies it
pub fn run(host: &impl Host, format: OutputFormat) -> Result<ExitCode> {
    let status = detect::detect(host);
    println!("{}", report::render_status(&status, format)?);
    Ok(ExitCode::SUCCESS)
}
