mod cli;
mod commands;
mod config;
mod detect;
mod host;
mod paths;
mod preflight;
mod report;
mod settings;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use host::SiteHost;
use std::io;
use std::process::ExitCode;

/// Global context for the application
pub struct Context {
    pub quiet: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context { quiet: cli.quiet };

    if let Command::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "cacheward", &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let root = paths::site_root(cli.path.as_deref())?;
    let mut host = SiteHost::open(&root)?;
    log::debug!(
        "Opened site at {} ({} active extensions)",
        host.root().display(),
        host.state().active_extensions.len()
    );

    match cli.command {
        Command::Detect(args) => commands::detect::run(&host, args.format),
        Command::VerifySettings(args) => commands::verify::run(&host, args.format),
        Command::ConfigureSettings { dry_run } => {
            commands::configure::run(&ctx, &mut host, dry_run)
        }
        Command::Completions { .. } => Ok(ExitCode::SUCCESS),
    }
}
