use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::report::OutputFormat;

#[derive(Parser)]
#[command(name = "cacheward")]
#[command(version)]
#[command(about = "Detect, verify and configure a site's page cache", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Site root (defaults to $CACHEWARD_SITE, then the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub path: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Report whether a page cache is loaded and which provider supplies it
    Detect(FormatArgs),

    /// Compare every page cache setting against its expected value
    VerifySettings(FormatArgs),

    /// Update every page cache setting that differs from its expected value
    ConfigureSettings {
        /// Show what would change without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct FormatArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}
