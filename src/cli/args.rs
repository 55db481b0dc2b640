//! Command-line arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::anchor::AnchorArgs;
use crate::cli::commands::render::RenderArgs;

#[derive(Parser, Debug)]
#[command(name = "tsort")]
#[command(version, about = "Render sortable HTML tables from Tera templates")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Sorting configuration file (YAML)
    #[arg(long, short = 'c', global = true, env = "SORTING_CONFIG")]
    pub config: Option<PathBuf>,

    /// Fail with "not found" on malformed sort fields
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a template for a request URI
    Render(RenderArgs),

    /// Render a single column-header anchor
    Anchor(AnchorArgs),
}
