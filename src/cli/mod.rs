//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, GlobalOpts};

use miette::Result;

use crate::core::SortingConfig;

/// Resolve the sorting configuration: file, then environment, then flags
pub fn load_config(global: &GlobalOpts) -> Result<SortingConfig> {
    let config = match &global.config {
        Some(path) => SortingConfig::load(path)?,
        None => SortingConfig::default(),
    };
    let config = config.with_env()?;
    Ok(if global.strict {
        config.with_strict(true)
    } else {
        config
    })
}
