//! CLI commands module.

mod assign;
mod config;
mod import;
mod show;
mod util;

pub use assign::AssignCommand;
pub use config::ConfigCommand;
pub use import::ImportCommand;
pub use show::{ListCommand, ShowCommand};

pub(crate) use util::*;
