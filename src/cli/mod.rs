//! CLI module - argument parsing, interactive prompts and the conversion driver

mod args;
pub mod convert;
mod prompts;

pub use args::{Cli, PASSWORD_ENV};
pub use convert::{ensure_distinct_output, persist_vault, populate_vault, run_import, ImportConfig};
pub use prompts::*;
