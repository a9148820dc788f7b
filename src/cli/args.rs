//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{path_segments, DEFAULT_GROUP_PATH};

/// Environment variable holding the master password for unattended runs
pub const PASSWORD_ENV: &str = "CSV2KDBX_PASSWORD";

/// csv2kdbx - Convert a password-manager CSV export into a KeePass database
#[derive(Parser, Debug)]
#[command(name = "csv2kdbx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input CSV export (comma-separated, with a header row)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output KeePass database path.
    /// Defaults to the input path with a '.kdbx' extension (e.g., export.csv → export.kdbx).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Group path for entries whose group is missing or unknown
    #[arg(long, default_value = DEFAULT_GROUP_PATH, value_parser = parse_group_path)]
    pub default_group: String,

    /// Database name stored in the KeePass metadata.
    /// Defaults to the output file name without extension.
    #[arg(long)]
    pub database_name: Option<String>,

    /// Copy extra CSV columns into custom entry fields
    #[arg(long, default_value = "false")]
    pub extra_fields: bool,

    /// Master password for the new database.
    /// If not provided, it is prompted for without echo.
    #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: Option<String>,

    /// Overwrite an existing output file without asking
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Print CSV headers and every skipped duplicate
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

/// Reject group paths that would place entries directly in the root
fn parse_group_path(s: &str) -> Result<String, String> {
    if path_segments(s).next().is_none() {
        return Err(format!(
            "'{}' names no group; use a path such as 'General' or 'Imported/Unsorted'",
            s
        ));
    }
    Ok(s.to_string())
}

impl Cli {
    /// Get the output path, deriving it from the input if not explicitly provided.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("kdbx"))
    }

    /// Get the database name, falling back to the output file stem.
    pub fn database_name(&self) -> String {
        self.database_name.clone().unwrap_or_else(|| {
            self.output_path()
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Passwords")
                .to_string()
        })
    }
}
