//! csv2kdbx: CSV Export to KeePass CLI Tool
//!
//! Converts a password-manager CSV export into an encrypted KeePass database.

use anyhow::Result;
use clap::Parser;

use csv2kdbx::cli::{
    confirm_overwrite, ensure_distinct_output, prompt_master_password, run_import, Cli,
    ImportConfig,
};
use csv2kdbx::pipeline::ImportOptions;
use csv2kdbx::utils::{print_banner, print_completion, print_config};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output_path = cli.output_path();

    // Print styled banner
    print_banner(env!("CARGO_PKG_VERSION"));

    print_config(&cli.input, &output_path, &cli.default_group);

    ensure_distinct_output(&cli.input, &output_path)?;

    if output_path.exists() && !cli.no_confirm && !confirm_overwrite(&output_path)? {
        println!("Cancelled by user.");
        return Ok(());
    }

    let password = match cli.password.clone() {
        Some(password) => password,
        None => prompt_master_password()?,
    };

    let config = ImportConfig {
        input: cli.input.clone(),
        output: output_path.clone(),
        password,
        database_name: cli.database_name(),
        options: ImportOptions {
            default_group: cli.default_group.clone(),
            extra_fields: cli.extra_fields,
        },
        verbose: cli.verbose,
    };

    let summary = run_import(&config)?;

    // Display summary
    summary.display();

    // Final completion message
    print_completion(&output_path);

    Ok(())
}
