//! CSV export to KeePass database conversion

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};

use crate::pipeline::{
    build_group_paths, import_entries, load_export, path_segments, GroupPathMap, ImportOptions,
    ImportStats, Row, Vault,
};
use crate::report::ImportSummary;
use crate::store::{KdbxStore, VaultStore};
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_count, print_info,
    print_step_header, print_success, print_warning,
};

/// Everything needed for one conversion run
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub password: String,
    pub database_name: String,
    pub options: ImportOptions,
    pub verbose: bool,
}

/// Run the full conversion: load rows, rebuild the group hierarchy, create
/// the output database, import entries, and save once.
///
/// The output file is only created after the hierarchy has been validated,
/// and entries are only imported after the output has been created.
pub fn run_import(config: &ImportConfig) -> Result<ImportSummary> {
    ensure_distinct_output(&config.input, &config.output)?;
    if path_segments(&config.options.default_group).next().is_none() {
        anyhow::bail!(
            "Default group '{}' names no group",
            config.options.default_group
        );
    }

    // Load rows
    print_step_header(1, "Load Export");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading CSV export...");
    let export = match load_export(&config.input) {
        Ok(export) => export,
        Err(e) => {
            finish_with_warning(&spinner, "Failed to read CSV export");
            return Err(e);
        }
    };
    finish_with_success(&spinner, &format!("Loaded {} row(s)", export.rows.len()));

    if config.verbose {
        print_info(&format!("CSV headers: {}", export.headers.join(", ")));
    }

    // Group hierarchy; cycles abort here, before any output exists
    let (group_paths, records) =
        build_group_paths(&export.rows).context("Failed to rebuild group hierarchy")?;
    print_count("group definition(s)", records.len());

    let mut summary = ImportSummary::new(export.rows.len(), records.len());
    summary.set_load_time(step_start.elapsed());

    // Create the output database before touching any entry
    print_step_header(2, "Import Entries");
    let step_start = Instant::now();
    let mut store = KdbxStore::create(&config.output, &config.password, &config.database_name)
        .context("Failed to create KeePass database")?;
    print_success(&format!("Created {}", store.location()));

    let (vault, stats) = populate_vault(
        &export.rows,
        &group_paths,
        &config.database_name,
        &config.options,
    );
    report_skipped(&stats, config.verbose);
    print_success(&format!("Imported {} entries", stats.imported));

    summary.add_import_stats(stats, vault.group_count());
    summary.set_import_time(step_start.elapsed());

    // Save once
    print_step_header(3, "Save Database");
    let step_start = Instant::now();
    persist_vault(&mut store, &vault)?;
    summary.set_save_time(step_start.elapsed());

    Ok(summary)
}

/// Build a vault named `root_name` and import every entry row into it
pub fn populate_vault(
    rows: &[Row],
    group_paths: &GroupPathMap,
    root_name: &str,
    options: &ImportOptions,
) -> (Vault, ImportStats) {
    let mut vault = Vault::new(root_name);
    let stats = import_entries(&mut vault, rows, group_paths, options);
    (vault, stats)
}

/// Save the vault through any backend, with a spinner while the key is derived
pub fn persist_vault<S: VaultStore>(store: &mut S, vault: &Vault) -> Result<()> {
    let spinner = create_spinner("Encrypting and writing database...");
    match store.persist(vault) {
        Ok(()) => {
            finish_with_success(&spinner, &format!("Saved to {}", store.location()));
            Ok(())
        }
        Err(e) => {
            finish_with_warning(&spinner, "Saving failed");
            Err(e).context("Failed to save KeePass database")
        }
    }
}

fn report_skipped(stats: &ImportStats, verbose: bool) {
    if stats.skipped.is_empty() {
        return;
    }

    if verbose {
        for skipped in &stats.skipped {
            print_warning(&format!(
                "Entry '{}' already exists in group '{}'. Skipping.",
                skipped.title, skipped.group_path
            ));
        }
    } else {
        print_warning(&format!(
            "Skipped {} duplicate entr{} (use --verbose to list them)",
            stats.skipped.len(),
            if stats.skipped.len() == 1 { "y" } else { "ies" }
        ));
    }
}

/// Fail if `output` would overwrite `input`
pub fn ensure_distinct_output(input: &Path, output: &Path) -> Result<()> {
    if same_file(input, output) {
        anyhow::bail!(
            "Output path must differ from the input file: {}",
            output.display()
        );
    }
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
