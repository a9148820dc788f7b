//! Entry import into the vault tree

use super::hierarchy::{path_segments, GroupPathMap};
use super::row::{Row, COL_NOTES, COL_PASSWORD, COL_URL, COL_USERNAME, DEFAULT_GROUP_PATH};
use super::vault::{Entry, Vault};

/// Knobs for the entry import
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Group path for entries whose group cannot be resolved
    pub default_group: String,
    /// Copy non-standard columns into custom entry fields
    pub extra_fields: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            default_group: DEFAULT_GROUP_PATH.to_string(),
            extra_fields: false,
        }
    }
}

/// An entry row that was not imported because its group already holds an
/// entry with the same title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub title: String,
    pub group_path: String,
}

/// Outcome of an import pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub imported: usize,
    pub skipped: Vec<SkippedEntry>,
    /// Rows whose type is not the entry marker
    pub non_entry_rows: usize,
    /// Entry rows that fell back to the default group
    pub defaulted: usize,
}

/// Resolve the group path of an entry row, falling back to `default_group`
/// for a missing, empty or unmapped identifier, and for a group whose path
/// has no segments (a name such as `/`).
pub fn resolve_entry_group<'a>(
    row: &Row,
    group_paths: &'a GroupPathMap,
    default_group: &'a str,
) -> (&'a str, bool) {
    match row
        .group_id()
        .and_then(|id| group_paths.get(id))
        .filter(|path| path_segments(path).next().is_some())
    {
        Some(path) => (path.as_str(), false),
        None => (default_group, true),
    }
}

/// Build the entry a row describes
pub fn entry_from_row(row: &Row, extra_fields: bool) -> Entry {
    Entry {
        title: row.title().to_string(),
        username: row.get_or_empty(COL_USERNAME).to_string(),
        password: row.get_or_empty(COL_PASSWORD).to_string(),
        url: row.get_or_empty(COL_URL).to_string(),
        notes: row.get_or_empty(COL_NOTES).to_string(),
        extra_fields: if extra_fields {
            row.extra_fields()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        } else {
            Vec::new()
        },
    }
}

/// Insert every entry row into the vault.
///
/// Groups are created on demand. The first entry with a given title in a
/// group wins; later rows with the same title are recorded as skipped.
pub fn import_entries(
    vault: &mut Vault,
    rows: &[Row],
    group_paths: &GroupPathMap,
    options: &ImportOptions,
) -> ImportStats {
    let mut stats = ImportStats::default();

    for row in rows {
        if !row.is_entry() {
            stats.non_entry_rows += 1;
            continue;
        }

        let (group_path, defaulted) =
            resolve_entry_group(row, group_paths, &options.default_group);
        if defaulted {
            stats.defaulted += 1;
        }

        let entry = entry_from_row(row, options.extra_fields);
        let title = entry.title.clone();

        if vault.ensure_group_path(group_path).insert_entry(entry) {
            stats.imported += 1;
        } else {
            stats.skipped.push(SkippedEntry {
                title,
                group_path: group_path.to_string(),
            });
        }
    }

    stats
}
