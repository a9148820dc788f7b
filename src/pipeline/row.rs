//! Export rows and the column vocabulary of the CSV format

use std::collections::HashMap;

/// Row type discriminator column
pub const COL_TYPE: &str = "!type";
/// Group identifier column (group definitions and entries)
pub const COL_GROUP_ID: &str = "!group_id";
/// Group name column (group definitions)
pub const COL_GROUP_NAME: &str = "!group_name";
/// Parent group identifier column (group definitions)
pub const COL_GROUP_PARENT: &str = "!group_parent";

pub const COL_TITLE: &str = "title";
pub const COL_USERNAME: &str = "username";
pub const COL_PASSWORD: &str = "password";
pub const COL_URL: &str = "URL";
pub const COL_NOTES: &str = "Notes";

/// Value of the `!type` column that marks a credential row
pub const ENTRY_MARKER: &str = "entry";

/// Title given to entries exported without one
pub const UNTITLED: &str = "Untitled";

/// Group path used when an entry row has no resolvable group
pub const DEFAULT_GROUP_PATH: &str = "General";

/// Columns consumed by the importer itself. Everything else is an extra field.
const ENTRY_COLUMNS: [&str; 5] = [COL_TITLE, COL_USERNAME, COL_PASSWORD, COL_URL, COL_NOTES];

/// A single line of the export, keyed by header name.
///
/// Absent and empty fields are treated the same way by every accessor, so a
/// short or ragged row never needs special handling downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    /// Build a row from `(column, value)` pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Non-empty value of a column, if any
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Value of a column, or the empty string
    pub fn get_or_empty(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn is_entry(&self) -> bool {
        self.fields.get(COL_TYPE).map(String::as_str) == Some(ENTRY_MARKER)
    }

    pub fn group_id(&self) -> Option<&str> {
        self.get(COL_GROUP_ID)
    }

    pub fn title(&self) -> &str {
        self.get(COL_TITLE).unwrap_or(UNTITLED)
    }

    /// Non-empty columns that are neither internal (`!`-prefixed) nor one of
    /// the standard entry columns, sorted by column name.
    pub fn extra_fields(&self) -> Vec<(&str, &str)> {
        let mut extras: Vec<(&str, &str)> = self
            .fields
            .iter()
            .filter(|(k, v)| {
                !v.is_empty() && !k.starts_with('!') && !ENTRY_COLUMNS.contains(&k.as_str())
            })
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        extras.sort_unstable();
        extras
    }
}
