//! KDBX 4 output backend built on the `keepass` crate

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use keepass::db::{Database, Entry as KeePassEntry, Group, Node, Value};
use keepass::DatabaseKey;

use super::{StoreError, VaultStore};
use crate::pipeline::{Entry, GroupNode, Vault};

/// Standard KeePass field names
const FIELD_TITLE: &str = "Title";
const FIELD_USERNAME: &str = "UserName";
const FIELD_PASSWORD: &str = "Password";
const FIELD_URL: &str = "URL";
const FIELD_NOTES: &str = "Notes";

const STANDARD_FIELDS: [&str; 5] = [
    FIELD_TITLE,
    FIELD_USERNAME,
    FIELD_PASSWORD,
    FIELD_URL,
    FIELD_NOTES,
];

/// Prefix for extra columns whose name collides with a standard field
pub const EXTRA_FIELD_PREFIX: &str = "csv:";

/// A freshly created, password-protected KDBX file
pub struct KdbxStore {
    path: PathBuf,
    password: String,
    database_name: String,
    file: Option<File>,
}

impl std::fmt::Debug for KdbxStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KdbxStore")
            .field("path", &self.path)
            .field("database_name", &self.database_name)
            .field("persisted", &self.file.is_none())
            .finish_non_exhaustive()
    }
}

impl KdbxStore {
    /// Create (or truncate) the output file.
    ///
    /// # Errors
    /// `StoreError::EmptyPassword` for an empty password, `StoreError::Create`
    /// if the file cannot be created.
    pub fn create(
        path: &Path,
        password: &str,
        database_name: impl Into<String>,
    ) -> Result<Self, StoreError> {
        if password.is_empty() {
            return Err(StoreError::EmptyPassword);
        }

        let file = File::create(path).map_err(|source| StoreError::Create {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            password: password.to_string(),
            database_name: database_name.into(),
            file: Some(file),
        })
    }

    fn persist_error(&self, message: impl std::fmt::Display) -> StoreError {
        StoreError::Persist {
            path: self.path.display().to_string(),
            message: message.to_string(),
        }
    }
}

impl VaultStore for KdbxStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn persist(&mut self, vault: &Vault) -> Result<(), StoreError> {
        let file = self.file.take().ok_or_else(|| StoreError::AlreadyPersisted {
            path: self.location(),
        })?;

        let db = to_database(vault, &self.database_name);
        let mut writer = BufWriter::new(file);

        let result = db
            .save(&mut writer, DatabaseKey::new().with_password(&self.password))
            .map_err(|e| self.persist_error(e))
            .and_then(|()| writer.flush().map_err(|e| self.persist_error(e)));

        if result.is_err() {
            // Don't leave a truncated database behind
            drop(writer);
            let _ = fs::remove_file(&self.path);
        }
        result
    }
}

/// Convert the vault tree into a `keepass` database
pub fn to_database(vault: &Vault, database_name: &str) -> Database {
    let mut db = Database::new(Default::default());
    db.meta.database_name = Some(database_name.to_string());

    let root = vault.root();
    db.root.name = root.name.clone();
    db.root.children = group_children(root);

    db
}

fn group_children(node: &GroupNode) -> Vec<Node> {
    let entries = node.entries().iter().map(|e| Node::Entry(to_entry(e)));
    let groups = node.children().map(|child| {
        let mut group = Group::new(&child.name);
        group.children = group_children(child);
        Node::Group(group)
    });
    entries.chain(groups).collect()
}

fn to_entry(entry: &Entry) -> KeePassEntry {
    let mut kp = KeePassEntry::new();

    // Extra fields first; the standard fields written below always win
    for (name, value) in &entry.extra_fields {
        kp.fields.insert(extra_field_key(name), protect(name, value));
    }

    for (key, value) in [
        (FIELD_TITLE, &entry.title),
        (FIELD_USERNAME, &entry.username),
        (FIELD_PASSWORD, &entry.password),
        (FIELD_URL, &entry.url),
        (FIELD_NOTES, &entry.notes),
    ] {
        kp.fields.insert(key.to_string(), protect(key, value));
    }
    kp
}

/// Key for an extra column; names clashing with a standard field are prefixed
pub fn extra_field_key(name: &str) -> String {
    if STANDARD_FIELDS.contains(&name) {
        format!("{}{}", EXTRA_FIELD_PREFIX, name)
    } else {
        name.to_string()
    }
}

fn protect(name: &str, value: &str) -> Value {
    if name == FIELD_PASSWORD {
        Value::Protected(value.as_bytes().to_vec().into())
    } else {
        Value::Unprotected(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_rejects_empty_password() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.kdbx");

        let err = KdbxStore::create(&path, "", "out").unwrap_err();
        assert!(matches!(err, StoreError::EmptyPassword));
        assert!(!path.exists(), "No file should be created");
    }

    #[test]
    fn test_create_fails_for_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no_such_dir").join("out.kdbx");

        let err = KdbxStore::create(&path, "pw", "out").unwrap_err();
        assert!(matches!(err, StoreError::Create { .. }));
    }

    #[test]
    fn test_to_database_maps_tree() {
        let mut vault = Vault::default();
        let mut entry = Entry::new("Chase");
        entry.username = "bob".to_string();
        entry.extra_fields = vec![("pin".to_string(), "42".to_string())];
        vault.ensure_group_path("Finance/Banking").insert_entry(entry);

        let db = to_database(&vault, "Test");
        assert_eq!(db.meta.database_name.as_deref(), Some("Test"));

        let Some(Node::Group(finance)) = db.root.children.first() else {
            panic!("expected a Finance group");
        };
        assert_eq!(finance.name, "Finance");
        let Some(Node::Group(banking)) = finance.children.first() else {
            panic!("expected a Banking group");
        };
        let Some(Node::Entry(chase)) = banking.children.first() else {
            panic!("expected an entry");
        };
        assert_eq!(chase.get_title(), Some("Chase"));
        assert_eq!(chase.get_username(), Some("bob"));
        assert_eq!(chase.get("pin"), Some("42"));
    }

    #[test]
    fn test_extra_fields_never_replace_standard_fields() {
        let mut entry = Entry::new("Real");
        entry.username = "realuser".to_string();
        entry.password = "realpw".to_string();
        entry.extra_fields = vec![
            ("Password".to_string(), "shadowpw".to_string()),
            ("Title".to_string(), "Shadow".to_string()),
            ("pin".to_string(), "42".to_string()),
        ];

        let kp = to_entry(&entry);
        assert_eq!(kp.get_title(), Some("Real"));
        assert_eq!(kp.get_username(), Some("realuser"));
        assert_eq!(kp.get_password(), Some("realpw"));
        assert_eq!(kp.get("csv:Title"), Some("Shadow"));
        assert_eq!(kp.get("csv:Password"), Some("shadowpw"));
        assert_eq!(kp.get("pin"), Some("42"));
    }

    #[test]
    fn test_extra_field_key() {
        assert_eq!(extra_field_key("UserName"), "csv:UserName");
        assert_eq!(extra_field_key("username"), "username");
        assert_eq!(extra_field_key("PIN"), "PIN");
    }

    #[test]
    fn test_persist_only_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("once.kdbx");
        let mut store = KdbxStore::create(&path, "pw", "once").unwrap();

        let vault = Vault::default();
        store.persist(&vault).unwrap();
        let err = store.persist(&vault).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyPersisted { .. }));
    }
}
