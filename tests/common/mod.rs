//! Shared test utilities and fixture generators
#![allow(dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};

use csv2kdbx::pipeline::{Row, COL_GROUP_ID, COL_GROUP_NAME, COL_GROUP_PARENT, COL_TITLE, COL_TYPE};
use keepass::db::{Database, Entry, Group, Node};
use keepass::DatabaseKey;
use tempfile::TempDir;

pub const HEADER: &str = "!group_id,!group_name,!group_parent,!type,title,username,password,URL,Notes";

/// Export with a two-level group tree, one nested entry, a duplicate title
/// and an entry without a group.
pub const SAMPLE_CSV: &str = "\
!group_id,!group_name,!group_parent,!type,title,username,password,URL,Notes
1,Finance,,group,,,,,
2,Banking,1,group,,,,,
3,Email,,group,,,,,
2,,,entry,Chase,bob,secret,https://chase.com,checking
3,,,entry,Gmail,alice,pw1,https://mail.google.com,
3,,,entry,Gmail,alice2,pw2,https://mail.google.com,second copy
,,,entry,Loose,carol,pw3,,
";

/// A group-definition row
pub fn group_row(id: &str, name: &str, parent: Option<&str>) -> Row {
    Row::from_pairs([
        (COL_TYPE, "group"),
        (COL_GROUP_ID, id),
        (COL_GROUP_NAME, name),
        (COL_GROUP_PARENT, parent.unwrap_or("")),
    ])
}

/// An entry row with the given group identifier and title
pub fn entry_row(group_id: &str, title: &str) -> Row {
    Row::from_pairs([(COL_TYPE, "entry"), (COL_GROUP_ID, group_id), (COL_TITLE, title)])
}

/// Write `contents` to a CSV file inside a fresh temporary directory
pub fn create_temp_csv(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("export.csv");
    std::fs::write(&csv_path, contents).unwrap();
    (temp_dir, csv_path)
}

/// Re-open a written database
pub fn open_database(path: &Path, password: &str) -> Database {
    let mut file = File::open(path).unwrap();
    Database::open(&mut file, DatabaseKey::new().with_password(password)).unwrap()
}

/// Find a group by `/`-separated path below `group`
pub fn find_group<'a>(group: &'a Group, path: &str) -> Option<&'a Group> {
    path.split('/').try_fold(group, |current, name| {
        current.children.iter().find_map(|node| match node {
            Node::Group(g) if g.name == name => Some(g),
            _ => None,
        })
    })
}

/// Direct child groups of `group`
pub fn subgroups(group: &Group) -> Vec<&Group> {
    group
        .children
        .iter()
        .filter_map(|node| match node {
            Node::Group(g) => Some(g),
            Node::Entry(_) => None,
        })
        .collect()
}

/// Direct entries of `group`
pub fn entries(group: &Group) -> Vec<&Entry> {
    group
        .children
        .iter()
        .filter_map(|node| match node {
            Node::Entry(e) => Some(e),
            Node::Group(_) => None,
        })
        .collect()
}
