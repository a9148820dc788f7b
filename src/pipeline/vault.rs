//! In-memory credential tree
//!
//! The vault is what the importer populates. Children of a group are keyed by
//! name, so a level can never hold two sibling groups with the same name.

use std::collections::BTreeMap;

use super::hierarchy::path_segments;

/// A stored credential
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub username: String,
    pub password: String,
    pub url: String,
    pub notes: String,
    /// Additional `(name, value)` string fields carried from the export
    pub extra_fields: Vec<(String, String)>,
}

impl Entry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// A group node: a name, child groups keyed by name, and ordered entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupNode {
    pub name: String,
    children: BTreeMap<String, GroupNode>,
    entries: Vec<Entry>,
}

impl GroupNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Direct child group by exact name
    pub fn child(&self, name: &str) -> Option<&GroupNode> {
        self.children.get(name)
    }

    /// Child groups in name order
    pub fn children(&self) -> impl Iterator<Item = &GroupNode> {
        self.children.values()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Direct entry with exactly this title (case-sensitive)
    pub fn find_entry(&self, title: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.title == title)
    }

    /// Add an entry unless one with the same title already exists here.
    ///
    /// Returns `false` (leaving the group untouched) for a duplicate.
    pub fn insert_entry(&mut self, entry: Entry) -> bool {
        if self.find_entry(&entry.title).is_some() {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Number of groups below this one, at any depth
    pub fn descendant_count(&self) -> usize {
        self.children
            .values()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }

    /// Number of entries in this group and all groups below it
    pub fn total_entries(&self) -> usize {
        self.entries.len()
            + self
                .children
                .values()
                .map(GroupNode::total_entries)
                .sum::<usize>()
    }
}

/// The credential database being built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    root: GroupNode,
}

impl Default for Vault {
    fn default() -> Self {
        Self::new("Root")
    }
}

impl Vault {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root: GroupNode::new(root_name),
        }
    }

    pub fn root(&self) -> &GroupNode {
        &self.root
    }

    /// Walk `path` from the root, creating any missing group, and return the
    /// leaf. A path without segments resolves to the root itself.
    pub fn ensure_group_path(&mut self, path: &str) -> &mut GroupNode {
        let mut current = &mut self.root;
        for segment in path_segments(path) {
            current = current
                .children
                .entry(segment.to_string())
                .or_insert_with(|| GroupNode::new(segment));
        }
        current
    }

    /// Look up an existing group by path without creating anything
    pub fn find_group(&self, path: &str) -> Option<&GroupNode> {
        path_segments(path).try_fold(&self.root, |group, segment| group.child(segment))
    }

    /// Number of groups in the tree, excluding the root
    pub fn group_count(&self) -> usize {
        self.root.descendant_count()
    }

    pub fn entry_count(&self) -> usize {
        self.root.total_entries()
    }
}
