//! Group hierarchy reconstruction
//!
//! Group-definition rows carry an identifier, a display name and an optional
//! parent identifier. This module turns those flat records into fully
//! qualified, `/`-delimited group paths (e.g. `Finance/Banking`).

use std::collections::{HashMap, HashSet};

use super::error::HierarchyError;
use super::row::{Row, COL_GROUP_ID, COL_GROUP_NAME, COL_GROUP_PARENT};

/// Separator between group names in a path
pub const PATH_SEPARATOR: char = '/';

/// A group as declared by a group-definition row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    pub name: String,
    pub parent: Option<String>,
}

/// Group identifier -> group record
pub type GroupRecords = HashMap<String, GroupRecord>;

/// Group identifier -> fully qualified group path
pub type GroupPathMap = HashMap<String, String>;

/// Collect group records from every row carrying both an identifier and a name.
///
/// Rows missing either field are ignored. A later definition of the same
/// identifier replaces the earlier one.
pub fn collect_group_records(rows: &[Row]) -> GroupRecords {
    let mut records = GroupRecords::new();

    for row in rows {
        let (Some(id), Some(name)) = (row.get(COL_GROUP_ID), row.get(COL_GROUP_NAME)) else {
            continue;
        };

        records.insert(
            id.to_string(),
            GroupRecord {
                name: name.to_string(),
                parent: row.get(COL_GROUP_PARENT).map(str::to_string),
            },
        );
    }

    records
}

/// Build the path of every declared group.
///
/// Returns the path map together with the records it was derived from.
///
/// # Errors
/// `HierarchyError::Cycle` if any parent chain loops back on itself.
pub fn build_group_paths(rows: &[Row]) -> Result<(GroupPathMap, GroupRecords), HierarchyError> {
    let records = collect_group_records(rows);
    let paths = resolve_all(&records)?;
    Ok((paths, records))
}

/// Resolve the path of every record, sharing work between groups with
/// common ancestors.
pub fn resolve_all(records: &GroupRecords) -> Result<GroupPathMap, HierarchyError> {
    // Sorted so that cycle reports are deterministic
    let mut ids: Vec<&String> = records.keys().collect();
    ids.sort();

    let mut paths = GroupPathMap::with_capacity(records.len());
    for id in ids {
        resolve_path(records, &mut paths, id)?;
    }
    Ok(paths)
}

/// Resolve a single identifier, memoizing every ancestor along the way.
///
/// An identifier with no record resolves to the empty string. The parent
/// chain is walked iteratively with a visited set, so deep hierarchies do
/// not grow the call stack and loops are reported instead of spinning.
pub fn resolve_path(
    records: &GroupRecords,
    memo: &mut GroupPathMap,
    id: &str,
) -> Result<String, HierarchyError> {
    if let Some(path) = memo.get(id) {
        return Ok(path.clone());
    }

    let mut chain: Vec<&str> = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = Some(id);

    // Path of the first already-known (or unknown) ancestor above the chain
    let base = loop {
        let Some(gid) = current else {
            break String::new();
        };
        if let Some(path) = memo.get(gid) {
            break path.clone();
        }
        let Some(record) = records.get(gid) else {
            break String::new();
        };
        if !visited.insert(gid) {
            let mut cycle: Vec<String> = chain.iter().map(|s| s.to_string()).collect();
            cycle.push(gid.to_string());
            return Err(HierarchyError::Cycle { chain: cycle });
        }
        chain.push(gid);
        current = record.parent.as_deref();
    };

    let mut path = base;
    for gid in chain.into_iter().rev() {
        let name = &records[gid].name;
        path = join_path(&path, name);
        memo.insert(gid.to_string(), path.clone());
    }

    Ok(path)
}

/// Append a name to a parent path; an empty parent yields the bare name.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", parent, PATH_SEPARATOR, name)
    }
}

/// Split a path into its non-empty segments
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(PATH_SEPARATOR).filter(|s| !s.is_empty())
}
