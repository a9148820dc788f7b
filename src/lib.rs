//! csv2kdbx: CSV Export to KeePass Library
//!
//! Rebuilds the group tree of a flat password-manager CSV export and imports
//! its entries into a KeePass (KDBX 4) database.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod store;
pub mod utils;
