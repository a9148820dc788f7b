//! Pipeline module - rows in, populated vault out

pub mod error;
pub mod hierarchy;
pub mod importer;
pub mod loader;
pub mod row;
pub mod vault;

pub use error::HierarchyError;
pub use hierarchy::*;
pub use importer::*;
pub use loader::*;
pub use row::*;
pub use vault::*;
