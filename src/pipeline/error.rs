//! Error types for group hierarchy reconstruction.

use thiserror::Error;

/// Errors raised while resolving group parent chains.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// A group is (directly or indirectly) its own ancestor.
    ///
    /// `chain` lists the identifiers walked from the group being resolved
    /// up to and including the identifier that closed the loop.
    #[error("Cyclic group hierarchy: {}", .chain.join(" -> "))]
    Cycle { chain: Vec<String> },
}
