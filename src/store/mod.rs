//! Store module - persisting the vault to an output database

pub mod kdbx;

pub use kdbx::KdbxStore;

use thiserror::Error;

use crate::pipeline::Vault;

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// The master password is empty.
    #[error("Master password must not be empty")]
    EmptyPassword,

    /// The output database could not be created.
    #[error("Failed to create database file {path}: {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The database could not be encoded or written.
    #[error("Failed to save database {path}: {message}")]
    Persist { path: String, message: String },

    /// `persist` was called on a store that has already been written.
    #[error("Database {path} has already been saved")]
    AlreadyPersisted { path: String },
}

/// A destination the finished vault is written to.
///
/// Backends acquire their resources when they are constructed, so that a
/// setup failure surfaces before any entry is imported. `persist` is called
/// exactly once, after the import has finished.
pub trait VaultStore {
    /// Human-readable location of the output (usually a file path)
    fn location(&self) -> String;

    /// Write the vault out
    fn persist(&mut self, vault: &Vault) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn test_create_error_display_and_source() {
        let err = StoreError::Create {
            path: "out.kdbx".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to create database file out.kdbx: access denied"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_empty_password_display() {
        assert_eq!(
            StoreError::EmptyPassword.to_string(),
            "Master password must not be empty"
        );
        assert!(StoreError::EmptyPassword.source().is_none());
    }
}
