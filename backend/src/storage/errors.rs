//! Errors raised at the repository boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// `add` was called with a record that already carries an identity
    #[error("cannot add {table} record: it already has pk {pk}")]
    IdentityAssigned { table: &'static str, pk: i64 },

    /// `update` was called with a record that was never persisted
    #[error("cannot update {table} record without a pk")]
    NotPersisted { table: &'static str },

    #[error("{table} record {pk} does not exist")]
    NotFound { table: &'static str, pk: i64 },

    #[error("{table} has no field named '{field}'")]
    UnknownField { table: &'static str, field: String },

    #[error("field '{field}' is limited to {max_len} characters, got {len}")]
    FieldTooLong {
        field: &'static str,
        max_len: usize,
        len: usize,
    },

    #[error("field '{field}' expects a value of kind {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    /// A stored value could not be decoded back into its field kind
    #[error("field '{field}' holds an invalid value: '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("in-memory store lock was poisoned")]
    LockPoisoned,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to start database runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
