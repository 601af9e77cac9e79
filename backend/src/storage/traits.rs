//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably by the presenter.

use super::errors::StorageError;
use super::schema::{FieldDef, FieldValue, RowValues, Where, PK_FIELD};

/// A plain data record with an integer identity and a static field list.
///
/// A `pk` of 0 means the record has not been persisted yet.
pub trait Record: Clone + Send + Sync + 'static {
    /// Table the record lives in
    const TABLE: &'static str;

    /// Non-key fields, in storage order
    const FIELDS: &'static [FieldDef];

    fn pk(&self) -> i64;

    fn set_pk(&mut self, pk: i64);

    /// Values of the non-key fields, in the same order as `FIELDS`
    fn field_values(&self) -> Vec<FieldValue>;

    /// Rebuild a record from its key and decoded fields
    fn from_row(pk: i64, row: RowValues) -> Result<Self, StorageError>;

    /// Value of a named field, including the key
    fn value_of(&self, field: &str) -> Option<FieldValue> {
        if field == PK_FIELD {
            return Some(FieldValue::Integer(self.pk()));
        }
        Self::FIELDS
            .iter()
            .zip(self.field_values())
            .find(|(def, _)| def.name == field)
            .map(|(_, value)| value)
    }

    /// Whether every condition of `filter` holds for this record
    fn matches(&self, filter: &Where) -> bool {
        filter
            .conditions()
            .iter()
            .all(|(field, value)| self.value_of(field).as_ref() == Some(value))
    }

    /// Validate all field values against the schema before a write
    fn check_fields(&self) -> Result<Vec<FieldValue>, StorageError> {
        let values = self.field_values();
        for (def, value) in Self::FIELDS.iter().zip(values.iter()) {
            def.check(value)?;
        }
        Ok(values)
    }
}

/// Trait defining typed CRUD over one record type.
///
/// All operations are synchronous; implementations block for the duration of
/// the underlying store call.
pub trait Repository<T: Record>: Send + Sync {
    /// Persist a new record, assign its identity and return it.
    /// Fails if the record already has a non-zero pk.
    fn add(&self, record: &mut T) -> Result<i64, StorageError>;

    /// Retrieve a record by pk; `None` when absent
    fn get(&self, pk: i64) -> Result<Option<T>, StorageError>;

    /// Overwrite all non-key fields of the stored record with the same pk.
    /// Fails if the record was never persisted.
    fn update(&self, record: &T) -> Result<(), StorageError>;

    /// Delete a record by pk; deleting a missing pk is a no-op
    fn delete(&self, pk: i64) -> Result<(), StorageError>;

    /// List records in natural (pk) order, optionally filtered by exact match
    fn get_all(&self, filter: Option<&Where>) -> Result<Vec<T>, StorageError>;
}
