//! # Record Schema
//!
//! Static field descriptors that stand in for runtime reflection. Every record
//! type lists its non-key fields once, in order, and the generic repositories
//! derive tables, inserts, updates and filters from that list.
//!
//! ## Key Types:
//! - `FieldKind` / `FieldDef` - semantic type and name of one column
//! - `FieldValue` - dynamically typed value moved between records and stores
//! - `Where` - exact-match conjunction filter for `get_all`
//! - `RowValues` - decoded row handed to `Record::from_row`

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::errors::StorageError;

/// Name of the implicit identity column every table carries
pub const PK_FIELD: &str = "pk";

/// Text encoding used for date columns
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Text encoding used for timestamp columns
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Semantic type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    OptionalInteger,
    Decimal,
    Text { max_len: usize },
    Date,
    DateTime,
}

impl FieldKind {
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::OptionalInteger => "optional integer",
            FieldKind::Decimal => "decimal",
            FieldKind::Text { .. } => "text",
            FieldKind::Date => "date",
            FieldKind::DateTime => "datetime",
        }
    }
}

/// One column of a record's static schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }

    /// Verify that `value` fits this field, including text length limits
    pub fn check(&self, value: &FieldValue) -> Result<(), StorageError> {
        match (self.kind, value) {
            (FieldKind::Integer, FieldValue::Integer(_))
            | (FieldKind::OptionalInteger, FieldValue::Integer(_))
            | (FieldKind::OptionalInteger, FieldValue::Null)
            | (FieldKind::Decimal, FieldValue::Decimal(_))
            | (FieldKind::Date, FieldValue::Date(_))
            | (FieldKind::DateTime, FieldValue::DateTime(_)) => Ok(()),
            (FieldKind::Text { max_len }, FieldValue::Text(text)) => {
                let len = text.chars().count();
                if len > max_len {
                    Err(StorageError::FieldTooLong { field: self.name, max_len, len })
                } else {
                    Ok(())
                }
            }
            _ => Err(StorageError::TypeMismatch {
                field: self.name.to_string(),
                expected: self.kind.describe(),
            }),
        }
    }
}

/// Dynamically typed field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<Option<i64>> for FieldValue {
    fn from(value: Option<i64>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Integer)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Decimal(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::DateTime(value)
    }
}

/// Exact-match filter: a record matches when every listed field equals its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Where {
    conditions: Vec<(String, FieldValue)>,
}

impl Where {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality condition
    pub fn field(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.conditions.push((field.to_string(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, FieldValue)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Check every condition against the schema of `table`
    pub fn validate(&self, table: &'static str, fields: &[FieldDef]) -> Result<(), StorageError> {
        for (name, value) in &self.conditions {
            if name == PK_FIELD {
                if !matches!(value, FieldValue::Integer(_)) {
                    return Err(StorageError::TypeMismatch {
                        field: name.clone(),
                        expected: FieldKind::Integer.describe(),
                    });
                }
                continue;
            }
            let def = fields
                .iter()
                .find(|f| f.name == name.as_str())
                .ok_or_else(|| StorageError::UnknownField { table, field: name.clone() })?;
            // Length limits only matter for writes
            match (def.kind, value) {
                (FieldKind::Text { .. }, FieldValue::Text(_)) => {}
                _ => def.check(value)?,
            }
        }
        Ok(())
    }
}

/// A decoded row, keyed by field name.
///
/// Record types pull their fields out with the typed `take_*` accessors.
#[derive(Debug, Default)]
pub struct RowValues {
    values: HashMap<&'static str, FieldValue>,
}

impl RowValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, value: FieldValue) {
        self.values.insert(field, value);
    }

    fn take(&mut self, field: &'static str, expected: &'static str) -> Result<FieldValue, StorageError> {
        self.values.remove(field).ok_or_else(|| StorageError::TypeMismatch {
            field: field.to_string(),
            expected,
        })
    }

    fn mismatch(field: &'static str, expected: &'static str) -> StorageError {
        StorageError::TypeMismatch { field: field.to_string(), expected }
    }

    pub fn take_integer(&mut self, field: &'static str) -> Result<i64, StorageError> {
        match self.take(field, "integer")? {
            FieldValue::Integer(v) => Ok(v),
            _ => Err(Self::mismatch(field, "integer")),
        }
    }

    pub fn take_optional_integer(&mut self, field: &'static str) -> Result<Option<i64>, StorageError> {
        match self.take(field, "optional integer")? {
            FieldValue::Integer(v) => Ok(Some(v)),
            FieldValue::Null => Ok(None),
            _ => Err(Self::mismatch(field, "optional integer")),
        }
    }

    pub fn take_decimal(&mut self, field: &'static str) -> Result<Decimal, StorageError> {
        match self.take(field, "decimal")? {
            FieldValue::Decimal(v) => Ok(v),
            _ => Err(Self::mismatch(field, "decimal")),
        }
    }

    pub fn take_text(&mut self, field: &'static str) -> Result<String, StorageError> {
        match self.take(field, "text")? {
            FieldValue::Text(v) => Ok(v),
            _ => Err(Self::mismatch(field, "text")),
        }
    }

    pub fn take_date(&mut self, field: &'static str) -> Result<NaiveDate, StorageError> {
        match self.take(field, "date")? {
            FieldValue::Date(v) => Ok(v),
            _ => Err(Self::mismatch(field, "date")),
        }
    }

    pub fn take_datetime(&mut self, field: &'static str) -> Result<NaiveDateTime, StorageError> {
        match self.take(field, "datetime")? {
            FieldValue::DateTime(v) => Ok(v),
            _ => Err(Self::mismatch(field, "datetime")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const FIELDS: &[FieldDef] = &[
        FieldDef::new("name", FieldKind::Text { max_len: 5 }),
        FieldDef::new("parent", FieldKind::OptionalInteger),
        FieldDef::new("amount", FieldKind::Decimal),
    ];

    #[test]
    fn test_check_accepts_matching_kinds() {
        FIELDS[0].check(&FieldValue::from("abc")).unwrap();
        FIELDS[1].check(&FieldValue::Null).unwrap();
        FIELDS[1].check(&FieldValue::from(3i64)).unwrap();
        FIELDS[2].check(&FieldValue::from(dec!(1.5))).unwrap();
    }

    #[test]
    fn test_check_rejects_long_text() {
        let err = FIELDS[0].check(&FieldValue::from("abcdef")).unwrap_err();
        assert!(matches!(err, StorageError::FieldTooLong { max_len: 5, len: 6, .. }));

        // Length counts characters, not bytes
        FIELDS[0].check(&FieldValue::from("ягода")).unwrap();
    }

    #[test]
    fn test_check_rejects_wrong_kind() {
        let err = FIELDS[2].check(&FieldValue::from("12")).unwrap_err();
        assert!(matches!(err, StorageError::TypeMismatch { .. }));
        assert!(FIELDS[0].check(&FieldValue::Null).is_err());
    }

    #[test]
    fn test_where_validation() {
        Where::new().field("name", "x").field("pk", 4i64).validate("t", FIELDS).unwrap();

        let err = Where::new().field("colour", "red").validate("t", FIELDS).unwrap_err();
        assert!(matches!(err, StorageError::UnknownField { .. }));

        let err = Where::new().field("pk", "1").validate("t", FIELDS).unwrap_err();
        assert!(matches!(err, StorageError::TypeMismatch { .. }));
    }

    #[test]
    fn test_row_values_typed_access() {
        let mut row = RowValues::new();
        row.insert("name", FieldValue::from("Food"));
        row.insert("parent", FieldValue::Null);

        assert_eq!(row.take_text("name").unwrap(), "Food");
        assert_eq!(row.take_optional_integer("parent").unwrap(), None);
        assert!(row.take_decimal("amount").is_err());
    }
}
