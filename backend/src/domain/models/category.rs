//! Domain model for an expense category.

use serde::{Deserialize, Serialize};

use crate::storage::errors::StorageError;
use crate::storage::schema::{FieldDef, FieldKind, FieldValue, RowValues};
use crate::storage::traits::Record;

/// Longest category name the store accepts
pub const CATEGORY_NAME_MAX_LEN: usize = 40;

/// A spending category. `parent` optionally points at another category's pk,
/// forming a tree that is never checked for cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub pk: i64,
    pub name: String,
    pub parent: Option<i64>,
}

impl Category {
    pub fn new(name: &str, parent: Option<i64>) -> Self {
        Self {
            pk: 0,
            name: name.to_string(),
            parent,
        }
    }
}

impl Record for Category {
    const TABLE: &'static str = "category";

    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("name", FieldKind::Text { max_len: CATEGORY_NAME_MAX_LEN }),
        FieldDef::new("parent", FieldKind::OptionalInteger),
    ];

    fn pk(&self) -> i64 {
        self.pk
    }

    fn set_pk(&mut self, pk: i64) {
        self.pk = pk;
    }

    fn field_values(&self) -> Vec<FieldValue> {
        vec![FieldValue::from(self.name.clone()), FieldValue::from(self.parent)]
    }

    fn from_row(pk: i64, mut row: RowValues) -> Result<Self, StorageError> {
        Ok(Self {
            pk,
            name: row.take_text("name")?,
            parent: row.take_optional_integer("parent")?,
        })
    }
}
