//! # Storage Module
//!
//! Record descriptors, the generic `Repository` contract, and its two
//! implementations: SQLite for the application and in-memory for tests.

pub mod errors;
pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod traits;

pub use errors::StorageError;
pub use memory::MemoryRepository;
pub use schema::{FieldDef, FieldKind, FieldValue, RowValues, Where};
pub use sqlite::{DbConnection, SqliteRepository};
pub use traits::{Record, Repository};

use crate::domain::models::{Budget, Category, Expense};

/// The three repositories the presenter works against
pub struct Repositories {
    pub categories: Box<dyn Repository<Category>>,
    pub expenses: Box<dyn Repository<Expense>>,
    pub budgets: Box<dyn Repository<Budget>>,
}

impl Repositories {
    /// SQLite repositories sharing one connection; tables are created on demand
    pub fn sqlite(db: &DbConnection) -> Result<Self, StorageError> {
        Ok(Self {
            categories: Box::new(SqliteRepository::<Category>::open(db)?),
            expenses: Box::new(SqliteRepository::<Expense>::open(db)?),
            budgets: Box::new(SqliteRepository::<Budget>::open(db)?),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            categories: Box::new(MemoryRepository::<Category>::new()),
            expenses: Box::new(MemoryRepository::<Expense>::new()),
            budgets: Box::new(MemoryRepository::<Budget>::new()),
        }
    }
}
