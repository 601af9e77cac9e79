//! # In-Memory Storage Module
//!
//! A `Repository` implementation that keeps records in a `BTreeMap`. It honors
//! the same identity and filtering contract as the SQLite store, which makes it
//! a convenient stand-in for presenter tests.

use log::debug;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::storage::errors::StorageError;
use crate::storage::schema::Where;
use crate::storage::traits::{Record, Repository};

struct MemoryState<T> {
    next_pk: i64,
    records: BTreeMap<i64, T>,
}

/// Repository backed by process memory
pub struct MemoryRepository<T: Record> {
    state: Mutex<MemoryState<T>>,
}

impl<T: Record> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                next_pk: 1,
                records: BTreeMap::new(),
            }),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryState<T>>, StorageError> {
        self.state.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

impl<T: Record> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Repository<T> for MemoryRepository<T> {
    fn add(&self, record: &mut T) -> Result<i64, StorageError> {
        if record.pk() != 0 {
            return Err(StorageError::IdentityAssigned { table: T::TABLE, pk: record.pk() });
        }
        record.check_fields()?;

        let mut state = self.lock()?;
        let pk = state.next_pk;
        state.next_pk += 1;
        record.set_pk(pk);
        state.records.insert(pk, record.clone());

        debug!("Added {} record {} (memory)", T::TABLE, pk);
        Ok(pk)
    }

    fn get(&self, pk: i64) -> Result<Option<T>, StorageError> {
        Ok(self.lock()?.records.get(&pk).cloned())
    }

    fn update(&self, record: &T) -> Result<(), StorageError> {
        if record.pk() == 0 {
            return Err(StorageError::NotPersisted { table: T::TABLE });
        }
        record.check_fields()?;

        let mut state = self.lock()?;
        match state.records.get_mut(&record.pk()) {
            Some(stored) => {
                *stored = record.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound { table: T::TABLE, pk: record.pk() }),
        }
    }

    fn delete(&self, pk: i64) -> Result<(), StorageError> {
        if self.lock()?.records.remove(&pk).is_none() {
            debug!("Delete of missing {} record {} ignored", T::TABLE, pk);
        }
        Ok(())
    }

    fn get_all(&self, filter: Option<&Where>) -> Result<Vec<T>, StorageError> {
        if let Some(filter) = filter {
            filter.validate(T::TABLE, T::FIELDS)?;
        }
        let state = self.lock()?;
        Ok(state
            .records
            .values()
            .filter(|record| filter.map_or(true, |f| record.matches(f)))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::expense::Expense;
    use crate::domain::models::category::Category;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn expense(amount: rust_decimal::Decimal, category: i64, comment: &str) -> Expense {
        Expense::new(
            amount,
            category,
            comment,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        )
    }

    #[test]
    fn test_add_assigns_sequential_keys() {
        let repo = MemoryRepository::<Category>::new();
        let mut food = Category::new("Food", None);
        let mut drinks = Category::new("Drinks", None);

        assert_eq!(repo.add(&mut food).unwrap(), 1);
        assert_eq!(repo.add(&mut drinks).unwrap(), 2);
        assert_eq!(food.pk, 1);
        assert_eq!(repo.get(2).unwrap(), Some(drinks));
    }

    #[test]
    fn test_add_rejects_assigned_identity() {
        let repo = MemoryRepository::<Expense>::new();
        let mut record = expense(dec!(5), 1, "");
        record.pk = 7;
        assert!(matches!(
            repo.add(&mut record),
            Err(StorageError::IdentityAssigned { pk: 7, .. })
        ));
    }

    #[test]
    fn test_update_requires_identity() {
        let repo = MemoryRepository::<Expense>::new();
        let record = expense(dec!(5), 1, "");
        assert!(matches!(repo.update(&record), Err(StorageError::NotPersisted { .. })));

        let mut ghost = expense(dec!(5), 1, "");
        ghost.pk = 99;
        assert!(matches!(repo.update(&ghost), Err(StorageError::NotFound { pk: 99, .. })));
    }

    #[test]
    fn test_delete_and_filter() {
        let repo = MemoryRepository::<Expense>::new();
        let mut a = expense(dec!(1), 10, "0");
        let mut b = expense(dec!(2), 10, "1");
        let mut c = expense(dec!(3), 11, "2");
        for record in [&mut a, &mut b, &mut c] {
            repo.add(record).unwrap();
        }

        let filter = Where::new().field("category", 10i64);
        assert_eq!(repo.get_all(Some(&filter)).unwrap(), vec![a.clone(), b.clone()]);

        let filter = Where::new().field("category", 10i64).field("comment", "1");
        assert_eq!(repo.get_all(Some(&filter)).unwrap(), vec![b.clone()]);

        repo.delete(b.pk).unwrap();
        repo.delete(12345).unwrap();
        assert_eq!(repo.get(b.pk).unwrap(), None);
        assert_eq!(repo.get_all(None).unwrap(), vec![a, c]);
    }

    #[test]
    fn test_filter_on_unknown_field_fails() {
        let repo = MemoryRepository::<Category>::new();
        let filter = Where::new().field("colour", "red");
        assert!(matches!(
            repo.get_all(Some(&filter)),
            Err(StorageError::UnknownField { .. })
        ));
    }
}
