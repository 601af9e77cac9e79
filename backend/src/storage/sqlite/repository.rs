use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info};
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};
use std::marker::PhantomData;
use std::str::FromStr;

use super::connection::DbConnection;
use crate::storage::errors::StorageError;
use crate::storage::schema::{
    FieldDef, FieldKind, FieldValue, RowValues, Where, DATETIME_FORMAT, DATE_FORMAT, PK_FIELD,
};
use crate::storage::traits::{Record, Repository};

/// Generic SQLite repository: one table per record type, with the table layout
/// and every statement derived from `T::FIELDS`.
pub struct SqliteRepository<T: Record> {
    db: DbConnection,
    _record: PhantomData<fn() -> T>,
}

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier)
}

fn column_type(kind: FieldKind) -> String {
    match kind {
        FieldKind::Integer => "INTEGER NOT NULL".to_string(),
        FieldKind::OptionalInteger => "INTEGER".to_string(),
        FieldKind::Text { max_len } => format!("VARCHAR({}) NOT NULL", max_len),
        FieldKind::Decimal | FieldKind::Date | FieldKind::DateTime => "TEXT NOT NULL".to_string(),
    }
}

/// Append a bound parameter (or a NULL literal) for `value`
fn push_value(builder: &mut QueryBuilder<'_, Sqlite>, value: &FieldValue) {
    match value {
        FieldValue::Null => {
            builder.push("NULL");
        }
        FieldValue::Integer(v) => {
            builder.push_bind(*v);
        }
        // Normalized so that 10.50 and 10.5 are stored, and matched, identically
        FieldValue::Decimal(v) => {
            builder.push_bind(v.normalize().to_string());
        }
        FieldValue::Text(v) => {
            builder.push_bind(v.clone());
        }
        FieldValue::Date(v) => {
            builder.push_bind(v.format(DATE_FORMAT).to_string());
        }
        FieldValue::DateTime(v) => {
            builder.push_bind(v.format(DATETIME_FORMAT).to_string());
        }
    }
}

fn decode_field(row: &SqliteRow, def: &FieldDef) -> Result<FieldValue, StorageError> {
    let invalid = |text: &str| StorageError::InvalidValue {
        field: def.name,
        value: text.to_string(),
    };
    let value = match def.kind {
        FieldKind::Integer => FieldValue::Integer(row.try_get::<i64, _>(def.name)?),
        FieldKind::OptionalInteger => FieldValue::from(row.try_get::<Option<i64>, _>(def.name)?),
        FieldKind::Text { .. } => FieldValue::Text(row.try_get::<String, _>(def.name)?),
        FieldKind::Decimal => {
            let text: String = row.try_get(def.name)?;
            FieldValue::Decimal(Decimal::from_str(&text).map_err(|_| invalid(&text))?)
        }
        FieldKind::Date => {
            let text: String = row.try_get(def.name)?;
            FieldValue::Date(NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|_| invalid(&text))?)
        }
        FieldKind::DateTime => {
            let text: String = row.try_get(def.name)?;
            FieldValue::DateTime(
                NaiveDateTime::parse_from_str(&text, DATETIME_FORMAT).map_err(|_| invalid(&text))?,
            )
        }
    };
    Ok(value)
}

impl<T: Record> SqliteRepository<T> {
    /// Create the repository, creating its table if it does not exist yet
    pub fn open(db: &DbConnection) -> Result<Self, StorageError> {
        let repository = Self {
            db: db.clone(),
            _record: PhantomData,
        };
        repository.setup_schema()?;
        Ok(repository)
    }

    fn setup_schema(&self) -> Result<(), StorageError> {
        let mut columns = vec![format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", quote(PK_FIELD))];
        columns.extend(
            T::FIELDS
                .iter()
                .map(|def| format!("{} {}", quote(def.name), column_type(def.kind))),
        );
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote(T::TABLE),
            columns.join(", ")
        );
        debug!("Schema for {}: {}", T::TABLE, sql);

        self.db.block_on(sqlx::query(&sql).execute(self.db.pool()))?;
        Ok(())
    }

    fn select_prefix() -> String {
        let columns: Vec<String> = std::iter::once(PK_FIELD)
            .chain(T::FIELDS.iter().map(|def| def.name))
            .map(quote)
            .collect();
        format!("SELECT {} FROM {}", columns.join(", "), quote(T::TABLE))
    }

    fn decode_row(row: &SqliteRow) -> Result<T, StorageError> {
        let pk: i64 = row.try_get(PK_FIELD)?;
        let mut values = RowValues::new();
        for def in T::FIELDS {
            values.insert(def.name, decode_field(row, def)?);
        }
        T::from_row(pk, values)
    }
}

impl<T: Record> Repository<T> for SqliteRepository<T> {
    fn add(&self, record: &mut T) -> Result<i64, StorageError> {
        if record.pk() != 0 {
            return Err(StorageError::IdentityAssigned { table: T::TABLE, pk: record.pk() });
        }
        let values = record.check_fields()?;

        let columns: Vec<String> = T::FIELDS.iter().map(|def| quote(def.name)).collect();
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "INSERT INTO {} ({}) VALUES (",
            quote(T::TABLE),
            columns.join(", ")
        ));
        for (index, value) in values.iter().enumerate() {
            if index > 0 {
                builder.push(", ");
            }
            push_value(&mut builder, value);
        }
        builder.push(")");

        let result = self.db.block_on(builder.build().execute(self.db.pool()))?;
        let pk = result.last_insert_rowid();
        record.set_pk(pk);

        info!("Stored {} record {}", T::TABLE, pk);
        Ok(pk)
    }

    fn get(&self, pk: i64) -> Result<Option<T>, StorageError> {
        let mut builder = QueryBuilder::<Sqlite>::new(Self::select_prefix());
        builder.push(format!(" WHERE {} = ", quote(PK_FIELD)));
        builder.push_bind(pk);

        let row = self.db.block_on(builder.build().fetch_optional(self.db.pool()))?;
        row.as_ref().map(Self::decode_row).transpose()
    }

    fn update(&self, record: &T) -> Result<(), StorageError> {
        if record.pk() == 0 {
            return Err(StorageError::NotPersisted { table: T::TABLE });
        }
        let values = record.check_fields()?;

        let mut builder = QueryBuilder::<Sqlite>::new(format!("UPDATE {} SET ", quote(T::TABLE)));
        for (index, (def, value)) in T::FIELDS.iter().zip(values.iter()).enumerate() {
            if index > 0 {
                builder.push(", ");
            }
            builder.push(format!("{} = ", quote(def.name)));
            push_value(&mut builder, value);
        }
        builder.push(format!(" WHERE {} = ", quote(PK_FIELD)));
        builder.push_bind(record.pk());

        let result = self.db.block_on(builder.build().execute(self.db.pool()))?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound { table: T::TABLE, pk: record.pk() });
        }

        debug!("Updated {} record {}", T::TABLE, record.pk());
        Ok(())
    }

    fn delete(&self, pk: i64) -> Result<(), StorageError> {
        let mut builder =
            QueryBuilder::<Sqlite>::new(format!("DELETE FROM {} WHERE {} = ", quote(T::TABLE), quote(PK_FIELD)));
        builder.push_bind(pk);

        let result = self.db.block_on(builder.build().execute(self.db.pool()))?;
        if result.rows_affected() == 0 {
            debug!("Delete of missing {} record {} ignored", T::TABLE, pk);
        } else {
            info!("Deleted {} record {}", T::TABLE, pk);
        }
        Ok(())
    }

    fn get_all(&self, filter: Option<&Where>) -> Result<Vec<T>, StorageError> {
        let mut builder = QueryBuilder::<Sqlite>::new(Self::select_prefix());

        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            filter.validate(T::TABLE, T::FIELDS)?;
            builder.push(" WHERE ");
            for (index, (field, value)) in filter.conditions().iter().enumerate() {
                if index > 0 {
                    builder.push(" AND ");
                }
                if *value == FieldValue::Null {
                    builder.push(format!("{} IS NULL", quote(field)));
                } else {
                    builder.push(format!("{} = ", quote(field)));
                    push_value(&mut builder, value);
                }
            }
        }
        builder.push(format!(" ORDER BY {}", quote(PK_FIELD)));

        let rows = self.db.block_on(builder.build().fetch_all(self.db.pool()))?;
        rows.iter().map(Self::decode_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Budget, BudgetPeriod, Category, Expense};
    use crate::storage::sqlite::test_utils::TestEnvironment;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn expense(amount: Decimal, category: i64, comment: &str) -> Expense {
        Expense::new(amount, category, comment, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    }

    #[test]
    fn test_expense_crud() {
        let env = TestEnvironment::new().unwrap();
        let repo = SqliteRepository::<Expense>::open(&env.connection).unwrap();

        let mut records = Vec::new();
        for i in 1..=10 {
            let mut record = expense(Decimal::from(i), i % 3, "abc");
            let pk = repo.add(&mut record).unwrap();
            assert_eq!(record.pk, pk);
            records.push(record);
        }

        for record in &records {
            assert_eq!(repo.get(record.pk).unwrap().as_ref(), Some(record));
        }

        let mut replacement = expense(dec!(1000.25), 101000, "asdflasdjf");
        replacement.pk = records[0].pk;
        repo.update(&replacement).unwrap();
        assert_eq!(repo.get(records[0].pk).unwrap(), Some(replacement));

        let mut pks: Vec<i64> = records.iter().map(|r| r.pk).collect();
        pks.extend([345, 34589, 123]);
        for pk in &pks {
            repo.delete(*pk).unwrap();
        }
        for pk in &pks {
            assert_eq!(repo.get(*pk).unwrap(), None);
        }
    }

    #[test]
    fn test_cannot_add_with_pk() {
        let env = TestEnvironment::new().unwrap();
        let repo = SqliteRepository::<Expense>::open(&env.connection).unwrap();
        let mut record = expense(dec!(1000), 101000, "asdflasdjf");
        record.pk = 1;
        assert!(matches!(
            repo.add(&mut record),
            Err(StorageError::IdentityAssigned { table: "expense", pk: 1 })
        ));
    }

    #[test]
    fn test_cannot_update_without_pk() {
        let env = TestEnvironment::new().unwrap();
        let repo = SqliteRepository::<Category>::open(&env.connection).unwrap();
        let record = Category::new("Food", None);
        assert!(matches!(repo.update(&record), Err(StorageError::NotPersisted { .. })));
    }

    #[test]
    fn test_update_missing_record_fails() {
        let env = TestEnvironment::new().unwrap();
        let repo = SqliteRepository::<Category>::open(&env.connection).unwrap();
        let mut record = Category::new("Food", None);
        record.pk = 42;
        assert!(matches!(repo.update(&record), Err(StorageError::NotFound { pk: 42, .. })));
    }

    #[test]
    fn test_get_all_with_condition() {
        let env = TestEnvironment::new().unwrap();
        let repo = SqliteRepository::<Expense>::open(&env.connection).unwrap();

        let mut objs = Vec::new();
        for i in 0..5 {
            let mut record = expense(Decimal::from(i + 1), 10, &i.to_string());
            repo.add(&mut record).unwrap();
            objs.push(record);
        }
        let mut other = expense(dec!(7), 11, "0");
        repo.add(&mut other).unwrap();

        let filter = Where::new().field("comment", "0").field("category", 10i64);
        assert_eq!(repo.get_all(Some(&filter)).unwrap(), vec![objs[0].clone()]);

        let filter = Where::new().field("category", 10i64);
        assert_eq!(repo.get_all(Some(&filter)).unwrap(), objs);

        assert_eq!(repo.get_all(None).unwrap().len(), 6);
        assert_eq!(repo.get_all(Some(&Where::new())).unwrap().len(), 6);
    }

    #[test]
    fn test_decimal_filter_ignores_trailing_zeros() {
        let env = TestEnvironment::new().unwrap();
        let repo = SqliteRepository::<Expense>::open(&env.connection).unwrap();
        let mut record = expense(dec!(12.50), 1, "");
        repo.add(&mut record).unwrap();

        let filter = Where::new().field("amount", dec!(12.5));
        assert_eq!(repo.get_all(Some(&filter)).unwrap(), vec![record]);
    }

    #[test]
    fn test_optional_parent_filter() {
        let env = TestEnvironment::new().unwrap();
        let repo = SqliteRepository::<Category>::open(&env.connection).unwrap();
        let mut food = Category::new("Food", None);
        repo.add(&mut food).unwrap();
        let mut cafes = Category::new("Cafes", Some(food.pk));
        repo.add(&mut cafes).unwrap();

        let roots = repo.get_all(Some(&Where::new().field("parent", None::<i64>))).unwrap();
        assert_eq!(roots, vec![food.clone()]);

        let children = repo.get_all(Some(&Where::new().field("parent", Some(food.pk)))).unwrap();
        assert_eq!(children, vec![cafes]);
    }

    #[test]
    fn test_text_length_limit_is_enforced() {
        let env = TestEnvironment::new().unwrap();
        let repo = SqliteRepository::<Category>::open(&env.connection).unwrap();
        let mut record = Category::new(&"x".repeat(41), None);
        assert!(matches!(repo.add(&mut record), Err(StorageError::FieldTooLong { .. })));
        assert_eq!(record.pk, 0);
    }

    #[test]
    fn test_reserved_word_column_round_trips() {
        let env = TestEnvironment::new().unwrap();
        let repo = SqliteRepository::<Budget>::open(&env.connection).unwrap();
        let mut budget = Budget::new(BudgetPeriod::Week, dec!(350));
        repo.add(&mut budget).unwrap();

        budget.spent = dec!(12.30);
        repo.update(&budget).unwrap();

        let stored = repo.get(budget.pk).unwrap().unwrap();
        assert_eq!(stored.limit, dec!(350));
        assert_eq!(stored.spent, dec!(12.3));
        assert_eq!(stored.period, BudgetPeriod::Week);
    }

    #[test]
    fn test_data_survives_reopen() {
        let env = TestEnvironment::new().unwrap();
        let path = env.database_path();
        let pk = {
            let repo = SqliteRepository::<Category>::open(&env.connection).unwrap();
            let mut record = Category::new("Travel", None);
            repo.add(&mut record).unwrap()
        };

        let reopened = DbConnection::open(&path).unwrap();
        let repo = SqliteRepository::<Category>::open(&reopened).unwrap();
        assert_eq!(repo.get(pk).unwrap().unwrap().name, "Travel");
        reopened.close();
    }

    #[test]
    fn test_in_memory_connection() {
        let conn = DbConnection::open_in_memory().unwrap();
        let repo = SqliteRepository::<Category>::open(&conn).unwrap();
        let mut record = Category::new("Drinks", None);
        repo.add(&mut record).unwrap();
        assert_eq!(repo.get_all(None).unwrap(), vec![record]);
    }
}
