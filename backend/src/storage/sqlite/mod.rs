//! # SQLite Storage Module
//!
//! Generic SQLite persistence for any `Record` type.
//!
//! ## Layout
//!
//! One table per record type, named by `Record::TABLE`, with an
//! auto-incrementing `pk` column followed by one column per field:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS "expense" (
//!     "pk" INTEGER PRIMARY KEY AUTOINCREMENT,
//!     "amount" TEXT NOT NULL,
//!     "category" INTEGER NOT NULL,
//!     "comment" VARCHAR(120) NOT NULL,
//!     "added_date" TEXT NOT NULL,
//!     "expense_date" TEXT NOT NULL
//! )
//! ```
//!
//! Decimals are stored as normalized text, dates as `YYYY-MM-DD`.

pub mod connection;
pub mod repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::DbConnection;
pub use repository::SqliteRepository;
