//! Domain model for a period budget.

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::storage::errors::StorageError;
use crate::storage::schema::{FieldDef, FieldKind, FieldValue, RowValues};
use crate::storage::traits::Record;

/// Budgeting periods tracked by the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BudgetPeriod {
    Day,
    Week,
    Month,
    Year,
}

/// Inclusive date range covering the current instance of a period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl BudgetPeriod {
    pub const ALL: [BudgetPeriod; 4] = [
        BudgetPeriod::Day,
        BudgetPeriod::Week,
        BudgetPeriod::Month,
        BudgetPeriod::Year,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BudgetPeriod::Day => "Day",
            BudgetPeriod::Week => "Week",
            BudgetPeriod::Month => "Month",
            BudgetPeriod::Year => "Year",
        }
    }

    /// The window of this period that contains `today`.
    ///
    /// Weeks run Monday to Sunday.
    pub fn window(&self, today: NaiveDate) -> PeriodWindow {
        match self {
            BudgetPeriod::Day => PeriodWindow { start: today, end: today },
            BudgetPeriod::Week => {
                let offset = u64::from(today.weekday().num_days_from_monday());
                let start = today.checked_sub_days(Days::new(offset)).unwrap_or(NaiveDate::MIN);
                let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
                PeriodWindow { start, end }
            }
            BudgetPeriod::Month => {
                let start = today.with_day(1).unwrap_or(today);
                let end = start
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(NaiveDate::MAX);
                PeriodWindow { start, end }
            }
            BudgetPeriod::Year => {
                let start = today.with_ordinal(1).unwrap_or(today);
                let end = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(NaiveDate::MAX);
                PeriodWindow { start, end }
            }
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BudgetPeriod::ALL
            .into_iter()
            .find(|period| period.label() == s)
            .ok_or_else(|| format!("Unknown budget period: {}", s))
    }
}

/// Spending ceiling for one period. `spent` is a cache recomputed from
/// expenses on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub pk: i64,
    pub period: BudgetPeriod,
    pub limit: Decimal,
    pub spent: Decimal,
}

impl Budget {
    pub fn new(period: BudgetPeriod, limit: Decimal) -> Self {
        Self {
            pk: 0,
            period,
            limit,
            spent: Decimal::ZERO,
        }
    }
}

impl Record for Budget {
    const TABLE: &'static str = "budget";

    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("period", FieldKind::Text { max_len: 10 }),
        FieldDef::new("limit", FieldKind::Decimal),
        FieldDef::new("spent", FieldKind::Decimal),
    ];

    fn pk(&self) -> i64 {
        self.pk
    }

    fn set_pk(&mut self, pk: i64) {
        self.pk = pk;
    }

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::from(self.period.label()),
            FieldValue::from(self.limit),
            FieldValue::from(self.spent),
        ]
    }

    fn from_row(pk: i64, mut row: RowValues) -> Result<Self, StorageError> {
        let label = row.take_text("period")?;
        let period = label
            .parse::<BudgetPeriod>()
            .map_err(|_| StorageError::InvalidValue { field: "period", value: label.clone() })?;
        Ok(Self {
            pk,
            period,
            limit: row.take_decimal("limit")?,
            spent: row.take_decimal("spent")?,
        })
    }
}
