//! Parsing of raw view input into domain values.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::errors::BookkeeperError;

/// Date layouts accepted from the entry dialog, tried in order
const INPUT_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%d.%m.%Y"];

/// Largest amount or budget limit accepted
pub const MAX_AMOUNT: u32 = 1_000_000;

/// Parse an amount in `0..=MAX_AMOUNT`; a comma is accepted as the decimal separator.
///
/// `Decimal::from_str` skips `_` between digits, so it is rejected up front.
pub fn parse_amount(text: &str) -> Result<Decimal, BookkeeperError> {
    let normalized = text.trim().replace(',', ".");
    if normalized.contains('_') {
        return Err(BookkeeperError::InvalidAmount(text.to_string()));
    }
    match Decimal::from_str(&normalized) {
        Ok(amount) if amount >= Decimal::ZERO && amount <= Decimal::from(MAX_AMOUNT) => Ok(amount.abs()),
        _ => Err(BookkeeperError::InvalidAmount(text.to_string())),
    }
}

/// Parse an expense date; blank input means `today`
pub fn parse_expense_date(text: &str, today: NaiveDate) -> Result<NaiveDate, BookkeeperError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(today);
    }
    INPUT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .ok_or_else(|| BookkeeperError::InvalidDate(text.to_string()))
}

/// Parse a primary key passed back by the view
pub fn parse_key(text: &str) -> Result<i64, BookkeeperError> {
    match text.trim().parse::<i64>() {
        Ok(pk) if pk > 0 => Ok(pk),
        _ => Err(BookkeeperError::InvalidKey(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.50").unwrap(), dec!(12.50));
        assert_eq!(parse_amount(" 7,25 ").unwrap(), dec!(7.25));
        assert_eq!(parse_amount("0").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("-0").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("1000000").unwrap(), Decimal::from(MAX_AMOUNT));
    }

    #[test]
    fn test_parse_amount_rejects_bad_input() {
        for text in ["", "abc", "-5", "1.2.3", "1_0", "_5", "1000000.01", "50000000000000000000000000000"] {
            assert!(
                matches!(parse_amount(text), Err(BookkeeperError::InvalidAmount(_))),
                "accepted {:?}",
                text
            );
        }
    }

    #[test]
    fn test_parse_expense_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(parse_expense_date("2024-03-09", today()).unwrap(), expected);
        assert_eq!(parse_expense_date("09-03-2024", today()).unwrap(), expected);
        assert_eq!(parse_expense_date("09.03.2024", today()).unwrap(), expected);
        assert_eq!(parse_expense_date("  ", today()).unwrap(), today());
        assert!(matches!(
            parse_expense_date("2024/03/09", today()),
            Err(BookkeeperError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("42").unwrap(), 42);
        assert!(parse_key("0").is_err());
        assert!(parse_key("x").is_err());
    }
}
