//! Shared row-decoding helpers for the SQLite repositories.

use jiff::Timestamp;
use sqlx::{Row, sqlite::SqliteRow};

/// Decode a non-negative money amount stored as a signed integer column.
pub(crate) fn try_get_amount(row: &SqliteRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Decode a line quantity stored as a signed integer column.
pub(crate) fn try_get_quantity(row: &SqliteRow, col: &str) -> Result<u32, sqlx::Error> {
    let quantity_i64: i64 = row.try_get(col)?;

    u32::try_from(quantity_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Decode a timestamp stored as Unix milliseconds.
pub(crate) fn try_get_timestamp(row: &SqliteRow, col: &str) -> Result<Timestamp, sqlx::Error> {
    let millis: i64 = row.try_get(col)?;

    Timestamp::from_millisecond(millis).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Bind-side conversion of a money amount to its column representation.
pub(crate) fn amount_to_i64(amount: u64) -> Result<i64, std::num::TryFromIntError> {
    i64::try_from(amount)
}
