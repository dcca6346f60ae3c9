use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, ToSql};
use tracing::debug;

use crate::error::Result;
use crate::models::{PaymentMethod, SaleRecord, SalesByMethod};

impl ToSql for PaymentMethod {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for PaymentMethod {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|err| FromSqlError::Other(Box::new(err)))
    }
}

/// Store a sale and echo the hydrated record.
pub fn record_sale(
    conn: &Connection,
    date: NaiveDate,
    value: f64,
    payment_method: PaymentMethod,
) -> Result<SaleRecord> {
    conn.execute(
        "INSERT INTO sales (date, value, payment_method) VALUES (?1, ?2, ?3)",
        params![date, value, payment_method],
    )?;

    let id = conn.last_insert_rowid();
    debug!(id, %date, value, method = %payment_method, "Recorded sale");
    Ok(SaleRecord {
        id,
        date,
        value,
        payment_method,
    })
}

/// Totals per payment method for a single calendar day.
pub fn daily_sales_summary(conn: &Connection, date: NaiveDate) -> Result<SalesByMethod> {
    sales_in_range(conn, date, date)
}

/// Totals per payment method over `[start, end]`, both ends inclusive. Only
/// methods with at least one sale appear in the map.
pub fn sales_in_range(conn: &Connection, start: NaiveDate, end: NaiveDate) -> Result<SalesByMethod> {
    let mut stmt = conn.prepare(
        "SELECT payment_method, SUM(value)
         FROM sales
         WHERE date BETWEEN ?1 AND ?2
         GROUP BY payment_method",
    )?;

    let rows = stmt
        .query_map(params![start, end], |row| {
            Ok((
                row.get::<_, PaymentMethod>(0)?,
                row.get::<_, Option<f64>>(1)?.unwrap_or(0.0),
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    // Legacy labels group separately in SQL but belong to the same method.
    let mut totals = SalesByMethod::new();
    for (method, sum) in rows {
        *totals.entry(method).or_insert(0.0) += sum;
    }
    Ok(totals)
}

/// Grand total of a per-method summary. An empty summary totals `+0.0`, never
/// `-0.0`, so it renders as `0.00`.
pub fn sales_total(summary: &SalesByMethod) -> f64 {
    summary.values().fold(0.0, |acc, value| acc + value)
}
