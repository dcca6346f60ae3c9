use chrono::NaiveDate;
use rusqlite::{params, Connection};
use tracing::debug;

use crate::error::Result;
use crate::models::{NewPurchase, PurchaseRecord};

/// Remember the place and product names, then store the purchase.
///
/// `INSERT OR IGNORE` keeps the reference tables unique without surfacing the
/// duplicate as an error, so a known name never blocks the purchase row.
pub fn record_purchase(conn: &Connection, purchase: &NewPurchase) -> Result<PurchaseRecord> {
    conn.execute(
        "INSERT OR IGNORE INTO places (name) VALUES (?1)",
        params![purchase.place],
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO products (name) VALUES (?1)",
        params![purchase.product],
    )?;

    conn.execute(
        "INSERT INTO purchases (date, place, product, quantity, value)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            purchase.date,
            purchase.place,
            purchase.product,
            purchase.quantity,
            purchase.value
        ],
    )?;

    let id = conn.last_insert_rowid();
    debug!(id, place = %purchase.place, product = %purchase.product, "Recorded purchase");
    Ok(PurchaseRecord {
        id,
        date: purchase.date,
        place: purchase.place.clone(),
        product: purchase.product.clone(),
        quantity: purchase.quantity,
        value: purchase.value,
    })
}

/// Purchases made on `date`, in the order they were entered.
pub fn daily_purchases(conn: &Connection, date: NaiveDate) -> Result<Vec<PurchaseRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, place, product, quantity, value
         FROM purchases
         WHERE date = ?1
         ORDER BY id",
    )?;

    let purchases = stmt
        .query_map(params![date], |row| {
            Ok(PurchaseRecord {
                id: row.get(0)?,
                date: row.get(1)?,
                place: row.get(2)?,
                product: row.get(3)?,
                quantity: row.get(4)?,
                value: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(purchases)
}

/// Sum of purchase values over `[start, end]`; zero when nothing matches.
pub fn total_purchases_in_range(conn: &Connection, start: NaiveDate, end: NaiveDate) -> Result<f64> {
    let total = conn.query_row(
        "SELECT COALESCE(SUM(value), 0.0) FROM purchases WHERE date BETWEEN ?1 AND ?2",
        params![start, end],
        |row| row.get(0),
    )?;
    Ok(total)
}

pub fn purchases_total(purchases: &[PurchaseRecord]) -> f64 {
    purchases.iter().fold(0.0, |acc, p| acc + p.value)
}

/// Every place used so far, for the purchase form's autocomplete. Sorted by
/// lowercase first so accents and capitalization stay intact.
pub fn fetch_places(conn: &Connection) -> Result<Vec<String>> {
    fetch_names(conn, "SELECT name FROM places WHERE name <> '' ORDER BY LOWER(name), name")
}

pub fn fetch_products(conn: &Connection) -> Result<Vec<String>> {
    fetch_names(
        conn,
        "SELECT name FROM products WHERE name <> '' ORDER BY LOWER(name), name",
    )
}

fn fetch_names(conn: &Connection, sql: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([])?;

    let mut names = Vec::new();
    while let Some(row) = rows.next()? {
        let name: Option<String> = row.get(0)?;
        names.extend(name);
    }
    Ok(names)
}
