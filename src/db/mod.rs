//! Persistence module split across logical submodules. Every function takes a
//! borrowed connection and runs one statement (or a short fixed sequence), so
//! each call commits on its own.

mod connection;
mod purchases;
mod sales;
mod users;

pub use connection::{ensure_schema, open_database, open_in_memory};
pub use purchases::{
    daily_purchases, fetch_places, fetch_products, purchases_total, record_purchase,
    total_purchases_in_range,
};
pub use sales::{daily_sales_summary, record_sale, sales_in_range, sales_total};
pub use users::{authenticate, register_user};
