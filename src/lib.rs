//! Core library surface for the Shop Ledger bookkeeping application.
//!
//! Sales and purchases are recorded into an embedded SQLite store, aggregated
//! into period reports, and exported as PDF or XLSX. The `ui` module is the
//! terminal front-end the binary drives; everything else can be embedded by
//! any other shell.
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod report;
pub mod session;
pub mod ui;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result, ValidationError};

/// Storage operations the front-end calls directly.
pub use db::{
    daily_purchases, daily_sales_summary, open_database, record_purchase, record_sale,
};

pub use export::{export_pdf, export_spreadsheet};
pub use models::{
    DateRange, NewPurchase, PaymentMethod, PeriodKind, PurchaseRecord, Report, SaleRecord,
    SalesByMethod, User,
};
pub use report::{generate_report, resolve_period, resolve_range, ReportRequest};
pub use session::{login, register, Session};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
