//! Domain models that mirror the SQLite schema plus the derived report value.
//! These stay light-weight data holders; persistence lives in `db` and the
//! arithmetic lives in `report`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::ValidationError;

/// Per-method sale totals, ordered by payment method declaration order.
pub type SalesByMethod = BTreeMap<PaymentMethod, f64>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A registered account. Passwords are kept as entered and compared verbatim.
pub struct User {
    pub username: String,
    pub password: String,
}

/// How a sale was paid. The derived ordering drives the row order in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaymentMethod {
    Cash,
    Nequi,
    Transfer,
    Debt,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Nequi,
        PaymentMethod::Transfer,
        PaymentMethod::Debt,
    ];

    /// Canonical code written to the `sales.payment_method` column.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Nequi => "Nequi",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::Debt => "Debt",
        }
    }

    /// Step through `ALL`, wrapping at either end. Used by selector widgets.
    pub fn cycle(self, offset: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0) as isize;
        Self::ALL[(idx + offset).rem_euclid(len) as usize]
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    /// Accepts the canonical codes case-insensitively, plus the Spanish labels
    /// older databases were written with.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "cash" | "efectivo" => Ok(PaymentMethod::Cash),
            "nequi" => Ok(PaymentMethod::Nequi),
            "transfer" | "transferencia" => Ok(PaymentMethod::Transfer),
            "debt" | "deuda" => Ok(PaymentMethod::Debt),
            _ => Err(ValidationError::UnknownPaymentMethod(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub value: f64,
    pub payment_method: PaymentMethod,
}

/// Field values for a purchase that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchase {
    pub date: NaiveDate,
    pub place: String,
    pub product: String,
    pub quantity: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub place: String,
    pub product: String,
    pub quantity: f64,
    pub value: f64,
}

impl PurchaseRecord {
    /// `Place - Product: quantity @ value`, the listing format on the purchases
    /// screen.
    pub fn display_line(&self) -> String {
        format!(
            "{} - {}: {} @ {:.2}",
            self.place, self.product, self.quantity, self.value
        )
    }
}

/// Selects the date-range rule a report uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKind {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl PeriodKind {
    pub const ALL: [PeriodKind; 5] = [
        PeriodKind::Daily,
        PeriodKind::Weekly,
        PeriodKind::Biweekly,
        PeriodKind::Monthly,
        PeriodKind::Yearly,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PeriodKind::Daily => "Daily",
            PeriodKind::Weekly => "Weekly",
            PeriodKind::Biweekly => "Biweekly",
            PeriodKind::Monthly => "Monthly",
            PeriodKind::Yearly => "Yearly",
        }
    }

    pub fn cycle(self, offset: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0) as isize;
        Self::ALL[(idx + offset).rem_euclid(len) as usize]
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }
}

/// Aggregated view over a resolved date range. Built fresh per request and
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub period: PeriodKind,
    pub range: DateRange,
    pub sales_by_method: SalesByMethod,
    pub total_sales: f64,
    pub total_purchases: f64,
    pub profit: f64,
}

impl Report {
    pub fn period_label(&self) -> &'static str {
        self.period.label()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.range.start
    }

    pub fn end_date(&self) -> NaiveDate {
        self.range.end
    }

    /// `Report Weekly (2024-02-05 to 2024-02-11)`, shared by the screen and
    /// both exporters.
    pub fn title(&self) -> String {
        format!(
            "Report {} ({} to {})",
            self.period_label(),
            self.range.start.format("%Y-%m-%d"),
            self.range.end.format("%Y-%m-%d")
        )
    }
}
