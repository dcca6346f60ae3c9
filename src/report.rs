//! Report engine: turns a period kind (or explicit dates) into a concrete
//! range, then aggregates sales and purchases over it.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use rusqlite::Connection;
use tracing::info;

use crate::db::{sales_in_range, sales_total, total_purchases_in_range};
use crate::error::Result;
use crate::models::{DateRange, PeriodKind, Report};
use crate::validation::{non_blank, parse_date};

/// What a caller asks for when generating a report. Explicit dates, when
/// given, override the period rule but the report keeps the period's label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub kind: PeriodKind,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl ReportRequest {
    pub fn for_period(kind: PeriodKind) -> Self {
        Self {
            kind,
            start: None,
            end: None,
        }
    }

    pub fn with_dates(kind: PeriodKind, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            kind,
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }
}

/// Date range covered by `kind` on the day `today`.
pub fn resolve_period(kind: PeriodKind, today: NaiveDate) -> DateRange {
    match kind {
        PeriodKind::Daily => DateRange::single(today),
        PeriodKind::Weekly => {
            let week = today.week(Weekday::Mon);
            DateRange::new(week.first_day(), week.last_day())
        }
        PeriodKind::Biweekly => {
            if today.day() <= 15 {
                DateRange::new(first_of_month(today), today.with_day(15).unwrap_or(today))
            } else {
                DateRange::new(today.with_day(16).unwrap_or(today), last_of_month(today))
            }
        }
        PeriodKind::Monthly => DateRange::new(first_of_month(today), last_of_month(today)),
        PeriodKind::Yearly => {
            let first = today - Days::new(u64::from(today.ordinal0()));
            let last = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(NaiveDate::MAX);
            DateRange::new(first, last)
        }
    }
}

/// Resolve a request into a range. With no explicit dates the period rule
/// applies; otherwise both dates must parse.
pub fn resolve_range(request: &ReportRequest, today: NaiveDate) -> Result<DateRange> {
    let start = non_blank(request.start.as_deref());
    let end = non_blank(request.end.as_deref());

    match (start, end) {
        (None, None) => Ok(resolve_period(request.kind, today)),
        (start, end) => {
            let start = parse_date(start.unwrap_or_default())?;
            let end = parse_date(end.unwrap_or_default())?;
            Ok(DateRange::new(start, end))
        }
    }
}

/// Aggregate stored sales and purchases over `range`. An empty range is not an
/// error; it yields a report with every total at zero.
pub fn generate_report(conn: &Connection, kind: PeriodKind, range: DateRange) -> Result<Report> {
    let sales_by_method = sales_in_range(conn, range.start, range.end)?;
    let total_sales = sales_total(&sales_by_method);
    let total_purchases = total_purchases_in_range(conn, range.start, range.end)?;

    let report = Report {
        period: kind,
        range,
        sales_by_method,
        total_sales,
        total_purchases,
        profit: total_sales - total_purchases,
    };

    info!(
        period = kind.label(),
        start = %range.start,
        end = %range.end,
        total_sales,
        total_purchases,
        "Generated report"
    );
    Ok(report)
}

/// Resolve and generate in one step.
pub fn run_report(conn: &Connection, request: &ReportRequest, today: NaiveDate) -> Result<Report> {
    let range = resolve_range(request, today)?;
    generate_report(conn, request.kind, range)
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    day - Days::new(u64::from(day.day0()))
}

/// The 1st of the following month, minus one day.
fn last_of_month(day: NaiveDate) -> NaiveDate {
    let (year, month) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{open_in_memory, record_purchase, record_sale};
    use crate::error::Error;
    use crate::export::{document_lines, sheet_cells, CellValue};
    use crate::models::{NewPurchase, PaymentMethod};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn periods_resolve_for_a_leap_february_saturday() {
        let today = date(2024, 2, 10);

        assert_eq!(
            resolve_period(PeriodKind::Daily, today),
            DateRange::single(today)
        );
        assert_eq!(
            resolve_period(PeriodKind::Weekly, today),
            DateRange::new(date(2024, 2, 5), date(2024, 2, 11))
        );
        assert_eq!(
            resolve_period(PeriodKind::Biweekly, today),
            DateRange::new(date(2024, 2, 1), date(2024, 2, 15))
        );
        assert_eq!(
            resolve_period(PeriodKind::Monthly, today),
            DateRange::new(date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            resolve_period(PeriodKind::Yearly, today),
            DateRange::new(date(2024, 1, 1), date(2024, 12, 31))
        );
    }

    #[test]
    fn second_half_of_month_runs_to_month_end() {
        assert_eq!(
            resolve_period(PeriodKind::Biweekly, date(2023, 2, 16)),
            DateRange::new(date(2023, 2, 16), date(2023, 2, 28))
        );
        assert_eq!(
            resolve_period(PeriodKind::Biweekly, date(2024, 12, 31)),
            DateRange::new(date(2024, 12, 16), date(2024, 12, 31))
        );
        assert_eq!(
            resolve_period(PeriodKind::Monthly, date(2024, 4, 30)),
            DateRange::new(date(2024, 4, 1), date(2024, 4, 30))
        );
    }

    #[test]
    fn half_month_boundaries() {
        assert_eq!(
            resolve_period(PeriodKind::Biweekly, date(2024, 2, 15)),
            DateRange::new(date(2024, 2, 1), date(2024, 2, 15))
        );
        assert_eq!(
            resolve_period(PeriodKind::Biweekly, date(2024, 3, 1)),
            DateRange::new(date(2024, 3, 1), date(2024, 3, 15))
        );
        assert_eq!(
            resolve_period(PeriodKind::Biweekly, date(2024, 12, 20)),
            DateRange::new(date(2024, 12, 16), date(2024, 12, 31))
        );
    }

    #[test]
    fn december_month_ends_on_the_31st() {
        assert_eq!(
            resolve_period(PeriodKind::Monthly, date(2024, 12, 20)),
            DateRange::new(date(2024, 12, 1), date(2024, 12, 31))
        );
        assert_eq!(
            resolve_period(PeriodKind::Monthly, date(2025, 1, 1)),
            DateRange::new(date(2025, 1, 1), date(2025, 1, 31))
        );
    }

    #[test]
    fn weeks_are_monday_to_sunday() {
        // Sunday stays in the week that started the previous Monday.
        assert_eq!(
            resolve_period(PeriodKind::Weekly, date(2024, 2, 11)),
            DateRange::new(date(2024, 2, 5), date(2024, 2, 11))
        );
        // Weeks may straddle a year boundary.
        assert_eq!(
            resolve_period(PeriodKind::Weekly, date(2025, 1, 1)),
            DateRange::new(date(2024, 12, 30), date(2025, 1, 5))
        );
    }

    #[test]
    fn explicit_dates_override_the_period() {
        let request = ReportRequest::with_dates(PeriodKind::Daily, "2024-01-01", " 2024-01-31 ");
        assert_eq!(
            resolve_range(&request, date(2024, 6, 1)).unwrap(),
            DateRange::new(date(2024, 1, 1), date(2024, 1, 31))
        );

        let blank = ReportRequest::with_dates(PeriodKind::Monthly, "", "  ");
        assert_eq!(
            resolve_range(&blank, date(2024, 6, 10)).unwrap(),
            DateRange::new(date(2024, 6, 1), date(2024, 6, 30))
        );
    }

    #[test]
    fn malformed_or_partial_dates_are_rejected() {
        let bad = ReportRequest::with_dates(PeriodKind::Weekly, "2024-13-01", "2024-12-01");
        assert!(matches!(
            resolve_range(&bad, date(2024, 1, 1)),
            Err(Error::InvalidDateFormat(value)) if value == "2024-13-01"
        ));

        let partial = ReportRequest {
            kind: PeriodKind::Weekly,
            start: Some("2024-01-01".into()),
            end: None,
        };
        assert!(matches!(
            resolve_range(&partial, date(2024, 1, 1)),
            Err(Error::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn five_digit_years_are_rejected_instead_of_matching_nothing() {
        let conn = open_in_memory().unwrap();
        record_sale(&conn, date(2024, 5, 1), 10.0, PaymentMethod::Cash).unwrap();

        let request = ReportRequest::with_dates(PeriodKind::Yearly, "2024-01-01", "+10000-01-01");
        assert!(matches!(
            run_report(&conn, &request, date(2024, 6, 1)),
            Err(Error::InvalidDateFormat(value)) if value == "+10000-01-01"
        ));
    }

    #[test]
    fn empty_range_produces_zero_report() {
        let conn = open_in_memory().unwrap();
        let report = run_report(
            &conn,
            &ReportRequest::for_period(PeriodKind::Monthly),
            date(2024, 2, 10),
        )
        .unwrap();

        assert!(report.sales_by_method.is_empty());
        assert_eq!(report.total_sales, 0.0);
        assert_eq!(report.total_purchases, 0.0);
        assert_eq!(report.profit, 0.0);
        assert_eq!(report.period_label(), "Monthly");
    }

    #[test]
    fn empty_report_renders_unsigned_zeros() {
        let conn = open_in_memory().unwrap();
        let report = run_report(
            &conn,
            &ReportRequest::for_period(PeriodKind::Daily),
            date(2024, 2, 10),
        )
        .unwrap();

        assert!(report.total_sales.is_sign_positive());
        assert!(report.profit.is_sign_positive());
        let lines = document_lines(&report);
        assert_eq!(lines[2], "Total Sales: 0.00");
        assert_eq!(lines[4], "Profit: 0.00");
        let last = sheet_cells(&report).pop().unwrap();
        assert!(matches!(last.value, CellValue::Number(n) if n.is_sign_positive()));
    }

    #[test]
    fn profit_can_go_negative() {
        let conn = open_in_memory().unwrap();
        let today = date(2024, 2, 10);
        record_sale(&conn, today, 40.0, PaymentMethod::Cash).unwrap();
        record_sale(&conn, date(2024, 2, 6), 10.0, PaymentMethod::Nequi).unwrap();
        record_sale(&conn, date(2024, 2, 12), 500.0, PaymentMethod::Cash).unwrap();
        record_purchase(
            &conn,
            &NewPurchase {
                date: date(2024, 2, 5),
                place: "Market".into(),
                product: "Flour".into(),
                quantity: 3.0,
                value: 80.0,
            },
        )
        .unwrap();

        let report = run_report(&conn, &ReportRequest::for_period(PeriodKind::Weekly), today).unwrap();
        assert_eq!(report.total_sales, 50.0);
        assert_eq!(report.total_purchases, 80.0);
        assert_eq!(report.profit, -30.0);
        assert_eq!(report.profit, report.total_sales - report.total_purchases);
        assert_eq!(report.sales_by_method[&PaymentMethod::Cash], 40.0);
        assert_eq!(report.sales_by_method[&PaymentMethod::Nequi], 10.0);
    }

    #[test]
    fn reversed_range_is_empty_not_an_error() {
        let conn = open_in_memory().unwrap();
        record_sale(&conn, date(2024, 2, 10), 40.0, PaymentMethod::Cash).unwrap();

        let request = ReportRequest::with_dates(PeriodKind::Daily, "2024-02-20", "2024-02-01");
        let report = run_report(&conn, &request, date(2024, 2, 10)).unwrap();
        assert_eq!(report.total_sales, 0.0);
    }
}
