use chrono::NaiveDate;
use shop_ledger::db::{fetch_places, fetch_products, open_database};
use shop_ledger::{
    daily_purchases, daily_sales_summary, login, record_purchase, record_sale, register, Error,
    NewPurchase, PaymentMethod, PeriodKind, ReportRequest,
};
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn purchase(day: NaiveDate, place: &str, product: &str, value: f64) -> NewPurchase {
    NewPurchase {
        date: day,
        place: place.to_string(),
        product: product.to_string(),
        quantity: 1.0,
        value,
    }
}

#[test]
fn a_week_of_bookkeeping_adds_up() {
    let dir = TempDir::new().unwrap();
    let conn = open_database(&dir.path().join("ledger.sqlite")).unwrap();

    register(&conn, "ana", "secret").unwrap();
    let mut session = login(&conn, "ana", "secret").unwrap();

    let today = date(2024, 2, 10);
    record_sale(&conn, date(2024, 2, 5), 100.0, PaymentMethod::Cash).unwrap();
    record_sale(&conn, today, 50.0, PaymentMethod::Nequi).unwrap();
    record_sale(&conn, today, 25.0, PaymentMethod::Cash).unwrap();
    // Outside the week.
    record_sale(&conn, date(2024, 2, 12), 999.0, PaymentMethod::Debt).unwrap();

    record_purchase(&conn, &purchase(today, "Market", "Rice", 40.0)).unwrap();
    record_purchase(&conn, &purchase(date(2024, 2, 6), "Depot", "Oil", 20.0)).unwrap();

    let summary = daily_sales_summary(&conn, today).unwrap();
    assert_eq!(summary.get(&PaymentMethod::Cash), Some(&25.0));
    assert_eq!(summary.get(&PaymentMethod::Nequi), Some(&50.0));
    assert_eq!(daily_purchases(&conn, today).unwrap().len(), 1);

    let report = session
        .generate_report(&conn, &ReportRequest::for_period(PeriodKind::Weekly), today)
        .unwrap();
    assert_eq!(report.start_date(), date(2024, 2, 5));
    assert_eq!(report.end_date(), date(2024, 2, 11));
    assert_eq!(report.total_sales, 175.0);
    assert_eq!(report.total_purchases, 60.0);
    assert_eq!(report.profit, 115.0);
    assert!(!report.sales_by_method.contains_key(&PaymentMethod::Debt));
}

#[test]
fn data_survives_reopening_the_database() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("ledger.sqlite");

    {
        let conn = open_database(&path).unwrap();
        register(&conn, "ana", "secret").unwrap();
        record_purchase(&conn, &purchase(date(2024, 3, 1), "Market", "Rice", 10.0)).unwrap();
    }

    let conn = open_database(&path).unwrap();
    assert!(login(&conn, "ana", "secret").is_ok());
    assert_eq!(fetch_places(&conn).unwrap(), vec!["Market".to_string()]);
    assert_eq!(fetch_products(&conn).unwrap(), vec!["Rice".to_string()]);
}

#[test]
fn custom_range_overrides_the_period() {
    let dir = TempDir::new().unwrap();
    let conn = open_database(&dir.path().join("ledger.sqlite")).unwrap();
    register(&conn, "ana", "secret").unwrap();
    let mut session = login(&conn, "ana", "secret").unwrap();

    record_sale(&conn, date(2023, 12, 31), 10.0, PaymentMethod::Transfer).unwrap();
    record_sale(&conn, date(2024, 1, 2), 5.0, PaymentMethod::Transfer).unwrap();

    let request = ReportRequest::with_dates(PeriodKind::Daily, "2023-12-01", "2024-01-01");
    let report = session
        .generate_report(&conn, &request, date(2024, 2, 10))
        .unwrap();
    assert_eq!(report.period, PeriodKind::Daily);
    assert_eq!(report.total_sales, 10.0);

    let half = ReportRequest::with_dates(PeriodKind::Daily, "2023-12-01", "");
    assert!(matches!(
        session.generate_report(&conn, &half, date(2024, 2, 10)),
        Err(Error::InvalidDateFormat(_))
    ));
}
