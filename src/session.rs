//! Account registration, login, and the per-user context that replaces any
//! process-wide "current user" or "current report" state.

use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::{info, warn};

use crate::db::{authenticate, register_user};
use crate::error::{Error, Result, ValidationError};
use crate::models::{Report, User};
use crate::report::{run_report, ReportRequest};
use crate::validation::require;

/// Create an account. Both fields are required; a taken username surfaces as
/// `DuplicateUser`.
///
/// Passwords are stored as entered. There is no hashing.
pub fn register(conn: &Connection, username: &str, password: &str) -> Result<User> {
    let username = require("Username", username)?;
    // Only an empty password is refused; whitespace is kept as typed.
    if password.is_empty() {
        return Err(ValidationError::MissingField("Password").into());
    }
    let user = register_user(conn, username, password)?;
    info!(username, "Account created");
    Ok(user)
}

/// Check credentials and open a session for the user.
pub fn login(conn: &Connection, username: &str, password: &str) -> Result<Session> {
    let username = username.trim();
    if authenticate(conn, username, password)? {
        info!(username, "Logged in");
        Ok(Session::new(username))
    } else {
        warn!(username, "Rejected login");
        Err(Error::InvalidCredentials)
    }
}

/// The logged-in user plus the most recently generated report. Logging out is
/// simply dropping the value.
#[derive(Debug, Clone)]
pub struct Session {
    username: String,
    current_report: Option<Report>,
}

impl Session {
    fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            current_report: None,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Build a report and keep it as the current one, replacing any earlier
    /// report. On failure the previous report is left in place.
    pub fn generate_report(
        &mut self,
        conn: &Connection,
        request: &ReportRequest,
        today: NaiveDate,
    ) -> Result<&Report> {
        let report = run_report(conn, request, today)?;
        Ok(self.current_report.insert(report))
    }

    pub fn current_report(&self) -> Option<&Report> {
        self.current_report.as_ref()
    }

    /// The current report, or `NoReport` when none has been generated yet.
    pub fn require_report(&self) -> Result<&Report> {
        self.current_report.as_ref().ok_or(Error::NoReport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{open_in_memory, record_sale};
    use crate::models::{PaymentMethod, PeriodKind};

    #[test]
    fn register_then_login() {
        let conn = open_in_memory().unwrap();
        register(&conn, "ana", "secret").unwrap();

        let session = login(&conn, "ana", "secret").unwrap();
        assert_eq!(session.username(), "ana");
        assert!(session.current_report().is_none());

        assert!(matches!(
            login(&conn, "ana", "wrong"),
            Err(Error::InvalidCredentials)
        ));
        assert!(matches!(
            register(&conn, "ana", "again"),
            Err(Error::DuplicateUser(_))
        ));
    }

    #[test]
    fn registration_requires_both_fields() {
        let conn = open_in_memory().unwrap();
        assert!(matches!(
            register(&conn, "  ", "secret"),
            Err(Error::Validation(ValidationError::MissingField("Username")))
        ));
        assert!(matches!(
            register(&conn, "ana", ""),
            Err(Error::Validation(ValidationError::MissingField("Password")))
        ));
    }

    #[test]
    fn whitespace_password_is_kept_verbatim() {
        let conn = open_in_memory().unwrap();
        register(&conn, "ana", "  ").unwrap();

        assert!(login(&conn, "ana", "  ").is_ok());
        assert!(matches!(
            login(&conn, "ana", ""),
            Err(Error::InvalidCredentials)
        ));
    }

    #[test]
    fn new_report_replaces_the_previous_one() {
        let conn = open_in_memory().unwrap();
        register(&conn, "ana", "secret").unwrap();
        let mut session = login(&conn, "ana", "secret").unwrap();
        assert!(matches!(session.require_report(), Err(Error::NoReport)));

        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        record_sale(&conn, today, 25.0, PaymentMethod::Cash).unwrap();

        session
            .generate_report(&conn, &ReportRequest::for_period(PeriodKind::Daily), today)
            .unwrap();
        session
            .generate_report(&conn, &ReportRequest::for_period(PeriodKind::Yearly), today)
            .unwrap();

        let report = session.require_report().unwrap();
        assert_eq!(report.period, PeriodKind::Yearly);
        assert_eq!(report.total_sales, 25.0);
    }

    #[test]
    fn failed_generation_keeps_the_last_report() {
        let conn = open_in_memory().unwrap();
        register(&conn, "ana", "secret").unwrap();
        let mut session = login(&conn, "ana", "secret").unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();

        session
            .generate_report(&conn, &ReportRequest::for_period(PeriodKind::Monthly), today)
            .unwrap();
        let bad = ReportRequest::with_dates(PeriodKind::Daily, "yesterday", "today");
        assert!(session.generate_report(&conn, &bad, today).is_err());

        assert_eq!(session.require_report().unwrap().period, PeriodKind::Monthly);
    }
}
