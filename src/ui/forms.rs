use chrono::NaiveDate;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::error::Result;
use crate::models::{NewPurchase, PaymentMethod, PeriodKind};
use crate::report::ReportRequest;
use crate::validation::{parse_amount, require};

use super::helpers::{field_line, selector_line};

/// Credentials typed on the login screen.
#[derive(Default, Clone)]
pub(crate) struct LoginForm {
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) active: LoginField,
    pub(crate) error: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum LoginField {
    #[default]
    Username,
    Password,
}

impl LoginForm {
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            LoginField::Username => self.username.push(ch),
            LoginField::Password => self.password.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            LoginField::Username => {
                self.username.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
        }
    }

    /// The password is shown masked.
    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        let masked = "*".repeat(self.password.chars().count());
        vec![
            field_line(
                "Username",
                &self.username,
                "<required>",
                self.active == LoginField::Username,
            ),
            field_line(
                "Password",
                &masked,
                "<required>",
                self.active == LoginField::Password,
            ),
        ]
    }

    /// Row offset and prefix width of the focused field, for cursor placement.
    pub(crate) fn cursor(&self) -> (u16, usize) {
        match self.active {
            LoginField::Username => (0, "Username: ".len() + self.username.chars().count()),
            LoginField::Password => (1, "Password: ".len() + self.password.chars().count()),
        }
    }
}

/// A single sale entry: the amount plus the payment method selector.
#[derive(Clone)]
pub(crate) struct SaleForm {
    pub(crate) value: String,
    pub(crate) method: PaymentMethod,
    pub(crate) active: SaleField,
    pub(crate) error: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum SaleField {
    Value,
    Method,
}

impl Default for SaleForm {
    fn default() -> Self {
        Self {
            value: String::new(),
            method: PaymentMethod::Cash,
            active: SaleField::Value,
            error: None,
        }
    }
}

impl SaleForm {
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            SaleField::Value => SaleField::Method,
            SaleField::Method => SaleField::Value,
        };
    }

    /// Only the amount field takes typed characters.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if self.active == SaleField::Value && !ch.is_control() {
            self.value.push(ch);
            true
        } else {
            false
        }
    }

    pub(crate) fn backspace(&mut self) {
        if self.active == SaleField::Value {
            self.value.pop();
        }
    }

    pub(crate) fn cycle_method(&mut self, offset: isize) {
        if self.active == SaleField::Method {
            self.method = self.method.cycle(offset);
        }
    }

    pub(crate) fn parse_inputs(&self) -> Result<(f64, PaymentMethod)> {
        let value = parse_amount("Sale value", &self.value)?;
        Ok((value, self.method))
    }

    /// Keep the chosen method so consecutive sales are quick to enter.
    pub(crate) fn reset(&mut self) {
        self.value.clear();
        self.active = SaleField::Value;
        self.error = None;
    }

    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        vec![
            field_line(
                "Value",
                &self.value,
                "<required>",
                self.active == SaleField::Value,
            ),
            selector_line(
                "Payment",
                self.method.as_str(),
                self.active == SaleField::Method,
            ),
        ]
    }

    pub(crate) fn cursor(&self) -> Option<(u16, usize)> {
        match self.active {
            SaleField::Value => Some((0, "Value: ".len() + self.value.chars().count())),
            SaleField::Method => None,
        }
    }
}

/// Purchase entry, with autocomplete for places and products already seen.
#[derive(Default, Clone)]
pub(crate) struct PurchaseForm {
    pub(crate) place: String,
    pub(crate) product: String,
    pub(crate) quantity: String,
    pub(crate) value: String,
    pub(crate) active: PurchaseField,
    pub(crate) error: Option<String>,
    pub(crate) suggestion: Option<String>,
    pub(crate) autocomplete_disabled: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum PurchaseField {
    #[default]
    Place,
    Product,
    Quantity,
    Value,
}

impl PurchaseField {
    fn label(self) -> &'static str {
        match self {
            PurchaseField::Place => "Place",
            PurchaseField::Product => "Product",
            PurchaseField::Quantity => "Quantity",
            PurchaseField::Value => "Value",
        }
    }

    fn row(self) -> u16 {
        match self {
            PurchaseField::Place => 0,
            PurchaseField::Product => 1,
            PurchaseField::Quantity => 2,
            PurchaseField::Value => 3,
        }
    }

    fn autocompletes(self) -> bool {
        matches!(self, PurchaseField::Place | PurchaseField::Product)
    }
}

impl PurchaseForm {
    pub(crate) fn toggle_field(&mut self) {
        self.move_focus(1);
    }

    pub(crate) fn toggle_field_back(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, offset: isize) {
        const ORDER: [PurchaseField; 4] = [
            PurchaseField::Place,
            PurchaseField::Product,
            PurchaseField::Quantity,
            PurchaseField::Value,
        ];
        let idx = ORDER.iter().position(|f| *f == self.active).unwrap_or(0) as isize;
        self.active = ORDER[(idx + offset).rem_euclid(ORDER.len() as isize) as usize];
        self.suggestion = None;
        self.autocomplete_disabled = false;
    }

    fn active_value_mut(&mut self) -> &mut String {
        match self.active {
            PurchaseField::Place => &mut self.place,
            PurchaseField::Product => &mut self.product,
            PurchaseField::Quantity => &mut self.quantity,
            PurchaseField::Value => &mut self.value,
        }
    }

    fn value_of(&self, field: PurchaseField) -> &str {
        match field {
            PurchaseField::Place => &self.place,
            PurchaseField::Product => &self.product,
            PurchaseField::Quantity => &self.quantity,
            PurchaseField::Value => &self.value,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.autocomplete_disabled = false;
        self.active_value_mut().push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.active_value_mut().pop();
        self.autocomplete_disabled = false;
    }

    /// Validate every field and build the purchase for `date`.
    pub(crate) fn parse_inputs(&self, date: NaiveDate) -> Result<NewPurchase> {
        let place = require("Place", &self.place)?.to_string();
        let product = require("Product", &self.product)?.to_string();
        let quantity = parse_amount("Quantity", &self.quantity)?;
        let value = parse_amount("Value", &self.value)?;
        Ok(NewPurchase {
            date,
            place,
            product,
            quantity,
            value,
        })
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Suggest the first known name starting with what has been typed (two
    /// characters minimum) in the place or product field.
    pub(crate) fn update_suggestion(&mut self, places: &[String], products: &[String]) {
        let candidates = match self.active {
            PurchaseField::Place => places,
            PurchaseField::Product => products,
            _ => {
                self.suggestion = None;
                return;
            }
        };

        let current = self.value_of(self.active);
        if self.autocomplete_disabled || current.chars().count() < 2 {
            self.suggestion = None;
            return;
        }

        let current_lower = current.to_lowercase();
        self.suggestion = candidates
            .iter()
            .find(|candidate| candidate.to_lowercase().starts_with(&current_lower))
            .filter(|candidate| candidate.to_lowercase() != current_lower)
            .cloned();
    }

    pub(crate) fn accept_suggestion(&mut self) -> bool {
        if !self.active.autocompletes() {
            return false;
        }
        match self.suggestion.take() {
            Some(candidate) => {
                *self.active_value_mut() = candidate;
                self.autocomplete_disabled = true;
                true
            }
            None => false,
        }
    }

    pub(crate) fn cancel_autocomplete(&mut self) -> bool {
        if self.active.autocompletes() && self.suggestion.is_some() {
            self.autocomplete_disabled = true;
            self.suggestion = None;
            return true;
        }
        false
    }

    /// Remaining characters of the suggestion, shown ghosted after the input.
    pub(crate) fn suggestion_suffix(&self) -> Option<String> {
        let candidate = self.suggestion.as_ref()?;
        let typed = self.value_of(self.active).chars().count();
        let suffix: String = candidate.chars().skip(typed).collect();
        if suffix.is_empty() {
            None
        } else {
            Some(suffix)
        }
    }

    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        [
            PurchaseField::Place,
            PurchaseField::Product,
            PurchaseField::Quantity,
            PurchaseField::Value,
        ]
        .into_iter()
        .map(|field| {
            let is_active = self.active == field;
            let mut line = field_line(field.label(), self.value_of(field), "<required>", is_active);
            if is_active && !self.value_of(field).is_empty() {
                if let Some(suffix) = self.suggestion_suffix() {
                    line.push_span(Span::styled(suffix, Style::default().fg(Color::DarkGray)));
                }
            }
            line
        })
        .collect()
    }

    pub(crate) fn cursor(&self) -> (u16, usize) {
        let field = self.active;
        let prefix = field.label().len() + 2;
        (field.row(), prefix + self.value_of(field).chars().count())
    }
}

/// Report selection: period kind plus optional explicit dates.
#[derive(Clone)]
pub(crate) struct ReportForm {
    pub(crate) kind: PeriodKind,
    pub(crate) start: String,
    pub(crate) end: String,
    pub(crate) active: ReportField,
    pub(crate) error: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum ReportField {
    Kind,
    Start,
    End,
}

impl Default for ReportForm {
    fn default() -> Self {
        Self {
            kind: PeriodKind::Daily,
            start: String::new(),
            end: String::new(),
            active: ReportField::Kind,
            error: None,
        }
    }
}

impl ReportForm {
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            ReportField::Kind => ReportField::Start,
            ReportField::Start => ReportField::End,
            ReportField::End => ReportField::Kind,
        };
    }

    /// Dates only take digits and dashes.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if !(ch.is_ascii_digit() || ch == '-') {
            return false;
        }
        match self.active {
            ReportField::Kind => return false,
            ReportField::Start => self.start.push(ch),
            ReportField::End => self.end.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            ReportField::Kind => {}
            ReportField::Start => {
                self.start.pop();
            }
            ReportField::End => {
                self.end.pop();
            }
        }
    }

    pub(crate) fn cycle_kind(&mut self, offset: isize) {
        if self.active == ReportField::Kind {
            self.kind = self.kind.cycle(offset);
        }
    }

    pub(crate) fn to_request(&self) -> ReportRequest {
        ReportRequest {
            kind: self.kind,
            start: Some(self.start.clone()),
            end: Some(self.end.clone()),
        }
    }

    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        vec![
            selector_line("Period", self.kind.label(), self.active == ReportField::Kind),
            field_line(
                "Start",
                &self.start,
                "<YYYY-MM-DD, optional>",
                self.active == ReportField::Start,
            ),
            field_line(
                "End",
                &self.end,
                "<YYYY-MM-DD, optional>",
                self.active == ReportField::End,
            ),
        ]
    }

    pub(crate) fn cursor(&self) -> Option<(u16, usize)> {
        match self.active {
            ReportField::Kind => None,
            ReportField::Start => Some((1, "Start: ".len() + self.start.chars().count())),
            ReportField::End => Some((2, "End: ".len() + self.end.chars().count())),
        }
    }
}
