use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::export::format_amount;
use crate::models::SalesByMethod;

/// Render `Name: value`, falling back to a dimmed placeholder when empty and
/// highlighting the focused field.
pub(crate) fn field_line(
    field_name: &str,
    value: &str,
    placeholder: &str,
    is_active: bool,
) -> Line<'static> {
    let display = if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{field_name}: ")),
        Span::styled(display, style),
    ])
}

/// Render a `< choice >` selector that cycles with the arrow keys.
pub(crate) fn selector_line(field_name: &str, choice: &str, is_active: bool) -> Line<'static> {
    let style = if is_active {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(format!("{field_name}: ")),
        Span::styled(format!("< {choice} >"), style),
    ])
}

/// One line per payment method followed by the grand total.
pub(crate) fn sales_lines(summary: &SalesByMethod, total: f64) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = summary
        .iter()
        .map(|(method, value)| Line::from(format!("{method}: {}", format_amount(*value))))
        .collect();
    lines.push(total_line("Total", total));
    lines
}

pub(crate) fn total_line(label: &str, value: f64) -> Line<'static> {
    Line::from(Span::styled(
        format!("{label}: {}", format_amount(value)),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMethod;

    #[test]
    fn surface_error_prefers_root_cause() {
        let err = anyhow::anyhow!("disk full").context("failed to export report");
        assert_eq!(surface_error(&err), "disk full");
    }

    #[test]
    fn sales_lines_end_with_total() {
        let mut summary = SalesByMethod::new();
        summary.insert(PaymentMethod::Nequi, 12.0);
        let lines = sales_lines(&summary, 12.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].to_string(), "Nequi: 12.00");
        assert_eq!(lines[1].to_string(), "Total: 12.00");
    }

    #[test]
    fn empty_fields_show_placeholder() {
        let line = field_line("Place", "", "<required>", false);
        assert_eq!(line.to_string(), "Place: <required>");
    }
}
