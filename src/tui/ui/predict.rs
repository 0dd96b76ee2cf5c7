//! Prediction form view.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{FieldKind, FormField, FormState, RequestState};
use crate::tui::styles::Theme;

use super::{key_hints, render_footer, render_header};

/// Cursor and notices for the form. Field values live in the controller.
#[derive(Debug, Default)]
pub struct PredictView {
    selected: usize,
    /// Advisory problem blocking submission, cleared on the next edit
    pub notice: Option<String>,
}

impl PredictView {
    #[must_use]
    pub fn selected_field(&self) -> FormField {
        FormField::DISPLAY_ORDER[self.selected]
    }

    pub fn next_field(&mut self) {
        self.step(1);
    }

    pub fn prev_field(&mut self) {
        self.step(FormField::DISPLAY_ORDER.len() - 1);
    }

    /// Move the cursor onto `field` if it can be edited.
    pub fn focus(&mut self, field: FormField) {
        if let Some(idx) = FormField::DISPLAY_ORDER.iter().position(|f| *f == field) {
            if field.is_editable() {
                self.selected = idx;
            }
        }
    }

    fn step(&mut self, by: usize) {
        let len = FormField::DISPLAY_ORDER.len();
        loop {
            self.selected = (self.selected + by) % len;
            if self.selected_field().is_editable() {
                break;
            }
        }
    }
}

/// Append a typed character to a numeric field value.
///
/// Only digits, `.` and `-` are accepted; anything else yields `None`.
#[must_use]
pub fn push_char(current: &str, c: char) -> Option<String> {
    if c.is_ascii_digit() || c == '.' || c == '-' {
        let mut next = String::with_capacity(current.len() + 1);
        next.push_str(current);
        next.push(c);
        Some(next)
    } else {
        None
    }
}

/// Next (or previous) option value after `current`, wrapping around.
/// An unrecognized current value selects the first option.
#[must_use]
pub fn cycle_option(current: &str, options: &[(&str, &str)], forward: bool) -> String {
    if options.is_empty() {
        return current.to_string();
    }
    let next = match options.iter().position(|(value, _)| *value == current) {
        Some(idx) if forward => (idx + 1) % options.len(),
        Some(idx) => (idx + options.len() - 1) % options.len(),
        None => 0,
    };
    options[next].0.to_string()
}

pub fn render_predict(
    f: &mut Frame,
    area: Rect,
    form: &FormState,
    view: &PredictView,
    state: &RequestState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_header(f, chunks[0], "Risk Assessment", "Enter patient information");
    render_form_fields(f, chunks[1], form, view);
    render_predict_footer(f, chunks[2], view, state);
}

fn render_form_fields(f: &mut Frame, area: Rect, form: &FormState, view: &PredictView) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let fields = &FormField::DISPLAY_ORDER;
    let mid = fields.len() / 2;
    let selected = view.selected_field();

    render_field_column(f, columns[0], &fields[..mid], form, selected);
    render_field_column(f, columns[1], &fields[mid..], form, selected);
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    form: &FormState,
    selected: FormField,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = *field == selected;
        let (border_style, title_style) = if is_selected {
            (Theme::border_focused(), Theme::subtitle())
        } else {
            (Theme::border(), Theme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label()), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let content = Paragraph::new(field_line(*field, form.get(*field), is_selected)).block(block);
        f.render_widget(content, chunks[i]);
    }
}

fn field_line(field: FormField, value: &str, is_selected: bool) -> Line<'static> {
    let body = match field.kind() {
        FieldKind::Select(options) => {
            let label = options
                .iter()
                .find(|(v, _)| *v == value)
                .map_or(value, |(_, label)| *label);
            if is_selected {
                Span::styled(format!("◀ {label} ▶"), Theme::text())
            } else {
                Span::styled(label.to_string(), Theme::text())
            }
        }
        FieldKind::Derived if value.is_empty() => Span::styled(field.hint(), Theme::text_muted()),
        FieldKind::Derived => Span::styled(
            value.to_string(),
            Theme::text_secondary().add_modifier(Modifier::ITALIC),
        ),
        FieldKind::Number { .. } if value.is_empty() => {
            Span::styled(field.hint(), Theme::text_muted())
        }
        FieldKind::Number { .. } => Span::styled(value.to_string(), Theme::text()),
    };

    let cursor = if is_selected && matches!(field.kind(), FieldKind::Number { .. }) {
        Span::styled("▌", Theme::subtitle())
    } else {
        Span::raw("")
    };

    Line::from(vec![Span::raw(" "), body, cursor])
}

fn render_predict_footer(f: &mut Frame, area: Rect, view: &PredictView, state: &RequestState) {
    let content = match (state, &view.notice) {
        (RequestState::Pending, _) => Line::from(Span::styled(
            "Analyzing... waiting for the prediction service",
            Theme::info(),
        )),
        (_, Some(notice)) => Line::from(vec![
            Span::styled("! ", Theme::warning()),
            Span::styled(notice.clone(), Theme::warning()),
        ]),
        (RequestState::Failed(message), None) => Line::from(vec![
            Span::styled("! ", Theme::danger()),
            Span::styled(message.clone(), Theme::danger()),
        ]),
        _ => key_hints(&[
            ("↑↓", "Navigate"),
            ("←→", "Choose"),
            ("Enter", "Predict Risk"),
            ("S", "Sample"),
            ("R", "Reset"),
            ("Esc", "Back"),
        ]),
    };

    render_footer(f, area, content);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_skips_bmi() {
        let mut view = PredictView::default();
        assert_eq!(view.selected_field(), FormField::Gender);

        view.focus(FormField::ApLo);
        view.next_field();
        assert_eq!(view.selected_field(), FormField::Cholesterol);
        view.prev_field();
        assert_eq!(view.selected_field(), FormField::ApLo);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut view = PredictView::default();
        view.prev_field();
        assert_eq!(view.selected_field(), FormField::Active);
        view.next_field();
        assert_eq!(view.selected_field(), FormField::Gender);
    }

    #[test]
    fn test_focus_ignores_derived_field() {
        let mut view = PredictView::default();
        view.focus(FormField::Bmi);
        assert_eq!(view.selected_field(), FormField::Gender);
    }

    #[test]
    fn test_push_char_filters_input() {
        assert_eq!(push_char("7", '0').as_deref(), Some("70"));
        assert_eq!(push_char("70", '.').as_deref(), Some("70."));
        assert_eq!(push_char("", '-').as_deref(), Some("-"));
        assert!(push_char("70", 'k').is_none());
    }

    #[test]
    fn test_cycle_option() {
        let options = &[("1", "Normal"), ("2", "Above Normal"), ("3", "Well Above Normal")];
        assert_eq!(cycle_option("1", options, true), "2");
        assert_eq!(cycle_option("3", options, true), "1");
        assert_eq!(cycle_option("1", options, false), "3");
        assert_eq!(cycle_option("", options, true), "1");
    }
}
