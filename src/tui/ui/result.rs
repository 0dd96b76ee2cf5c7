//! Prediction result view.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::PredictionResult;
use crate::tui::styles::Theme;

use super::{key_hints, percent, render_footer, render_header};

pub fn render_result(
    f: &mut Frame,
    area: Rect,
    result: &PredictionResult,
    received_at: Option<DateTime<Utc>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(f, chunks[0], "Prediction Result", "Cardiovascular disease risk");
    render_result_content(f, chunks[1], result, received_at);
    render_footer(
        f,
        chunks[2],
        key_hints(&[("Enter", "Close"), ("N", "New Prediction"), ("Esc", "Home")]),
    );
}

fn render_result_content(
    f: &mut Frame,
    area: Rect,
    result: &PredictionResult,
    received_at: Option<DateTime<Utc>>,
) {
    let level = result.level();
    let risk_style = Theme::risk_level(level);

    let block = Block::default()
        .title(Span::styled(" Assessment ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(risk_style);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Risk level
            Constraint::Length(3), // Probability
            Constraint::Length(4), // Message
            Constraint::Min(0),    // Notice
        ])
        .margin(1)
        .split(inner);

    let icon = level.map_or("!!", |l| l.icon());
    let risk_display = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{icon} {}", result.risk_level),
            risk_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            received_at.map_or_else(String::new, |at| {
                format!("Received {}", at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"))
            }),
            Theme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(risk_display, chunks[0]);

    let prob_gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Disease Probability ", Theme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .gauge_style(risk_style)
        .percent(percent(result.ratio()))
        .label(format!("{}%", result.probability));
    f.render_widget(prob_gauge, chunks[1]);

    let message = Paragraph::new(Line::from(Span::styled(
        result.message.clone(),
        Theme::text(),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(message, chunks[2]);

    let notice = Paragraph::new(vec![
        Line::from(Span::styled("Important", Theme::warning())),
        Line::from(Span::styled(
            "This prediction is for educational purposes only. Consult a healthcare professional for medical advice.",
            Theme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(notice, chunks[3]);
}
