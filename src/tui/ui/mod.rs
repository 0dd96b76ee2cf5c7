//! UI module: View components for the TUI.

pub mod data_insights;
pub mod disclaimer;
pub mod home;
pub mod model_info;
pub mod predict;
pub mod result;

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::Theme;

/// One-line notice shown under every screen.
pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "Educational use only. Predictions do not replace a consultation with a healthcare professional.",
        Theme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Theme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

pub(crate) fn render_header(f: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled(title.to_string(), Theme::title()),
        Span::styled(format!(" │ {subtitle}"), Theme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

pub(crate) fn render_footer(f: &mut Frame, area: Rect, content: Line<'_>) {
    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}

/// `[K] Desc` pairs for footers and action lists.
pub(crate) fn key_hints(pairs: &[(&str, &str)]) -> Line<'static> {
    let spans: Vec<Span<'static>> = pairs
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!("[{key}] "), Theme::key_hint()),
                Span::styled(format!("{desc} "), Theme::key_desc()),
            ]
        })
        .collect();
    Line::from(spans)
}

pub(crate) fn render_error_panel(f: &mut Frame, area: Rect, title: &str, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!("! {title}"), Theme::danger())),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Theme::text())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::danger()),
    );

    f.render_widget(content, area);
}

pub(crate) fn render_placeholder(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Theme::text_muted())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );

    f.render_widget(content, area);
}

/// Bordered block with a subtitle-styled title.
pub(crate) fn panel(title: &str) -> Block<'static> {
    Block::default()
        .title(Span::styled(format!(" {title} "), Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border())
}

/// Gauge percent from a ratio, clamped to `0..=100`.
pub(crate) fn percent(ratio: f64) -> u16 {
    if ratio.is_finite() {
        (ratio * 100.0).round().clamp(0.0, 100.0) as u16
    } else {
        0
    }
}
