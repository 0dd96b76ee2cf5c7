//! Home view: Backend status and quick actions.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::domain::{HealthStatus, RiskLevel};
use crate::tui::styles::{Theme, LOGO};

use super::{key_hints, panel, render_header};

/// Summary of the last successful prediction. Holds no form values.
#[derive(Debug, Clone)]
pub struct LastPrediction {
    pub risk_level: String,
    pub received_at: DateTime<Utc>,
}

/// Home screen state.
#[derive(Debug, Default)]
pub struct HomeState {
    pub api_url: String,
    pub health: Option<Result<HealthStatus, String>>,
    pub last_prediction: Option<LastPrediction>,
}

pub fn render_home(f: &mut Frame, area: Rect, state: &HomeState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(
        f,
        chunks[0],
        "CardioGuard",
        "Cardiovascular Disease Risk Prediction",
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_status_panels(f, columns[0], state);
    render_intro(f, columns[1]);
}

fn render_status_panels(f: &mut Frame, area: Rect, state: &HomeState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Backend
            Constraint::Length(4), // Last prediction
            Constraint::Min(0),    // Actions
        ])
        .margin(1)
        .split(area);

    let mut status = vec![Line::from(vec![
        Span::styled("  API: ", Theme::text_secondary()),
        Span::styled(state.api_url.clone(), Theme::text()),
    ])];
    match &state.health {
        None => status.push(Line::from(Span::styled(
            "  Status unknown (press [H])",
            Theme::text_muted(),
        ))),
        Some(Ok(health)) => {
            status.push(status_item(
                &format!("Backend {}", health.status),
                health.status == "healthy",
            ));
            status.push(status_item("Model loaded", health.model_loaded));
            status.push(status_item("Scaler loaded", health.scaler_loaded));
        }
        Some(Err(message)) => {
            status.push(status_item("Backend reachable", false));
            status.push(Line::from(Span::styled(
                format!("  {message}"),
                Theme::text_muted(),
            )));
        }
    }
    f.render_widget(Paragraph::new(status).block(panel("Backend Status")), chunks[0]);

    let last = match &state.last_prediction {
        Some(last) => Line::from(vec![
            Span::styled("  ", Theme::text()),
            Span::styled(
                last.risk_level.clone(),
                Theme::risk_level(RiskLevel::from_label(&last.risk_level)),
            ),
            Span::styled(
                format!(
                    " at {}",
                    last.received_at.with_timezone(&Local).format("%H:%M:%S")
                ),
                Theme::text_muted(),
            ),
        ]),
        None => Line::from(Span::styled(
            "  None yet. Press [P] to start.",
            Theme::text_muted(),
        )),
    };
    f.render_widget(Paragraph::new(last).block(panel("Last Prediction")), chunks[1]);

    let actions = vec![
        key_hints(&[("P", "New Prediction")]),
        key_hints(&[("M", "Model Info")]),
        key_hints(&[("D", "Data Insights")]),
        key_hints(&[("I", "Disclaimer")]),
        key_hints(&[("H", "Check Backend")]),
        key_hints(&[("Q", "Quit")]),
    ];
    f.render_widget(Paragraph::new(actions).block(panel("Quick Actions")), chunks[2]);
}

fn status_item(label: &str, ok: bool) -> Line<'static> {
    let (icon, style) = if ok {
        ("OK", Theme::success())
    } else {
        ("FAIL", Theme::danger())
    };

    Line::from(vec![
        Span::styled(format!("  {icon} "), style),
        Span::styled(label.to_string(), Theme::text()),
    ])
}

fn render_intro(f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = LOGO
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Theme::subtitle())))
        .collect();
    lines.extend([
        Line::from(""),
        Line::from(Span::styled(
            "Estimate cardiovascular disease risk from eleven health",
            Theme::text_secondary(),
        )),
        Line::from(Span::styled(
            "indicators using a machine learning model.",
            Theme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "BMI is calculated from height and weight as you type.",
            Theme::text_muted(),
        )),
    ]);

    let intro = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(panel("About"));
    f.render_widget(intro, area);
}
