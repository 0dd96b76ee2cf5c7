//! Model information view: Metadata, hyperparameters and evaluation metrics.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table},
    Frame,
};

use crate::application::ModelOverview;
use crate::domain::{format_parameter, humanize_key, ModelInfo, ModelMetrics};
use crate::tui::styles::Theme;

use super::{
    key_hints, panel, percent, render_error_panel, render_footer, render_header,
    render_placeholder,
};

#[derive(Debug, Default)]
pub struct ModelInfoState {
    pub overview: Option<ModelOverview>,
    pub error: Option<String>,
}

pub fn render_model_info(f: &mut Frame, area: Rect, state: &ModelInfoState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(f, chunks[0], "Model Information", "How the prediction model works");

    match (&state.overview, &state.error) {
        (_, Some(err)) => render_error_panel(f, chunks[1], "Cannot Load Model Information", err),
        (Some(overview), None) => render_overview(f, chunks[1], overview),
        (None, None) => render_placeholder(f, chunks[1], "Loading model information..."),
    }

    render_footer(f, chunks[2], key_hints(&[("R", "Refresh"), ("Esc", "Back")]));
}

fn render_overview(f: &mut Frame, area: Rect, overview: &ModelOverview) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .margin(1)
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(columns[0]);

    render_summary(f, left[0], &overview.info);
    render_parameters(f, left[1], &overview.info);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(12), Constraint::Length(7)])
        .split(columns[1]);

    render_metrics(f, right[0], &overview.metrics);
    render_confusion_matrix(f, right[1], &overview.metrics);
}

fn render_summary(f: &mut Frame, area: Rect, info: &ModelInfo) {
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {label}: "), Theme::text_secondary()),
            Span::styled(value, Theme::text()),
        ])
    };

    let lines = vec![
        row("Algorithm", info.model_type.clone()),
        row("Training Samples", info.training_samples.to_string()),
        row("Test Samples", info.test_samples.to_string()),
        row("Features", info.features.len().to_string()),
    ];

    f.render_widget(Paragraph::new(lines).block(panel("Model Overview")), area);
}

fn render_parameters(f: &mut Frame, area: Rect, info: &ModelInfo) {
    let lines: Vec<Line> = if info.parameters.is_empty() {
        vec![Line::from(Span::styled("  No parameters reported", Theme::text_muted()))]
    } else {
        info.parameters
            .iter()
            .map(|(key, value)| {
                Line::from(vec![
                    Span::styled(format!("  {}: ", humanize_key(key)), Theme::text_secondary()),
                    Span::styled(format_parameter(value), Theme::text()),
                ])
            })
            .collect()
    };

    f.render_widget(Paragraph::new(lines).block(panel("Hyperparameters")), area);
}

fn render_metrics(f: &mut Frame, area: Rect, metrics: &ModelMetrics) {
    let block = panel("Performance Metrics");
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Accuracies arrive as percentages, the rest as ratios.
    let gauges = [
        ("Test Accuracy", metrics.test_accuracy / 100.0),
        ("Train Accuracy", metrics.train_accuracy / 100.0),
        ("Precision", metrics.precision),
        ("Recall", metrics.recall),
        ("F1-Score", metrics.f1_score),
    ];

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            gauges
                .iter()
                .map(|_| Constraint::Length(2))
                .chain(std::iter::once(Constraint::Min(0)))
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (i, (label, ratio)) in gauges.iter().enumerate() {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(Span::styled(format!(" {label} "), Theme::text_secondary()))
                    .borders(Borders::TOP)
                    .border_style(Theme::border()),
            )
            .gauge_style(Theme::score_gauge(*ratio))
            .percent(percent(*ratio))
            .label(format!("{:.2}%", ratio * 100.0));
        f.render_widget(gauge, chunks[i]);
    }
}

fn render_confusion_matrix(f: &mut Frame, area: Rect, metrics: &ModelMetrics) {
    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Predicted: No Disease"),
        Cell::from("Predicted: Has Disease"),
    ])
    .style(Theme::text_secondary().add_modifier(Modifier::BOLD));

    let rows = vec![
        Row::new(vec![
            Cell::from("Actual: No Disease").style(Theme::text_secondary()),
            Cell::from(metrics.true_negatives().to_string()).style(Theme::success()),
            Cell::from(metrics.false_positives().to_string()).style(Theme::danger()),
        ]),
        Row::new(vec![
            Cell::from("Actual: Has Disease").style(Theme::text_secondary()),
            Cell::from(metrics.false_negatives().to_string()).style(Theme::danger()),
            Cell::from(metrics.true_positives().to_string()).style(Theme::success()),
        ]),
    ];

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(23),
            Constraint::Length(23),
        ],
    )
    .header(header)
    .block(panel("Confusion Matrix"));

    f.render_widget(table, area);
}
