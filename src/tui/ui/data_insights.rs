//! Data insights view: Training dataset statistics.

use std::collections::BTreeMap;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{DataStats, FEATURE_DESCRIPTIONS};
use crate::tui::styles::Theme;

use super::{
    key_hints, panel, percent, render_error_panel, render_footer, render_header,
    render_placeholder,
};

#[derive(Debug, Default)]
pub struct DataInsightsState {
    pub stats: Option<DataStats>,
    pub error: Option<String>,
}

pub fn render_data_insights(f: &mut Frame, area: Rect, state: &DataInsightsState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(f, chunks[0], "Data Insights", "Cardiovascular disease dataset");

    match (&state.stats, &state.error) {
        (_, Some(err)) => render_error_panel(f, chunks[1], "Cannot Load Statistics", err),
        (Some(stats), None) => render_stats(f, chunks[1], stats),
        (None, None) => render_placeholder(f, chunks[1], "Loading statistics..."),
    }

    render_footer(f, chunks[2], key_hints(&[("R", "Refresh"), ("Esc", "Back")]));
}

fn render_stats(f: &mut Frame, area: Rect, stats: &DataStats) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .margin(1)
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(distribution_height(&stats.target_distribution)),
            Constraint::Min(0),
        ])
        .split(columns[0]);

    render_summary(f, left[0], stats);
    render_distribution(f, left[1], "Target Distribution", &stats.target_distribution, stats, |key| {
        if key == "No Disease" {
            Theme::success()
        } else {
            Theme::danger()
        }
    });
    render_distribution(
        f,
        left[2],
        "Gender Distribution",
        &stats.feature_stats.gender_distribution,
        stats,
        |_| Theme::info(),
    );

    render_feature_descriptions(f, columns[1]);
}

fn distribution_height(entries: &BTreeMap<String, u64>) -> u16 {
    u16::try_from(entries.len().max(1) * 2 + 2).unwrap_or(u16::MAX)
}

fn render_summary(f: &mut Frame, area: Rect, stats: &DataStats) {
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {label}: "), Theme::text_secondary()),
            Span::styled(value, Theme::text()),
        ])
    };

    let fs = &stats.feature_stats;
    let lines = vec![
        row("Total Samples", stats.total_samples.to_string()),
        row("Features", stats.features.len().to_string()),
        row("Age Range", fs.age_range.clone().unwrap_or_else(|| "-".into())),
        row(
            "Average BMI",
            fs.avg_bmi.map_or_else(|| "-".into(), |bmi| bmi.to_string()),
        ),
    ];

    f.render_widget(Paragraph::new(lines).block(panel("Dataset Overview")), area);
}

fn render_distribution(
    f: &mut Frame,
    area: Rect,
    title: &str,
    entries: &BTreeMap<String, u64>,
    stats: &DataStats,
    style_for: impl Fn(&str) -> Style,
) {
    let block = panel(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if entries.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("  No data reported", Theme::text_muted())),
            inner,
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            entries
                .iter()
                .map(|_| Constraint::Length(2))
                .chain(std::iter::once(Constraint::Min(0)))
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (i, (key, count)) in entries.iter().enumerate() {
        let share = stats.share_of_total(*count);
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(Span::styled(format!(" {key}: {count} "), Theme::text_secondary()))
                    .borders(Borders::TOP)
                    .border_style(Theme::border()),
            )
            .gauge_style(style_for(key))
            .percent(percent(share / 100.0))
            .label(format!("{share:.1}% of total samples"));
        f.render_widget(gauge, chunks[i]);
    }
}

fn render_feature_descriptions(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = FEATURE_DESCRIPTIONS
        .iter()
        .map(|(name, description)| {
            Line::from(vec![
                Span::styled(format!("  {name:<12}"), Theme::subtitle()),
                Span::styled(*description, Theme::text_secondary()),
            ])
        })
        .collect();

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel("Feature Descriptions"));
    f.render_widget(p, area);
}
