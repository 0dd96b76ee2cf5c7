//! Static disclaimer page.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::Theme;

use super::{key_hints, panel, render_footer, render_header};

const SECTIONS: &[(&str, &[&str])] = &[
    (
        "Medical Disclaimer",
        &[
            "This prediction system is for educational and research purposes only.",
            "It is not a substitute for professional medical advice, diagnosis or treatment.",
            "Always ask a physician or other qualified health provider about any medical condition.",
        ],
    ),
    (
        "Model Limitations",
        &[
            "• Test accuracy is about 73%, so roughly one prediction in four may be wrong.",
            "• The model was trained on one dataset and may not generalize to every population.",
            "• Predictions reflect statistical patterns and are not medical diagnoses.",
        ],
    ),
    (
        "Data Privacy",
        &[
            "Entered values are sent to the prediction service only to compute a result.",
            "This client keeps no history and wipes form values on reset and exit.",
        ],
    ),
    (
        "Recommendations",
        &[
            "1. See a healthcare professional for a proper evaluation.",
            "2. Get comprehensive testing (ECG, blood tests).",
            "3. Keep a healthy lifestyle: exercise, balanced diet, stress management.",
            "4. Monitor your health metrics over time.",
        ],
    ),
    (
        "Emergency Notice",
        &[
            "Chest pain, shortness of breath, severe headache or sudden numbness need emergency",
            "services immediately. Do not rely on this system in an emergency.",
        ],
    ),
];

pub fn render_disclaimer_page(f: &mut Frame, area: Rect, scroll: u16) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(
        f,
        chunks[0],
        "Disclaimer",
        "Important information about using this system",
    );

    let mut lines = Vec::new();
    for (title, body) in SECTIONS {
        let style = if *title == "Emergency Notice" {
            Theme::danger()
        } else {
            Theme::subtitle()
        };
        lines.push(Line::from(Span::styled(*title, style)));
        lines.extend(
            body.iter()
                .map(|text| Line::from(Span::styled(format!("  {text}"), Theme::text()))),
        );
        lines.push(Line::from(""));
    }

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(panel("Please Read"));
    f.render_widget(p, chunks[1]);

    render_footer(f, chunks[2], key_hints(&[("↑↓", "Scroll"), ("Esc", "Back")]));
}
