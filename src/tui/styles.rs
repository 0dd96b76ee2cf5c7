//! Color palette and preset styles for the terminal UI.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::RiskLevel;

/// Color palette and preset styles.
pub struct Theme;

impl Theme {
    pub const ACCENT: Color = Color::Rgb(225, 29, 72); // #E11D48
    pub const ACCENT_LIGHT: Color = Color::Rgb(251, 113, 133); // #FB7185

    pub const BORDER: Color = Color::Rgb(148, 163, 184); // #94A3B8

    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E
    pub const INFO: Color = Color::Rgb(59, 130, 246); // #3B82F6

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::ACCENT_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::ACCENT_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Style for a server risk label. Unrecognized labels get the high-risk
    /// style.
    #[must_use]
    pub fn risk_level(level: Option<RiskLevel>) -> Style {
        let (r, g, b) = level.unwrap_or(RiskLevel::High).color();
        Style::default().fg(Color::Rgb(r, g, b))
    }

    /// Gauge style for a model score (higher is better).
    #[must_use]
    pub fn score_gauge(ratio: f64) -> Style {
        if ratio >= 0.7 {
            Self::success()
        } else if ratio >= 0.5 {
            Self::warning()
        } else {
            Self::danger()
        }
    }
}

/// ASCII art logo for CardioGuard
pub const LOGO: &str = r#"
╔═╗┌─┐┬─┐┌┬┐┬┌─┐╔═╗┬ ┬┌─┐┬─┐┌┬┐
║  ├─┤├┬┘ ││││ │║ ╦│ │├─┤├┬┘ ││
╚═╝┴ ┴┴└──┴┘┴└─┘╚═╝└─┘┴ ┴┴└──┴┘
"#;
