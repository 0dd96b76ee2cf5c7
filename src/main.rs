//! CardioGuard: Cardiovascular disease risk prediction client.
//!
//! Main entry point for the terminal application.

use std::io::IsTerminal;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardioguard::adapters::sanitize::SanitizingMakeWriter;
use cardioguard::tui::App;
use cardioguard::ClientConfig;

/// Terminal client for the cardiovascular risk prediction service.
#[derive(Debug, Parser)]
#[command(name = "cardioguard", version, about)]
struct Cli {
    /// Backend base URL (overrides CARDIOGUARD_API_URL)
    #[arg(long = "api-url")]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides CARDIOGUARD_HTTP_TIMEOUT_SECS)
    #[arg(long = "timeout-secs", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
}

impl Cli {
    /// Environment and defaults first, then flags on top.
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::from_env()?;
        if let Some(url) = &self.api_url {
            config = config.with_base_url(url)?;
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs on the terminal would corrupt the TUI's alternate screen:
    // - interactive TTY: log to a file
    // - non-interactive: log to stdout
    let log_mode = std::env::var("CARDIOGUARD_LOG_MODE").unwrap_or_else(|_| "auto".to_string());

    let interactive = std::io::stdout().is_terminal();
    let use_file = match log_mode.as_str() {
        "file" => true,
        "stdout" => false,
        _ => interactive,
    };

    let (writer, _guard) = if use_file {
        let log_file = std::env::var("CARDIOGUARD_LOG_FILE")
            .unwrap_or_else(|_| "cardioguard.log".to_string());

        if let Some(parent) = std::path::Path::new(&log_file).parent() {
            // Best-effort; the open below reports the real failure.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .with_context(|| format!("cannot open log file {log_file}"))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    let config = cli.client_config()?;
    tracing::info!(
        api_url = config.base_url(),
        timeout_secs = config.timeout.as_secs(),
        "Starting CardioGuard"
    );

    let mut app = App::new(config)?;
    app.run()?;

    tracing::info!("CardioGuard shutdown complete.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "cardioguard",
            "--api-url",
            "http://10.0.0.5:9000/",
            "--timeout-secs",
            "3",
        ])
        .expect("parse");
        let config = cli.client_config().expect("config");
        assert_eq!(config.base_url(), "http://10.0.0.5:9000");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        assert!(Cli::try_parse_from(["cardioguard", "--timeout-secs", "0"]).is_err());
    }

    #[test]
    fn test_rejects_bad_url() {
        let cli = Cli::try_parse_from(["cardioguard", "--api-url", "localhost:8000"]).expect("parse");
        assert!(cli.client_config().is_err());
    }
}
