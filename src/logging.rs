use std::fs;

use anyhow::Context;
use keystone_config::LoggingConfig;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "keystone={level},keystone_planning={level},keystone_db={level},sqlx=warn"
        ))
    })
}

/// Install the global tracing subscriber.
///
/// Logs go to the console and, when enabled, to a daily rolling JSON file in
/// `config.log_dir`. `RUST_LOG` overrides the configured level. Fails when a
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(default_filter(&config.level));

    let json_layer = if config.json_file {
        fs::create_dir_all(&config.log_dir).with_context(|| {
            format!("Failed to create log directory {}", config.log_dir.display())
        })?;

        let json_appender =
            RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "keystone.json");

        Some(
            fmt::layer()
                .json()
                .with_writer(json_appender)
                .with_current_span(true)
                .with_span_list(true)
                .with_filter(default_filter(&config.level)),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    info!(
        level = %config.level,
        json_file = config.json_file,
        "Tracing initialized"
    );

    Ok(())
}
