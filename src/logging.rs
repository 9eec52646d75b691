use crate::utils::{or_na, truncate_str};
use crate::LinkPreview;
use tracing::info;

#[cfg(feature = "logging")]
pub use subscriber::{setup_logging, LogConfig, LogLevelGuard};

const CARD_WIDTH: usize = 80;
/// Longest value printed per field; oEmbed titles can be arbitrarily long.
const MAX_FIELD_WIDTH: usize = 160;

fn wrap_text(text: &str, width: usize) -> String {
    let mut wrapped = String::new();
    let mut line_length = 0;

    for word in text.split_whitespace() {
        if line_length + word.len() + 1 > width {
            wrapped.push('\n');
            wrapped.push_str("  ");
            wrapped.push_str(word);
            line_length = word.len() + 2;
        } else {
            if line_length > 0 {
                wrapped.push(' ');
                line_length += 1;
            }
            wrapped.push_str(word);
            line_length += word.len();
        }
    }
    wrapped
}

fn card_field(label: &str, value: &str) -> String {
    let width = CARD_WIDTH - 2 - label.len() - 2;
    let value = truncate_str(or_na(value), MAX_FIELD_WIDTH);
    format!("{label}: {}", wrap_text(&value, width))
}

/// Logs the resolved preview and redirect destination as a boxed card.
pub fn log_preview_card(preview: &LinkPreview, destination: Option<&str>) {
    let border = "═".repeat(CARD_WIDTH - 2);
    let fields = [
        card_field("URL", &preview.source_url),
        card_field("Title", &preview.title),
        card_field("Desc", &preview.description),
        card_field("Image", &preview.image),
        card_field("Dest", destination.unwrap_or_default()),
    ];

    info!("\n╔{border}╗\n{}\n╚{border}╝", fields.join("\n"));
}

#[cfg(feature = "logging")]
mod subscriber {
    use std::path::PathBuf;
    use tracing::debug;
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{
        fmt as subscriber_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
    };

    #[derive(Debug)]
    pub struct LogConfig {
        pub log_dir: PathBuf,
        pub log_level: String,
        pub console_output: bool,
        pub file_output: bool,
    }

    impl Default for LogConfig {
        fn default() -> Self {
            Self {
                log_dir: "logs".into(),
                log_level: "info".into(),
                console_output: true,
                file_output: true,
            }
        }
    }

    /// Installs the global subscriber. `RUST_LOG` overrides `log_level`.
    pub fn setup_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

        let console_layer = config
            .console_output
            .then(|| subscriber_fmt::layer().with_target(true).pretty());

        let file_layer = if config.file_output {
            std::fs::create_dir_all(&config.log_dir)?;
            let appender =
                RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "deeplink-preview.log");
            Some(
                subscriber_fmt::layer()
                    .with_ansi(false)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_writer(appender),
            )
        } else {
            None
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()?;

        debug!(?config, "Logging initialized");
        Ok(())
    }

    /// Scoped subscriber for tests; the previous default returns on drop.
    pub struct LogLevelGuard {
        _guard: tracing::dispatcher::DefaultGuard,
    }

    impl LogLevelGuard {
        pub fn set_level(level: &str) -> Self {
            let subscriber = tracing_subscriber::registry()
                .with(EnvFilter::new(level))
                .with(subscriber_fmt::layer().with_test_writer());

            Self {
                _guard: tracing::subscriber::set_default(subscriber),
            }
        }
    }
}
