use clap::Parser;
use deeplink_preview::server::{serve, ServerConfig};
use deeplink_preview::{setup_logging, LogConfig};
use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Serve social previews and native-app redirects for shared links.
#[derive(Debug, Parser)]
#[command(name = "deeplink-preview", version)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "DEEPLINK_PREVIEW_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Upper bound for a single oEmbed lookup
    #[arg(long, env = "DEEPLINK_PREVIEW_LOOKUP_TIMEOUT_SECS", default_value_t = 5)]
    lookup_timeout_secs: u64,

    #[arg(long, env = "DEEPLINK_PREVIEW_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[arg(long, env = "DEEPLINK_PREVIEW_LOG_DIR", default_value = "logs")]
    log_dir: PathBuf,

    /// Log to the console only
    #[arg(long)]
    no_file_log: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    setup_logging(LogConfig {
        log_dir: cli.log_dir,
        log_level: cli.log_level,
        console_output: true,
        file_output: !cli.no_file_log,
    })?;

    let config = ServerConfig::default()
        .with_bind_addr(cli.bind)
        .with_lookup_timeout(Duration::from_secs(cli.lookup_timeout_secs));

    serve(config).await
}
