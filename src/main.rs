use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use keepup::config::ServerConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keepup")]
#[command(version, about = "Package version freshness and EOL tracking service")]
struct Cli {
    #[command(flatten)]
    server: ServerConfig,

    /// Write logs to this file instead of stderr
    #[arg(long, env = "KEEPUP_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = init_logging(cli.log_file.as_deref(), cli.log_json)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(keepup::http::server::run_server(cli.server))
}

/// Initialize tracing. RUST_LOG overrides the default `keepup=info` filter.
fn init_logging(log_file: Option<&Path>, json: bool) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {:?}", path))?;
            std::fs::create_dir_all(dir)?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("keepup=info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(log_file.is_none());

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(guard)
}
