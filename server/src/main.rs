use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vivaah_common::store::SubmissionStore;
use vivaah_server::config::ServerConfig;
use vivaah_server::mailer::Mailer;
use vivaah_server::sheets::SheetsClient;
use vivaah_server::{app, AppState};

#[derive(Parser)]
#[command(name = "vivaah-server", about = "Wedding site form-submission server")]
struct Cli {
    /// HTTP port to listen on (overrides PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Directory for submission files (overrides DATA_DIR).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory holding the built frontend (overrides STATIC_DIR).
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ServerConfig::from_env();
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(static_dir) = cli.static_dir {
        config.static_dir = static_dir;
    }

    let store = SubmissionStore::new(&config.data_dir);
    store
        .ensure_dir()
        .await
        .context("failed to create data directory")?;

    let mailer = match &config.smtp {
        Some(smtp) => Some(Arc::new(
            Mailer::from_config(smtp).context("invalid SMTP configuration")?,
        )),
        None => None,
    };
    let sheets = config
        .sheets
        .as_ref()
        .map(|cfg| Arc::new(SheetsClient::from_config(cfg)));

    // Provision the spreadsheet up front so the first submission doesn't pay
    // for it; failures only mean the mirror is skipped, never fatal.
    match sheets.clone() {
        Some(sheets) => {
            tokio::spawn(async move {
                match sheets.initialize().await {
                    Ok(()) => tracing::info!("Google Sheets initialized"),
                    Err(err) => tracing::warn!(
                        %err,
                        "Google Sheets initialization failed; submissions are still saved locally"
                    ),
                }
            });
        }
        None => tracing::info!("Google Sheets not configured; submissions are saved locally only"),
    }

    if config.smtp.is_none() {
        tracing::info!("email notifications not configured");
    }

    let state = Arc::new(AppState {
        store,
        mailer,
        sheets,
        started: Instant::now(),
    });
    let app = app(state, &config.static_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        %addr,
        data_dir = %config.data_dir.display(),
        "form submission server running"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server failed")?;
    Ok(())
}
