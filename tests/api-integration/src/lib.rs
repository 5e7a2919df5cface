//! In-process HTTP harness for the form-submission API.
//!
//! Each test gets its own server on an ephemeral port with tempdir-backed
//! state and no email or spreadsheet configuration, so tests double as the
//! "notifications unconfigured" scenario.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use tempfile::TempDir;

use vivaah_common::store::SubmissionStore;
use vivaah_server::{app, AppState};

pub struct TestServer {
    pub base_url: String,
    /// Held so the directories outlive the server.
    pub data_dir: TempDir,
    pub static_dir: TempDir,
}

impl TestServer {
    pub async fn start() -> Self {
        let data_dir = TempDir::new().expect("failed to create data tempdir");
        let static_dir = TempDir::new().expect("failed to create static tempdir");
        std::fs::write(
            static_dir.path().join("index.html"),
            "<html><body>wedding site</body></html>",
        )
        .expect("failed to write index.html");

        let store = SubmissionStore::new(data_dir.path());
        store.ensure_dir().await.expect("failed to create data dir");

        let state = Arc::new(AppState {
            store,
            mailer: None,
            sheets: None,
            started: Instant::now(),
        });
        let app = app(state, static_dir.path());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test listener");
        let addr = listener.local_addr().expect("listener address");
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("test server failed");
        });

        TestServer {
            base_url: format!("http://{addr}"),
            data_dir,
            static_dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
