//! Vision Chat - terminal client for an AI assistant backend
//!
//! Holds a single conversation with a remote assistant that answers text
//! messages and analyzes uploaded images.

mod config;
mod repl;
mod runtime;
mod session;
mod transport;

use config::ClientConfig;
use repl::{Repl, TerminalImages};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transport::{HttpTransport, LoggingTransport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never mix with the transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vision_chat=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(
        backend = %config.backend_url,
        timeout_secs = config.request_timeout.as_secs(),
        "Starting vision chat"
    );

    let transport = Arc::new(LoggingTransport::new(HttpTransport::new(&config)?));
    let session = runtime::spawn_session(Arc::clone(&transport), Arc::new(TerminalImages));

    Repl::new(session, transport).run().await?;
    Ok(())
}
