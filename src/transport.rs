//! Backend transport abstraction
//!
//! Provides a common interface for reaching the assistant backend, plus the
//! HTTP implementation used in production.

mod error;
mod http;
mod types;

pub use error::TransportFailure;
pub use http::HttpTransport;
pub use types::{ChatReply, HealthStatus};

use crate::session::{Attachment, OutboundRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for the assistant backend
#[async_trait]
pub trait TransportClient: Send + Sync {
    /// Send a text-only message
    async fn send_text(&self, message: &str) -> Result<ChatReply, TransportFailure>;

    /// Send an image with an optional caption
    async fn send_image(
        &self,
        attachment: &Attachment,
        caption: Option<&str>,
    ) -> Result<ChatReply, TransportFailure>;

    /// Ask the backend whether it is up
    async fn health(&self) -> Result<HealthStatus, TransportFailure>;

    /// Base address of the backend
    fn endpoint(&self) -> &str;

    /// Send a built request through the matching endpoint
    async fn send(&self, request: &OutboundRequest) -> Result<ChatReply, TransportFailure> {
        match request {
            OutboundRequest::Text { body } => self.send_text(&body.message).await,
            OutboundRequest::Image {
                attachment,
                caption,
            } => self.send_image(attachment, caption.as_deref()).await,
        }
    }
}

#[async_trait]
impl<T: TransportClient + ?Sized> TransportClient for Arc<T> {
    async fn send_text(&self, message: &str) -> Result<ChatReply, TransportFailure> {
        (**self).send_text(message).await
    }

    async fn send_image(
        &self,
        attachment: &Attachment,
        caption: Option<&str>,
    ) -> Result<ChatReply, TransportFailure> {
        (**self).send_image(attachment, caption).await
    }

    async fn health(&self) -> Result<HealthStatus, TransportFailure> {
        (**self).health().await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

/// Logging wrapper for transports
pub struct LoggingTransport<T> {
    inner: T,
}

impl<T: TransportClient> LoggingTransport<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    fn log_outcome<R>(&self, kind: &str, start: std::time::Instant, result: &Result<R, TransportFailure>) {
        let duration = start.elapsed();
        match result {
            Ok(_) => {
                tracing::info!(
                    endpoint = %self.inner.endpoint(),
                    kind = kind,
                    duration_ms = %duration.as_millis(),
                    "Backend request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.inner.endpoint(),
                    kind = kind,
                    duration_ms = %duration.as_millis(),
                    failure = e.kind(),
                    error = %e,
                    "Backend request failed"
                );
            }
        }
    }
}

#[async_trait]
impl<T: TransportClient> TransportClient for LoggingTransport<T> {
    async fn send_text(&self, message: &str) -> Result<ChatReply, TransportFailure> {
        let start = std::time::Instant::now();
        let result = self.inner.send_text(message).await;
        self.log_outcome("text", start, &result);
        result
    }

    async fn send_image(
        &self,
        attachment: &Attachment,
        caption: Option<&str>,
    ) -> Result<ChatReply, TransportFailure> {
        tracing::debug!(
            name = %attachment.name(),
            mime_type = %attachment.mime_type(),
            bytes = attachment.byte_size(),
            has_caption = caption.is_some(),
            "Sending image"
        );
        let start = std::time::Instant::now();
        let result = self.inner.send_image(attachment, caption).await;
        self.log_outcome("image", start, &result);
        result
    }

    async fn health(&self) -> Result<HealthStatus, TransportFailure> {
        let start = std::time::Instant::now();
        let result = self.inner.health().await;
        self.log_outcome("health", start, &result);
        result
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}
