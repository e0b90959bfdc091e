//! HTTP transport for the assistant backend

use super::types::{ChatReply, ErrorBody, HealthStatus};
use super::{TransportClient, TransportFailure};
use crate::config::ClientConfig;
use crate::session::request::{
    TextChatBody, CAPTION_FIELD, FILE_FIELD, IMAGE_CHAT_PATH, TEXT_CHAT_PATH,
};
use crate::session::Attachment;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

const HEALTH_PATH: &str = "/health";

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.backend_url.clone(),
            timeout: config.request_timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a reqwest error onto the failure taxonomy
    fn classify(&self, e: &reqwest::Error) -> TransportFailure {
        if e.is_timeout() {
            TransportFailure::TimedOut {
                endpoint: self.base_url.clone(),
                timeout: self.timeout,
            }
        } else if e.is_builder() {
            TransportFailure::InvalidRequest(e.to_string())
        } else {
            tracing::debug!(error = %e, "Backend unreachable");
            TransportFailure::Unreachable {
                endpoint: self.base_url.clone(),
            }
        }
    }

    async fn read_json<R: DeserializeOwned>(&self, response: Response) -> Result<R, TransportFailure> {
        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(&e))?;

        if !status.is_success() {
            let detail = ErrorBody::detail_from(&body);
            tracing::debug!(status = status.as_u16(), detail = %detail, "Backend returned error status");
            return Err(TransportFailure::from_status(status.as_u16(), detail));
        }

        serde_json::from_str(&body).map_err(|e| TransportFailure::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl TransportClient for HttpTransport {
    async fn send_text(&self, message: &str) -> Result<ChatReply, TransportFailure> {
        let body = TextChatBody {
            message: message.to_string(),
        };
        let response = self
            .client
            .post(self.url(TEXT_CHAT_PATH))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        self.read_json(response).await
    }

    async fn send_image(
        &self,
        attachment: &Attachment,
        caption: Option<&str>,
    ) -> Result<ChatReply, TransportFailure> {
        let file = Part::stream_with_length(attachment.bytes().clone(), attachment.byte_size())
            .file_name(attachment.name().to_string())
            .mime_str(attachment.mime_type())
            .map_err(|e| TransportFailure::InvalidRequest(e.to_string()))?;

        let mut form = Form::new().part(FILE_FIELD, file);
        if let Some(caption) = caption {
            form = form.text(CAPTION_FIELD, caption.to_string());
        }

        let response = self
            .client
            .post(self.url(IMAGE_CHAT_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        let reply: ChatReply = self.read_json(response).await?;
        tracing::debug!(filename = ?reply.filename, image_info = ?reply.image_info, "Image analysed");
        Ok(reply)
    }

    async fn health(&self) -> Result<HealthStatus, TransportFailure> {
        let response = self
            .client
            .get(self.url(HEALTH_PATH))
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        self.read_json(response).await
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}
