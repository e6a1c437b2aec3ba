use crate::data_models::SubmissionPayload;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use url::Url;

pub const CONTACT_PATH: &str = "/api/contact";

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("failed to build contact endpoint: {0}")]
    UrlParsingError(#[from] url::ParseError),
    #[error("server replied with a null body")]
    NullBody,
}

/// What came back from the server, before the form interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub message: Option<String>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Delivers one submission. An `Err` means no response was obtained.
#[async_trait]
pub trait ContactTransport: Send + Sync {
    async fn send(&self, payload: &SubmissionPayload)
        -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(base_url: &Url) -> Result<Self, TransportError> {
        Ok(Self {
            client: Client::new(),
            endpoint: base_url.join(CONTACT_PATH)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ContactTransport for HttpTransport {
    async fn send(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body: Value = response.json().await?;
        if body.is_null() {
            return Err(TransportError::NullBody);
        }
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned);
        Ok(TransportResponse { status, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_is_joined_to_base() {
        let base = Url::parse("http://localhost:8000/blog/post").unwrap();
        let transport = HttpTransport::new(&base).unwrap();
        assert_eq!(
            transport.endpoint().as_str(),
            "http://localhost:8000/api/contact"
        );
    }

    #[test]
    fn test_success_range() {
        let response = |status| TransportResponse {
            status,
            message: None,
        };
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(302).is_success());
        assert!(!response(400).is_success());
        assert!(!response(500).is_success());
    }
}
