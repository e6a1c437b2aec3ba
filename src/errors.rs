use crate::data_models::ContactResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read configuration: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error(transparent)]
    ConfigurationError(#[from] ConfigurationError),
    #[error("socket address parsing error: {0}")]
    SocketAddressParsingError(#[from] std::net::AddrParseError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("{0} is not a supported environment. Use either `dev` or `prod`.")]
    UnknownEnvironment(String),
    #[error("processing delay of {0:?} is longer than allowed")]
    ProcessingDelayTooLong(Duration),
}

/// Every way a contact submission can end other than acceptance.
///
/// The `Display` text is the exact message sent back to the caller, so it
/// must stay a fixed string and never include submitted content.
#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Content-Type must be application/json")]
    UnsupportedContentType,
    #[error("Missing required fields (name, email, message)")]
    MissingFields,
    #[error("Invalid data types for fields.")]
    InvalidDataTypes,
    #[error("Invalid email format.")]
    InvalidEmail,
    #[error("An error occurred while processing your request.")]
    UnreadableBody(#[from] axum::Error),
    #[error("An error occurred while processing your request.")]
    MalformedBody(#[from] serde_json::Error),
    #[error("An error occurred while processing your request.")]
    NullBody,
}

impl ContactError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContactError::UnsupportedContentType
            | ContactError::MissingFields
            | ContactError::InvalidDataTypes
            | ContactError::InvalidEmail => StatusCode::BAD_REQUEST,
            ContactError::UnreadableBody(_)
            | ContactError::MalformedBody(_)
            | ContactError::NullBody => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ContactError::UnreadableBody(err) => {
                error!(error = %err, "failed to read contact form body")
            }
            ContactError::MalformedBody(err) => {
                error!(error = %err, "failed to parse contact form body")
            }
            ContactError::NullBody => error!("contact form body is null"),
            rejected => warn!(reason = %rejected, "contact form submission rejected"),
        }
        (status, Json(ContactResponse::new(self.to_string()))).into_response()
    }
}
