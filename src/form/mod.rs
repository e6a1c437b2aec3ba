//! Client-side contact form: field state, inline errors and the outcome of
//! the last submission.

mod transport;

use crate::data_models::SubmissionPayload;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::{debug, error, warn};
use validator::Validate;

pub use transport::{ContactTransport, HttpTransport, TransportError, TransportResponse};

pub const INVALID_FORM_MESSAGE: &str = "Please correct the errors below.";
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to send message. Please try again.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";
pub const PENDING_MESSAGE: &str = "Submitting...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field `{0}`")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Field::Name),
            "email" => Ok(Field::Email),
            "message" => Ok(Field::Message),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Inline messages shown under invalid inputs.
pub type FieldErrors = BTreeMap<Field, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    NotSubmitted,
    Pending,
    Succeeded(String),
    Failed(String),
}

impl SubmissionStatus {
    /// Banner text, if the status has anything to show.
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionStatus::NotSubmitted => None,
            SubmissionStatus::Pending => Some(PENDING_MESSAGE),
            SubmissionStatus::Succeeded(message) | SubmissionStatus::Failed(message) => {
                Some(message)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionStatus::Succeeded(_))
    }
}

fn non_empty_or(message: Option<String>, default: &str) -> String {
    message
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[derive(Debug, Default)]
pub struct ContactForm {
    payload: SubmissionPayload,
    errors: FieldErrors,
    status: SubmissionStatus,
    is_submitting: bool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.payload.name,
            Field::Email => &self.payload.email,
            Field::Message => &self.payload.message,
        }
    }

    pub fn payload(&self) -> &SubmissionPayload {
        &self.payload
    }

    /// Sets one field and drops that field's error, leaving the others alone.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.payload.name = value,
            Field::Email => self.payload.email = value,
            Field::Message => self.payload.message = value,
        }
        self.errors.remove(&field);
    }

    /// Recomputes all field errors and reports whether there are none.
    pub fn validate(&mut self) -> bool {
        self.errors = match self.payload.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => {
                let by_field = errors.field_errors();
                Field::ALL
                    .into_iter()
                    .filter_map(|field| {
                        let message = by_field
                            .get(field.key())?
                            .first()?
                            .message
                            .as_ref()?
                            .to_string();
                        Some((field, message))
                    })
                    .collect()
            }
        };
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting {
            "Sending..."
        } else {
            "Send Message"
        }
    }

    /// Validates locally and, when the form is clean, sends exactly one
    /// request through `transport`. Nothing is sent for an invalid form or
    /// while another submission is in flight.
    pub async fn submit<T>(&mut self, transport: &T) -> &SubmissionStatus
    where
        T: ContactTransport + ?Sized,
    {
        if self.is_submitting {
            debug!("submission already in flight, ignoring submit");
            return &self.status;
        }
        if !self.validate() {
            self.status = SubmissionStatus::Failed(INVALID_FORM_MESSAGE.to_string());
            return &self.status;
        }

        let in_flight = InFlight::start(&mut self.is_submitting, &mut self.status);
        let outcome = transport.send(&self.payload).await;
        in_flight.settle(resolve(outcome, &mut self.payload));
        &self.status
    }
}

/// Holds the in-flight flag for one request. Dropping it, whether the
/// request finished or the `submit` future was abandoned, clears the flag.
struct InFlight<'a> {
    flag: &'a mut bool,
    status: &'a mut SubmissionStatus,
}

impl<'a> InFlight<'a> {
    fn start(flag: &'a mut bool, status: &'a mut SubmissionStatus) -> Self {
        *flag = true;
        *status = SubmissionStatus::Pending;
        Self { flag, status }
    }

    fn settle(self, status: SubmissionStatus) {
        *self.status = status;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.flag = false;
        if *self.status == SubmissionStatus::Pending {
            warn!("contact form submission abandoned before a response arrived");
            *self.status = SubmissionStatus::Failed(UNEXPECTED_ERROR_MESSAGE.to_string());
        }
    }
}

fn resolve(
    outcome: Result<TransportResponse, TransportError>,
    payload: &mut SubmissionPayload,
) -> SubmissionStatus {
    match outcome {
        Ok(response) if response.is_success() => {
            *payload = SubmissionPayload::default();
            SubmissionStatus::Succeeded(non_empty_or(response.message, DEFAULT_SUCCESS_MESSAGE))
        }
        Ok(response) => {
            SubmissionStatus::Failed(non_empty_or(response.message, DEFAULT_FAILURE_MESSAGE))
        }
        Err(err) => {
            error!(error = %err, "contact form submission error");
            SubmissionStatus::Failed(UNEXPECTED_ERROR_MESSAGE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    enum Reply {
        Status(u16, Option<&'static str>),
        Unreachable,
        Hang,
    }

    struct RecordingTransport {
        reply: Reply,
        sent: Mutex<Vec<SubmissionPayload>>,
    }

    impl RecordingTransport {
        fn replying(reply: Reply) -> Self {
            Self {
                reply,
                sent: Mutex::new(vec![]),
            }
        }

        fn sent(&self) -> Vec<SubmissionPayload> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContactTransport for RecordingTransport {
        async fn send(
            &self,
            payload: &SubmissionPayload,
        ) -> Result<TransportResponse, TransportError> {
            self.sent.lock().unwrap().push(payload.clone());
            match self.reply {
                Reply::Status(status, message) => Ok(TransportResponse {
                    status,
                    message: message.map(str::to_string),
                }),
                Reply::Unreachable => {
                    Err(TransportError::UrlParsingError(url::ParseError::EmptyHost))
                }
                Reply::Hang => std::future::pending().await,
            }
        }
    }

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::new();
        form.update_field(Field::Name, "A");
        form.update_field(Field::Email, "a@b.co");
        form.update_field(Field::Message, "hi");
        form
    }

    #[test]
    fn test_validate_flags_exactly_the_blank_fields() {
        let mut form = ContactForm::new();
        form.update_field(Field::Name, "   ");
        form.update_field(Field::Email, "a@b.co");
        form.update_field(Field::Message, "");
        assert!(!form.validate());
        assert_eq!(form.error_for(Field::Name), Some("Name is required."));
        assert_eq!(form.error_for(Field::Email), None);
        assert_eq!(form.error_for(Field::Message), Some("Message is required."));
        assert_eq!(form.errors().len(), 2);
    }

    #[test]
    fn test_validate_reports_invalid_email() {
        let mut form = filled_form();
        form.update_field(Field::Email, "not-an-email");
        assert!(!form.validate());
        assert_eq!(form.error_for(Field::Email), Some("Email is invalid."));

        form.update_field(Field::Email, " ");
        assert!(!form.validate());
        assert_eq!(form.error_for(Field::Email), Some("Email is required."));
    }

    #[test]
    fn test_validate_replaces_errors_wholesale() {
        let mut form = ContactForm::new();
        assert!(!form.validate());
        assert_eq!(form.errors().len(), 3);

        form.payload.name = "A".to_string();
        form.payload.email = "a@b.co".to_string();
        form.payload.message = "hi".to_string();
        assert!(form.validate());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_update_field_clears_only_its_own_error() {
        let mut form = ContactForm::new();
        assert!(!form.validate());

        form.update_field(Field::Email, "still wrong");
        assert_eq!(form.error_for(Field::Email), None);
        assert!(form.error_for(Field::Name).is_some());
        assert!(form.error_for(Field::Message).is_some());
    }

    #[test]
    fn test_field_names_parse() {
        assert_eq!("email".parse::<Field>(), Ok(Field::Email));
        assert_eq!(
            "phone".parse::<Field>(),
            Err(UnknownField("phone".to_string()))
        );
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let transport = RecordingTransport::replying(Reply::Status(200, None));
        let mut form = ContactForm::new();
        form.update_field(Field::Name, "A");

        let status = form.submit(&transport).await.clone();

        assert_eq!(
            status,
            SubmissionStatus::Failed(INVALID_FORM_MESSAGE.to_string())
        );
        assert!(transport.sent().is_empty());
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_success_resets_fields() {
        let transport = RecordingTransport::replying(Reply::Status(
            200,
            Some("Message received successfully! We'll be in touch."),
        ));
        let mut form = filled_form();
        let expected = form.payload().clone();

        form.submit(&transport).await;

        assert_eq!(transport.sent(), vec![expected]);
        assert_eq!(
            form.status(),
            &SubmissionStatus::Succeeded(
                "Message received successfully! We'll be in touch.".to_string()
            )
        );
        for field in Field::ALL {
            assert_eq!(form.value(field), "");
        }
        assert!(!form.is_submitting());
        assert_eq!(form.submit_label(), "Send Message");
    }

    #[tokio::test]
    async fn test_success_without_message_uses_default() {
        let transport = RecordingTransport::replying(Reply::Status(200, Some("")));
        let mut form = filled_form();
        form.submit(&transport).await;
        assert_eq!(
            form.status(),
            &SubmissionStatus::Succeeded(DEFAULT_SUCCESS_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_remote_rejection_keeps_fields() {
        let transport =
            RecordingTransport::replying(Reply::Status(400, Some("Invalid email format.")));
        let mut form = filled_form();

        form.submit(&transport).await;

        assert_eq!(
            form.status(),
            &SubmissionStatus::Failed("Invalid email format.".to_string())
        );
        assert_eq!(form.value(Field::Name), "A");
        assert_eq!(form.value(Field::Email), "a@b.co");
        assert_eq!(form.value(Field::Message), "hi");
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_remote_rejection_without_message_uses_default() {
        let transport = RecordingTransport::replying(Reply::Status(503, None));
        let mut form = filled_form();
        form.submit(&transport).await;
        assert_eq!(
            form.status(),
            &SubmissionStatus::Failed(DEFAULT_FAILURE_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_fields() {
        let transport = RecordingTransport::replying(Reply::Unreachable);
        let mut form = filled_form();

        form.submit(&transport).await;

        assert_eq!(
            form.status(),
            &SubmissionStatus::Failed(UNEXPECTED_ERROR_MESSAGE.to_string())
        );
        assert_eq!(transport.sent().len(), 1);
        assert_eq!(form.value(Field::Message), "hi");
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_is_ignored_while_in_flight() {
        let transport = RecordingTransport::replying(Reply::Status(200, None));
        let mut form = filled_form();
        form.is_submitting = true;
        form.status = SubmissionStatus::Pending;

        form.submit(&transport).await;

        assert!(transport.sent().is_empty());
        assert_eq!(form.status(), &SubmissionStatus::Pending);
        assert!(!form.can_submit());
        assert_eq!(form.submit_label(), "Sending...");
    }

    #[tokio::test]
    async fn test_abandoned_submit_clears_in_flight_flag() {
        let hanging = RecordingTransport::replying(Reply::Hang);
        let mut form = filled_form();

        let abandoned =
            tokio::time::timeout(Duration::from_millis(50), form.submit(&hanging)).await;

        assert!(abandoned.is_err());
        assert_eq!(hanging.sent().len(), 1);
        assert!(!form.is_submitting());
        assert!(form.can_submit());
        assert_eq!(
            form.status(),
            &SubmissionStatus::Failed(UNEXPECTED_ERROR_MESSAGE.to_string())
        );
        assert_eq!(form.value(Field::Name), "A");

        let answering = RecordingTransport::replying(Reply::Status(200, None));
        form.submit(&answering).await;

        assert_eq!(answering.sent().len(), 1);
        assert!(!form.is_submitting());
        assert!(form.status().is_success());
    }

    #[tokio::test]
    async fn test_repeated_submissions_each_send_once() {
        let transport = RecordingTransport::replying(Reply::Status(500, None));
        let mut form = filled_form();
        form.submit(&transport).await;
        form.submit(&transport).await;
        assert_eq!(transport.sent().len(), 2);
    }

    #[test]
    fn test_status_banner_text() {
        assert_eq!(SubmissionStatus::NotSubmitted.message(), None);
        assert_eq!(SubmissionStatus::Pending.message(), Some(PENDING_MESSAGE));
        assert!(SubmissionStatus::Succeeded("ok".into()).is_success());
        assert!(!SubmissionStatus::Failed("no".into()).is_success());
    }
}
