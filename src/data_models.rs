use crate::errors::ContactError;
use crate::validation::{email_rule, is_valid_email, message_rule, name_rule};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

pub const RECEIVED_MESSAGE: &str = "Message received successfully! We'll be in touch.";

/// The three fields a visitor sends through the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct SubmissionPayload {
    #[validate(custom(function = "name_rule"))]
    pub name: String,
    #[validate(custom(function = "email_rule"))]
    pub email: String,
    #[validate(custom(function = "message_rule"))]
    pub message: String,
}

// JavaScript-style falsiness of a JSON field.
fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(Value::Number(number)) => number.as_f64() == Some(0.0),
        Some(_) => false,
    }
}

/// Checks an untrusted request body in order: presence, types, email format.
impl TryFrom<&Value> for SubmissionPayload {
    type Error = ContactError;

    fn try_from(data: &Value) -> Result<Self, Self::Error> {
        if data.is_null() {
            return Err(ContactError::NullBody);
        }
        let (name, email, message) = (data.get("name"), data.get("email"), data.get("message"));
        if is_falsy(name) || is_falsy(email) || is_falsy(message) {
            return Err(ContactError::MissingFields);
        }
        let (Some(Value::String(name)), Some(Value::String(email)), Some(Value::String(message))) =
            (name, email, message)
        else {
            return Err(ContactError::InvalidDataTypes);
        };
        if !is_valid_email(email) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            message: message.to_owned(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactResponse {
    pub message: String,
}

impl ContactResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn received() -> Self {
        Self::new(RECEIVED_MESSAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Feature {
    pub id: String,
    /// Lucide icon name rendered by the front end.
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    pub id: String,
    pub name: String,
    pub price: String,
    pub price_suffix: String,
    pub features: Vec<String>,
    pub button_text: String,
    pub cta_link: String,
    pub bg_color: String,
    pub text_color: String,
    pub button_color: String,
    pub border_color: String,
    pub recommended: bool,
}
