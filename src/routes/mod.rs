use crate::app_state::AppState;
use crate::data_models::{ContactResponse, Feature, PricingPlan, SubmissionPayload};
use crate::errors::ContactError;
use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Result};
use serde_json::Value;
use tokio::time::sleep;
use tracing::info;

const JSON_CONTENT_TYPE: &str = "application/json";
const MAX_CONTACT_BODY_BYTES: usize = 64 * 1024;

pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn features(State(state): State<AppState>) -> Json<Vec<Feature>> {
    Json(state.catalog.features.clone())
}

pub async fn pricing(State(state): State<AppState>) -> Json<Vec<PricingPlan>> {
    Json(state.catalog.plans.clone())
}

fn check_content_type(headers: &HeaderMap) -> Result<(), ContactError> {
    match headers.get(CONTENT_TYPE).map(|value| value.as_bytes()) {
        Some(value) if value == JSON_CONTENT_TYPE.as_bytes() => Ok(()),
        _ => Err(ContactError::UnsupportedContentType),
    }
}

pub async fn contact(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<ContactResponse>, ContactError> {
    check_content_type(request.headers())?;
    let body = to_bytes(request.into_body(), MAX_CONTACT_BODY_BYTES).await?;
    let data: Value = serde_json::from_slice(&body)?;
    let submission = SubmissionPayload::try_from(&data)?;

    info!(
        name = %submission.name,
        email = %submission.email,
        message = %submission.message,
        "contact form submission"
    );
    sleep(state.processing_delay).await;
    Ok(Json(ContactResponse::received()))
}
