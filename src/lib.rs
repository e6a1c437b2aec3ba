pub mod app_state;
pub mod catalog;
pub mod configuration;
pub mod data_models;
pub mod errors;
pub mod form;
mod routes;
pub mod telemetry;
pub mod validation;

use crate::app_state::AppState;
use crate::configuration::Settings;
use crate::errors::Error;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub fn create_app(settings: &Settings) -> Result<(Router, AppState), Error> {
    let app_state = AppState::try_init(&settings.contact)?;
    let app = Router::new()
        .route("/health_check", get(routes::health_check))
        .route("/api/contact", post(routes::contact))
        .route("/api/features", get(routes::features))
        .route("/api/pricing", get(routes::pricing))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state.clone());
    Ok((app, app_state))
}
