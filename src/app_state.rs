use crate::catalog::Catalog;
use crate::configuration::ContactSettings;
use crate::errors::ConfigurationError;
use std::sync::Arc;
use std::time::Duration;

/// Read-only state shared by every handler. Nothing in here changes after
/// start-up, so requests never contend on it.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub processing_delay: Duration,
}

impl AppState {
    pub fn try_init(settings: &ContactSettings) -> Result<Self, ConfigurationError> {
        settings.check_if_valid()?;
        Ok(Self {
            catalog: Arc::new(Catalog::default()),
            processing_delay: settings.processing_delay,
        })
    }
}
