use crate::errors::{ConfigurationError, Error};
use config::{Config, FileFormat};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use std::env::var;
use std::path::Path;
use std::time::Duration;

/// Upper bound for the simulated processing delay of a contact submission.
pub const MAX_PROCESSING_DELAY: Duration = Duration::from_secs(10);

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Settings {
    pub application: Application,
    pub contact: ContactSettings,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Application {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl Default for Application {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            log_level: "info".to_string(),
        }
    }
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ContactSettings {
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub processing_delay: Duration,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_millis(1000),
        }
    }
}

impl ContactSettings {
    pub fn check_if_valid(&self) -> Result<(), ConfigurationError> {
        if self.processing_delay > MAX_PROCESSING_DELAY {
            return Err(ConfigurationError::ProcessingDelayTooLong(
                self.processing_delay,
            ));
        }
        Ok(())
    }
}

/// The possible runtime environment for our application.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = ConfigurationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            _ => Err(ConfigurationError::UnknownEnvironment(s)),
        }
    }
}

pub fn get_env() -> Result<Environment, ConfigurationError> {
    var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "dev".into())
        .try_into()
}

/// Reads `base.yaml`, then `<environment>.yaml` from `directory`, then
/// `APP_`-prefixed environment variables (`APP_APPLICATION__PORT=9000`).
pub fn load_from(directory: &Path, environment: Environment) -> Result<Settings, Error> {
    let base = directory.join("base");
    let layer = directory.join(environment.as_str());
    let settings = Config::builder()
        .add_source(config::File::new(&base.to_string_lossy(), FileFormat::Yaml))
        .add_source(config::File::new(&layer.to_string_lossy(), FileFormat::Yaml))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    let settings = settings.try_deserialize::<Settings>()?;
    settings.contact.check_if_valid()?;
    Ok(settings)
}

pub fn get_configuration() -> Result<Settings, Error> {
    let environment = get_env()?;
    load_from(Path::new("configuration"), environment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing_is_case_insensitive() {
        assert_eq!(
            Environment::try_from("PROD".to_string()).unwrap(),
            Environment::Prod
        );
        assert_eq!(
            Environment::try_from("dev".to_string()).unwrap(),
            Environment::Dev
        );
    }

    #[test]
    fn test_unknown_environment_fails() {
        let err = Environment::try_from("staging".to_string()).unwrap_err();
        assert!(err.to_string().contains("staging"));
    }

    #[test]
    fn test_default_delay_is_valid() {
        assert!(ContactSettings::default().check_if_valid().is_ok());
    }

    #[test]
    fn test_long_delay_is_rejected() {
        let settings = ContactSettings {
            processing_delay: MAX_PROCESSING_DELAY + Duration::from_millis(1),
        };
        assert!(matches!(
            settings.check_if_valid(),
            Err(ConfigurationError::ProcessingDelayTooLong(_))
        ));
    }
}
