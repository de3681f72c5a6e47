use serde::Deserialize;
use url::Url;

use crate::error::SettingsError;

pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:5000/predict";
pub const DEFAULT_UPLOAD_FIELD: &str = "audio";
const SETTINGS_FILE_STEM: &str = "predictor";
const ENV_PREFIX: &str = "APP";
const ENDPOINT_ALIAS_VAR: &str = "PREDICT_ENDPOINT_URL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    pub endpoint_url: String,
    pub upload_field: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.into(),
            upload_field: DEFAULT_UPLOAD_FIELD.into(),
        }
    }
}

impl ClientSettings {
    pub fn with_endpoint(mut self, endpoint_url: Option<String>) -> Self {
        if let Some(endpoint_url) = endpoint_url {
            self.endpoint_url = endpoint_url;
        }
        self
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let parsed =
            Url::parse(&self.endpoint_url).map_err(|err| SettingsError::InvalidEndpoint {
                url: self.endpoint_url.clone(),
                reason: err.to_string(),
            })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SettingsError::InvalidEndpoint {
                url: self.endpoint_url.clone(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        if self.upload_field.trim().is_empty() {
            return Err(SettingsError::EmptyUploadField);
        }
        Ok(())
    }
}

/// Defaults, then `predictor.toml` (optional), then `APP__*` variables, then `PREDICT_ENDPOINT_URL`.
pub fn load_settings() -> Result<ClientSettings, SettingsError> {
    settings_from_sources(
        config::File::with_name(SETTINGS_FILE_STEM).required(false),
        config::Environment::with_prefix(ENV_PREFIX).separator("__"),
        std::env::var(ENDPOINT_ALIAS_VAR).ok(),
    )
}

fn settings_from_sources<F>(
    file: F,
    env: config::Environment,
    endpoint_alias: Option<String>,
) -> Result<ClientSettings, SettingsError>
where
    F: config::Source + Send + Sync + 'static,
{
    let defaults = ClientSettings::default();
    let settings: ClientSettings = config::Config::builder()
        .set_default("endpoint_url", defaults.endpoint_url)?
        .set_default("upload_field", defaults.upload_field)?
        .add_source(file)
        .add_source(env)
        .set_override_option("endpoint_url", endpoint_alias)?
        .build()?
        .try_deserialize()?;

    settings.validate()?;
    Ok(settings)
}
