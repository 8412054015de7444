use serde_json::Value;
use tracing::{info, warn};
use crate::config::{detect_api_type, join_url, ProviderKind, Settings};
use crate::config::{API_ENDPOINT_KEY, API_KEY_KEY, API_TYPE_KEY, DEFAULT_MODEL_KEY};
use crate::error::Error;
use crate::request::Client;
use crate::storage::KeyValueStore;

/// New endpoint and key, validated before they are committed.
#[derive(Debug, Clone)]
pub struct SettingsUpdate {
    /// Base URL of the API.
    pub api_endpoint: String,
    /// API key.
    pub api_key: String,
}

/// Holds and persists API settings.
pub struct SettingsManager {
    settings: Settings,
    error: Option<String>,
    store: Box<dyn KeyValueStore>,
    client: Box<dyn Client>,
}

impl SettingsManager {

    /// Load persisted settings.
    pub fn load(store: Box<dyn KeyValueStore>, client: Box<dyn Client>) -> Self {
        let api_endpoint = store.get(API_ENDPOINT_KEY).unwrap_or_default();

        let api_type = match store.get(API_TYPE_KEY) {
            None => detect_api_type(&api_endpoint),
            Some(val) => ProviderKind::try_from(val.as_str()).unwrap_or_else(|err| {
                warn!("{err}, detecting from endpoint");
                detect_api_type(&api_endpoint)
            }),
        };

        let settings = Settings {
            api_key: store.get(API_KEY_KEY).unwrap_or_default(),
            default_model: store.get(DEFAULT_MODEL_KEY).unwrap_or_default(),
            api_endpoint,
            api_type,
        };

        SettingsManager {
            settings,
            error: None,
            store,
            client,
        }
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Message of the last failed update.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Request the model list, returns the `data` entries.
    pub fn test_api_connection(&self, endpoint: &str, key: &str) -> Result<Vec<Value>, Error> {
        let token = format!("Bearer {}", key);
        let headers = &[("Authorization", token.as_ref())];

        let response = self.client
            .get_json(&join_url(endpoint, "models"), headers)
            .map_err(|err| Error::Connection(err.to_string()))?;

        if !response.is_success() {
            return Err(Error::Connection(format!("status {}", response.status)));
        }

        match response.body.get("data") {
            None | Some(Value::Null) => Ok(vec![]),
            Some(Value::Array(models)) => Ok(models.clone()),
            Some(_) => Err(Error::Connection("unexpected model list format".to_owned())),
        }
    }

    /// Models of the committed endpoint.
    pub fn list_models(&self) -> Result<Vec<Value>, Error> {
        if !self.settings.is_configured() {
            return Err(Error::Configuration("endpoint and key must be set first."));
        }
        self.test_api_connection(&self.settings.api_endpoint, &self.settings.api_key)
    }

    /// Validate and commit a new endpoint and key.
    pub fn update_settings(&mut self, update: SettingsUpdate) -> Result<(), Error> {
        self.error = None;

        let result = self.validate_and_commit(update);
        if let Err(err) = &result {
            warn!("settings update rejected: {err}");
            self.error = Some(err.to_string());
        }
        result
    }

    fn validate_and_commit(&mut self, update: SettingsUpdate) -> Result<(), Error> {
        let api_type = detect_api_type(&update.api_endpoint);

        self.test_api_connection(&update.api_endpoint, &update.api_key)?;

        self.store.set_many(&[
            (API_ENDPOINT_KEY, &update.api_endpoint),
            (API_KEY_KEY, &update.api_key),
            (API_TYPE_KEY, api_type.as_str()),
        ])?;

        info!(endpoint = %update.api_endpoint, %api_type, "settings updated");

        self.settings.api_endpoint = update.api_endpoint;
        self.settings.api_key = update.api_key;
        self.settings.api_type = api_type;

        Ok(())
    }

    /// Overwrite the default model.
    pub fn update_default_model(&mut self, model_id: &str) -> Result<(), Error> {
        self.settings.default_model = model_id.to_owned();
        self.store.set(DEFAULT_MODEL_KEY, model_id)?;
        info!(model = model_id, "default model updated");
        Ok(())
    }

    /// Release the storage.
    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }
}
