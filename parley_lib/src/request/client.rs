use serde_json::Value;
use crate::error::Error;
use super::reqwest::ReqwestClient;

/// Status and decoded body of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body. Non-JSON bodies of failed responses are kept as a string.
    pub body: Value,
}

impl JsonResponse {
    /// Status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request client.
pub trait Client {
    /// Send GET request and receive response.
    fn get_json(&self, url: &str, headers: &[(&str, &str)]) -> Result<JsonResponse, Error>;

    /// Send POST request with JSON payload and receive response.
    fn post_json(&self, url: &str, payload: Value, headers: &[(&str, &str)]) -> Result<JsonResponse, Error>;
}

/// Create reqwest client.
pub fn get_reqwest_client() -> Result<Box<dyn Client>, Error> {
    Ok(Box::new(ReqwestClient::new()?))
}
