use reqwest::blocking::{Client as BlockingClient, RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;
use crate::error::Error;
use crate::request::client::{Client, JsonResponse};

pub struct ReqwestClient {
    client: BlockingClient,
}

impl ReqwestClient {

    pub fn new() -> Result<Self, Error> {
        let client = BlockingClient::builder()
            .user_agent(concat!("parley/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(ReqwestClient { client })
    }

    fn send(mut request: RequestBuilder, headers: &[(&str, &str)]) -> Result<JsonResponse, Error> {
        for (k, v) in headers {
            request = request.header(*k, *v);
        }

        Self::read_response(request.send()?)
    }

    fn read_response(response: Response) -> Result<JsonResponse, Error> {
        let status = response.status();
        let text = response.text()?;

        debug!(status = status.as_u16(), len = text.len(), "response received");

        let body = Self::decode_body(status.is_success(), text)?;

        Ok(JsonResponse { status: status.as_u16(), body })
    }

    // Error bodies are often plain text, keep them as a string.
    fn decode_body(success: bool, text: String) -> Result<Value, Error> {
        if !success {
            return Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)));
        }

        if text.trim().is_empty() {
            Ok(Value::Null)
        } else {
            Ok(serde_json::from_str(&text)?)
        }
    }
}

impl Client for ReqwestClient {

    fn get_json(&self, url: &str, headers: &[(&str, &str)]) -> Result<JsonResponse, Error> {
        debug!(url, "GET");
        Self::send(self.client.get(url), headers)
    }

    fn post_json(&self, url: &str, payload: Value, headers: &[(&str, &str)]) -> Result<JsonResponse, Error> {
        debug!(url, "POST");
        Self::send(self.client.post(url).json(&payload), headers)
    }
}
