//! Only for tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use serde_json::Value;
use crate::error::Error;
use crate::request::client::{Client, JsonResponse};

/// Expected HTTP method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method {
    /// GET.
    Get,
    /// POST.
    Post,
}

/// Scripted reply.
pub enum Reply {
    /// Respond with status and body.
    Json(u16, Value),
    /// Fail at the transport level.
    Fail(&'static str),
}

/// Expected request and the reply to it.
pub struct Exchange {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    payload: Option<Value>,
    reply: Reply,
}

impl Exchange {

    /// Expect GET request.
    pub fn get(url: &str, headers: &[(&str, &str)], reply: Reply) -> Self {
        Exchange { method: Method::Get, url: url.to_owned(), headers: owned(headers), payload: None, reply }
    }

    /// Expect POST request.
    pub fn post(url: &str, headers: &[(&str, &str)], payload: Value, reply: Reply) -> Self {
        Exchange { method: Method::Post, url: url.to_owned(), headers: owned(headers), payload: Some(payload), reply }
    }
}

fn owned(headers: &[(&str, &str)]) -> Vec<(String, String)> {
    headers.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}

/// Client for tests. Panics on any request that was not scripted.
pub struct StubClient {
    exchanges: RefCell<VecDeque<Exchange>>,
}

impl StubClient {

    /// Create client.
    pub fn new(exchanges: Vec<Exchange>) -> Self {
        StubClient {
            exchanges: RefCell::new(exchanges.into()),
        }
    }

    /// Client that must not be called.
    pub fn unreachable() -> Self {
        Self::new(vec![])
    }

    fn exchange(&self, method: Method, url: &str, headers: &[(&str, &str)], payload: Option<Value>) -> Result<JsonResponse, Error> {
        let expected = self.exchanges
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected {:?} request to {}", method, url));

        assert_eq!(expected.method, method, "method");
        assert_eq!(expected.url, url, "url");
        assert_eq!(expected.headers, owned(headers), "headers");
        assert_eq!(expected.payload, payload, "payload");

        match expected.reply {
            Reply::Json(status, body) => Ok(JsonResponse { status, body }),
            Reply::Fail(reason) => Err(Error::ForTests(reason)),
        }
    }
}

impl Client for StubClient {

    fn get_json(&self, url: &str, headers: &[(&str, &str)]) -> Result<JsonResponse, Error> {
        self.exchange(Method::Get, url, headers, None)
    }

    fn post_json(&self, url: &str, payload: Value, headers: &[(&str, &str)]) -> Result<JsonResponse, Error> {
        self.exchange(Method::Post, url, headers, Some(payload))
    }
}

impl Drop for StubClient {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            assert!(self.exchanges.borrow().is_empty(), "scripted requests were not sent");
        }
    }
}
