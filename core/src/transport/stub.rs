use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

use super::Transport;

#[derive(Debug, Clone)]
enum Outcome {
    Respond(HttpResponse),
    Fail(String),
}

/// In-memory transport answering from registered outcomes.
///
/// Outcomes are keyed by method and full URL (base URL plus path, without
/// the separately-held query parameters). Unregistered requests fail as
/// transport errors. Every executed request is recorded, matched or not.
#[derive(Debug, Default)]
pub struct StubTransport {
    outcomes: HashMap<(HttpMethod, String), Outcome>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method url` with `status` and `body`.
    pub fn respond(mut self, method: HttpMethod, url: &str, status: u16, body: &str) -> Self {
        let response = HttpResponse {
            status,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: body.to_string(),
        };
        self.outcomes
            .insert((method, url.to_string()), Outcome::Respond(response));
        self
    }

    /// Answer `method url` with a JSON document and status 200.
    pub fn respond_json(self, method: HttpMethod, url: &str, body: &serde_json::Value) -> Self {
        self.respond(method, url, 200, &body.to_string())
    }

    /// Make `method url` fail as if the network were unreachable.
    pub fn fail(mut self, method: HttpMethod, url: &str, message: &str) -> Self {
        self.outcomes
            .insert((method, url.to_string()), Outcome::Fail(message.to_string()));
        self
    }

    /// Requests executed so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests().pop()
    }
}

impl Transport for StubTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        match self.requests.lock() {
            Ok(mut requests) => requests.push(request.clone()),
            Err(poisoned) => poisoned.into_inner().push(request.clone()),
        }

        match self.outcomes.get(&(request.method, request.url.clone())) {
            Some(Outcome::Respond(response)) => Ok(response.clone()),
            Some(Outcome::Fail(message)) => Err(ApiError::TransportError(message.clone())),
            None => Err(ApiError::TransportError(format!(
                "no stub registered for {} {}",
                request.method, request.url
            ))),
        }
    }
}
