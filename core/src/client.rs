//! Thin REST client over a pluggable transport.
//!
//! # Design
//! `ApiClient` owns a `ClientConfig` (base URL plus header map) and a
//! `Transport`. Every verb method goes through the same three steps:
//! `build_request` produces an `HttpRequest` from the config, the transport
//! executes it, and `check_status` turns a non-2xx response into
//! `ApiError::HttpError`. The client performs no retries and never branches
//! on specific status codes; interpretation is left to the caller.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

/// REST client bound to one base URL.
#[derive(Debug)]
pub struct ApiClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl ApiClient<UreqTransport> {
    /// Client for `base_url` over the network.
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(ClientConfig::new(base_url), UreqTransport::new())
    }

    /// Client whose base URL comes from `BASE_URL` or the built-in fallback.
    pub fn from_env() -> Self {
        Self::with_transport(ClientConfig::from_env(), UreqTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        self.config.headers()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `Authorization: Bearer <token>` on every subsequent request.
    pub fn set_auth_token(&mut self, token: &str) {
        self.config.set_auth_token(token);
    }

    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        params: &[(&str, &str)],
        body: Option<String>,
    ) -> HttpRequest {
        HttpRequest {
            method,
            url: self.config.url_for(path),
            query: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            headers: self
                .config
                .headers()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            body,
        }
    }

    pub fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<HttpResponse, ApiError> {
        self.send(self.build_request(HttpMethod::Get, path, params, None))
    }

    pub fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        data: Option<&B>,
    ) -> Result<HttpResponse, ApiError> {
        self.send(self.build_request(HttpMethod::Post, path, &[], encode(data)?))
    }

    pub fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        data: Option<&B>,
    ) -> Result<HttpResponse, ApiError> {
        self.send(self.build_request(HttpMethod::Put, path, &[], encode(data)?))
    }

    pub fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        data: Option<&B>,
    ) -> Result<HttpResponse, ApiError> {
        self.send(self.build_request(HttpMethod::Patch, path, &[], encode(data)?))
    }

    pub fn delete(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.send(self.build_request(HttpMethod::Delete, path, &[], None))
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(&request).inspect_err(|e| {
            tracing::warn!(method = %request.method, url = %request.url, error = %e, "request failed");
        })?;
        tracing::debug!(status = response.status, url = %request.url, "response received");
        check_status(response)
    }
}

impl Default for ApiClient<UreqTransport> {
    fn default() -> Self {
        Self::from_env()
    }
}

fn encode<B: Serialize + ?Sized>(data: Option<&B>) -> Result<Option<String>, ApiError> {
    data.map(serde_json::to_string)
        .transpose()
        .map_err(|e| ApiError::SerializationError(e.to_string()))
}

/// Pass 2xx responses through; wrap anything else in `ApiError::HttpError`.
pub fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::HttpError(Box::new(response)))
    }
}
