//! Per-client configuration: base URL and the shared header map.
//!
//! Each `ClientConfig` is owned by exactly one client. The base URL is fixed
//! at construction; headers change only through `set_auth_token`.

use std::collections::BTreeMap;

/// Environment variable consulted when no base URL is given.
pub const BASE_URL_ENV: &str = "BASE_URL";

/// Base URL used by `from_env` when `BASE_URL` is unset or empty.
pub const DEFAULT_BASE_URL: &str = "https://api.exemplo.com";

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    headers: BTreeMap<String, String>,
}

impl ClientConfig {
    /// Create a config for `base_url` with `Content-Type: application/json`.
    ///
    /// Trailing `/` characters are trimmed, so `http://host/` and
    /// `http://host` both yield `http://host/pokemon` for `/pokemon`. Apart
    /// from that, URLs are plain `base_url + path` concatenation. The URL is
    /// not validated; a malformed value only fails once a request is
    /// attempted.
    pub fn new(base_url: &str) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), "application/json".to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers,
        }
    }

    /// Create a config whose base URL comes from `BASE_URL`, falling back to
    /// `DEFAULT_BASE_URL`.
    pub fn from_env() -> Self {
        let env = std::env::var(BASE_URL_ENV).ok();
        Self::new(&resolve_base_url(env.as_deref()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Overwrite the `Authorization` header with `Bearer <token>`.
    pub fn set_auth_token(&mut self, token: &str) {
        self.headers
            .insert(AUTHORIZATION.to_string(), format!("Bearer {token}"));
    }

    /// Base URL concatenated with `path`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Pick the base URL from the `BASE_URL` value, falling back to
/// `DEFAULT_BASE_URL`. An empty value counts as unset.
pub fn resolve_base_url(env: Option<&str>) -> String {
    env.filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_json_content_type() {
        let config = ClientConfig::new("https://pokeapi.co/api/v2");
        assert_eq!(config.base_url(), "https://pokeapi.co/api/v2");
        assert_eq!(config.headers().len(), 1);
        assert_eq!(config.headers()[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("http://localhost:3000/");
        assert_eq!(config.url_for("/pokemon"), "http://localhost:3000/pokemon");
    }

    #[test]
    fn set_auth_token_overwrites_previous_value() {
        let mut config = ClientConfig::new("http://localhost");
        config.set_auth_token("first");
        assert_eq!(config.headers()[AUTHORIZATION], "Bearer first");
        config.set_auth_token("second");
        assert_eq!(config.headers()[AUTHORIZATION], "Bearer second");
        assert_eq!(config.headers().len(), 2);
    }

    #[test]
    fn resolve_prefers_env_then_default() {
        assert_eq!(resolve_base_url(Some("http://env")), "http://env");
        assert_eq!(resolve_base_url(None), "https://api.exemplo.com");
    }

    #[test]
    fn resolve_treats_empty_as_unset() {
        assert_eq!(resolve_base_url(Some("")), "https://api.exemplo.com");
    }
}
