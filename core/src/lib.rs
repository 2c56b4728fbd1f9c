//! Minimal blocking REST client with shared base URL and headers.
//!
//! # Overview
//! `ApiClient` exposes GET/POST/PUT/PATCH/DELETE against one base URL. Each
//! call concatenates the base URL with the caller's path, attaches the
//! client's header map and hands the request to a `Transport`. 2xx responses
//! are returned as-is; anything else comes back as `ApiError::HttpError`
//! carrying the response.
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`),
//!   so the I/O boundary is explicit and testable.
//! - `UreqTransport` talks to the network; `StubTransport` answers from
//!   registered outcomes and records what it was asked.
//! - Headers live in a per-client `ClientConfig`; the only mutation is
//!   `set_auth_token`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{StubTransport, Transport, UreqTransport};
