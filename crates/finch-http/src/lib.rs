//! finch-http: request building and execution core for the finch client
//!
//! The legacy microblogging REST API exposes dozens of endpoints that all
//! share one request shape: `GET|POST <host>/<endpoint>.<format>[?query]`,
//! with HTTP Basic credentials attached when the endpoint requires them.
//! This crate implements that shape once:
//!
//! - `RequestBuilder`: turns an endpoint path, a response format, and an
//!   option map into an immutable `RequestDescriptor` (resolved URL, verb,
//!   form body). Pure, no I/O.
//! - `HttpClient`: performs exactly one HTTP exchange per descriptor and
//!   records the status code and URL of the most recently completed
//!   exchange for introspection.
//! - `ApiResponse`: the raw payload plus status, headers, URL, and latency.
//!   Nothing here parses response bodies.
//!
//! The endpoint catalogue and the public one-method-per-endpoint surface
//! live in the `finch-api` crate.

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod response;

pub use client::{Credentials, HttpClient};
pub use config::HttpConfig;
pub use error::{Error, ErrorCategory, Result};
pub use request::{Format, OptionMap, OptionValue, RequestBuilder, RequestDescriptor, Verb};
pub use response::ApiResponse;
