//! finch-api: thin client for the legacy Twitter REST API
//!
//! The API surface is a flat catalogue of endpoints sharing one request
//! shape, so the crate is organized the same way:
//!
//! - [`catalogue`]: one declarative row per remote operation (path
//!   template, verb, auth requirement).
//! - [`client`]: [`ApiClient`], generating one async method per row on
//!   top of the `finch-http` request core.
//!
//! Responses come back raw, in whatever format the server sent (`xml`,
//! `json`, `rss`, `atom`); this crate never parses them.
//!
//! ```no_run
//! use finch_api::{ApiClient, ApiConfig, Format, OptionMap};
//!
//! # async fn run() -> finch_api::Result<()> {
//! let client = ApiClient::new(ApiConfig::new("alice", "secret").source("my-app"))?;
//!
//! let timeline = client.public_timeline(Format::Json).await?;
//! println!("{}", timeline.text()?);
//!
//! client.update_status("hello world", None, Format::Xml).await?;
//! assert_eq!(client.last_status_code(), Some(200));
//! # Ok(())
//! # }
//! ```

pub mod catalogue;
pub mod client;

pub use client::{ApiClient, ApiConfig, DEFAULT_BASE_URL};

// Re-export the request-core types callers interact with.
pub use finch_http::{
    ApiResponse, Credentials, Error, ErrorCategory, Format, HttpConfig, OptionMap, OptionValue,
    Result, Verb,
};
