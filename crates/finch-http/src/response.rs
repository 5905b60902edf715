//! Response wrapper
//!
//! The core returns payloads verbatim in whatever format the server sent.
//! The helpers here (`text`, `json`) are for callers; nothing in this
//! crate invokes them.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{Error, Result};

/// One completed HTTP exchange: status, headers, raw payload, the URL that
/// was transmitted, and the round-trip latency.
///
/// A non-2xx status is an ordinary value here, not an error.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status_code: u16,

    /// Response headers
    pub headers: HashMap<String, String>,

    /// Response body as bytes
    pub body: Vec<u8>,

    /// URL as transmitted (not any post-redirect location)
    pub url: String,

    /// Request latency in milliseconds
    pub latency_ms: u64,
}

impl ApiResponse {
    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Check if status is client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    /// Check if status is server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    /// Get body as text (UTF-8)
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.clone())
            .map_err(|e| Error::Response(format!("invalid UTF-8 in response: {}", e)))
    }

    /// Get body as JSON
    pub fn json(&self) -> Result<serde_json::Value> {
        serde_json::from_slice(&self.body)
            .map_err(|e| Error::Json(format!("failed to parse JSON: {}", e)))
    }

    /// Get body as JSON and deserialize to type
    pub fn json_as<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| Error::Json(format!("failed to deserialize JSON: {}", e)))
    }

    /// Get raw bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Get latency as Duration
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Get a header value (case-insensitive name lookup)
    pub fn header(&self, name: &str) -> Option<&str> {
        let name_lower = name.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_lowercase() == name_lower)
            .map(|(_, v)| v.as_str())
    }
}

/// Convert a reqwest response into an `ApiResponse`, reading the full body.
///
/// `requested_url` is recorded instead of `response.url()` so the value
/// reflects what was sent, even if the server redirected.
pub(crate) async fn from_reqwest(
    response: reqwest::Response,
    requested_url: &str,
    latency: Duration,
) -> Result<ApiResponse> {
    let status_code = response.status().as_u16();

    let mut headers = HashMap::new();
    for (name, value) in response.headers().iter() {
        if let Ok(v) = value.to_str() {
            headers.insert(name.to_string(), v.to_string());
        }
    }

    let body = response.bytes().await?.to_vec();

    Ok(ApiResponse {
        status_code,
        headers,
        body,
        url: requested_url.to_string(),
        latency_ms: latency.as_millis() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status_code: u16, body: &[u8]) -> ApiResponse {
        ApiResponse {
            status_code,
            headers: HashMap::new(),
            body: body.to_vec(),
            url: "http://twitter.com/help/test.xml".to_string(),
            latency_ms: 12,
        }
    }

    #[test]
    fn test_status_checks() {
        assert!(response(200, b"").is_success());
        assert!(!response(404, b"").is_success());
        assert!(response(404, b"").is_client_error());
        assert!(response(502, b"").is_server_error());
    }

    #[test]
    fn test_text_and_bytes() {
        let resp = response(200, b"<ok>true</ok>");
        assert_eq!(resp.text().unwrap(), "<ok>true</ok>");
        assert_eq!(resp.bytes(), b"<ok>true</ok>");
    }

    #[test]
    fn test_text_rejects_invalid_utf8() {
        let resp = response(200, &[0xff, 0xfe]);
        assert!(matches!(resp.text(), Err(Error::Response(_))));
    }

    #[test]
    fn test_json_helper() {
        let resp = response(200, br#"{"screen_name": "alice"}"#);
        let json = resp.json().unwrap();
        assert_eq!(json["screen_name"], "alice");
        assert!(matches!(response(200, b"not json").json(), Err(Error::Json(_))));
    }

    #[test]
    fn test_header_case_insensitive() {
        let mut resp = response(200, b"");
        resp.headers
            .insert("Content-Type".to_string(), "application/xml".to_string());
        assert_eq!(resp.header("content-type"), Some("application/xml"));
        assert_eq!(resp.header("CONTENT-TYPE"), Some("application/xml"));
        assert_eq!(resp.header("x-missing"), None);
    }

    #[test]
    fn test_latency() {
        assert_eq!(response(200, b"").latency(), Duration::from_millis(12));
    }
}
