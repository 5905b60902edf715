//! Request building: verbs, formats, option maps, and descriptors
//!
//! `RequestBuilder` deterministically turns (endpoint path, format, option
//! map) into a fully-resolved `RequestDescriptor`. It performs no I/O; the
//! descriptor is handed to `HttpClient` for execution.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::Result;

/// HTTP verb for an endpoint. Fixed per endpoint by its semantics (GET for
/// reads, POST for mutations), never selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
}

impl Verb {
    /// Returns the verb as a string slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Response format token, appended to the endpoint path as an extension.
///
/// These are the formats the historical service offered. The library never
/// parses the payload; the token only selects what the server sends back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    #[default]
    Xml,
    Json,
    Rss,
    Atom,
}

impl Format {
    /// Returns the format token as it appears in the URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
            Self::Rss => "rss",
            Self::Atom => "atom",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "json" => Ok(Self::Json),
            "rss" => Ok(Self::Rss),
            "atom" => Ok(Self::Atom),
            _ => Err(format!("Invalid format token: {}", s)),
        }
    }
}

/// A single option value. Booleans render as `true`/`false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Text(String),
    Integer(i64),
    Flag(bool),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Ordered per-call parameters. Keys are unique; re-inserting a key
/// replaces its value without changing its position. Absent keys are
/// simply omitted from the request.
///
/// The map enforces no endpoint-specific requirements; a missing required
/// parameter is answered by the server, not by this library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionMap {
    entries: Vec<(String, OptionValue)>,
}

impl OptionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Chainable form of [`insert`](Self::insert).
    pub fn set(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Percent-encode and join entries as `key=value` pairs with `&`.
///
/// Keys and values are both encoded, so reserved characters (spaces, `&`,
/// `=`, `@`, `#`, non-ASCII text) survive the round trip intact.
fn form_encode(options: &OptionMap) -> String {
    options
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                urlencoding::encode(k),
                urlencoding::encode(&v.to_string())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// A fully-resolved, ready-to-send request.
///
/// Created fresh per call by [`RequestBuilder::build`], never mutated
/// afterwards, and discarded after execution. `url` includes the query
/// string for GET requests; `form_body` carries the encoded options for
/// POST requests.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// Endpoint path with any resource identifier already substituted
    pub path: String,

    /// Response format requested from the server
    pub format: Format,

    /// HTTP verb
    pub verb: Verb,

    /// Merged option map (caller options plus injected application source)
    pub options: OptionMap,

    /// Whether credentials must be attached
    pub requires_auth: bool,

    /// Resolved URL, exactly as it will be transmitted
    pub url: String,

    /// Form-encoded body for POST requests (`None` for GET)
    pub form_body: Option<String>,
}

/// Builds request descriptors for a fixed service host.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: String,
    source: Option<String>,
}

impl RequestBuilder {
    /// Create a builder for `base_url`. The URL is validated here so a
    /// malformed host surfaces before any request is attempted.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            source: None,
        })
    }

    /// Attach an application source label, injected into every request
    /// under the `source` key.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Resolve `(path, verb, format, options)` into a descriptor.
    ///
    /// The URL is `<base>/<path>.<format>`. For GET, a non-empty option
    /// map becomes a percent-encoded query string; an empty map appends
    /// nothing, not even a `?`. For POST, the options become the
    /// form-encoded body and the query string stays empty. A configured
    /// application source is added under `source` unless the caller
    /// already set one.
    pub fn build(
        &self,
        path: &str,
        verb: Verb,
        format: Format,
        mut options: OptionMap,
        requires_auth: bool,
    ) -> RequestDescriptor {
        if let Some(source) = &self.source {
            if !options.contains("source") {
                options.insert("source", source.as_str());
            }
        }

        let mut url = format!("{}/{}.{}", self.base_url, path, format);
        let mut form_body = None;
        match verb {
            Verb::Get => {
                if !options.is_empty() {
                    url.push('?');
                    url.push_str(&form_encode(&options));
                }
            }
            Verb::Post => {
                form_body = Some(form_encode(&options));
            }
        }

        RequestDescriptor {
            path: path.to_string(),
            format,
            verb,
            options,
            requires_auth,
            url,
            form_body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> RequestBuilder {
        RequestBuilder::new("http://twitter.com").unwrap()
    }

    #[test]
    fn get_with_empty_options_has_no_query_string() {
        let desc = builder().build(
            "statuses/public_timeline",
            Verb::Get,
            Format::Json,
            OptionMap::new(),
            false,
        );
        assert_eq!(desc.url, "http://twitter.com/statuses/public_timeline.json");
        assert!(desc.form_body.is_none());
    }

    #[test]
    fn format_defaults_to_xml() {
        let desc = builder().build(
            "account/verify_credentials",
            Verb::Get,
            Format::default(),
            OptionMap::new(),
            true,
        );
        assert_eq!(desc.url, "http://twitter.com/account/verify_credentials.xml");
    }

    #[test]
    fn get_options_become_query_string_in_insertion_order() {
        let options = OptionMap::new().set("count", 20).set("page", 3);
        let desc = builder().build("statuses/friends_timeline", Verb::Get, Format::Xml, options, true);
        assert_eq!(
            desc.url,
            "http://twitter.com/statuses/friends_timeline.xml?count=20&page=3"
        );
    }

    #[test]
    fn post_options_become_body_not_query_string() {
        let options = OptionMap::new().set("status", "hello world");
        let desc = builder().build("statuses/update", Verb::Post, Format::Xml, options, true);
        assert_eq!(desc.url, "http://twitter.com/statuses/update.xml");
        assert_eq!(desc.form_body.as_deref(), Some("status=hello%20world"));
    }

    #[test]
    fn post_with_empty_options_has_empty_body() {
        let desc = builder().build(
            "account/end_session",
            Verb::Post,
            Format::Xml,
            OptionMap::new(),
            true,
        );
        assert_eq!(desc.form_body.as_deref(), Some(""));
    }

    #[test]
    fn reserved_characters_round_trip_through_encoding() {
        let pairs = [
            ("status", "tea & scones = 100% @home #break"),
            ("q", "naïve café"),
        ];
        let mut options = OptionMap::new();
        for (k, v) in pairs {
            options.insert(k, v);
        }
        let desc = builder().build("statuses/update", Verb::Post, Format::Xml, options, true);
        let body = desc.form_body.unwrap();

        let decoded: Vec<(String, String)> = body
            .split('&')
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap();
                (
                    urlencoding::decode(k).unwrap().into_owned(),
                    urlencoding::decode(v).unwrap().into_owned(),
                )
            })
            .collect();
        let expected: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn explicitly_set_default_values_are_still_sent() {
        let options = OptionMap::new().set("count", 20);
        let desc = builder().build("statuses/user_timeline", Verb::Get, Format::Xml, options, true);
        assert_eq!(
            desc.url,
            "http://twitter.com/statuses/user_timeline.xml?count=20"
        );
    }

    #[test]
    fn source_is_injected_when_configured() {
        let builder = builder().source("finchdemo");
        let desc = builder.build("statuses/public_timeline", Verb::Get, Format::Json, OptionMap::new(), false);
        assert_eq!(
            desc.url,
            "http://twitter.com/statuses/public_timeline.json?source=finchdemo"
        );
    }

    #[test]
    fn source_does_not_override_caller_value() {
        let builder = builder().source("finchdemo");
        let options = OptionMap::new().set("source", "other-app");
        let desc = builder.build("statuses/update", Verb::Post, Format::Xml, options, true);
        assert_eq!(desc.form_body.as_deref(), Some("source=other-app"));
    }

    #[test]
    fn trailing_slash_in_base_url_is_trimmed() {
        let builder = RequestBuilder::new("http://twitter.com/").unwrap();
        let desc = builder.build("help/test", Verb::Get, Format::Xml, OptionMap::new(), false);
        assert_eq!(desc.url, "http://twitter.com/help/test.xml");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = RequestBuilder::new("not a url").unwrap_err();
        assert_eq!(err.category(), crate::error::ErrorCategory::Request);
    }

    #[test]
    fn option_map_reinsert_replaces_value_in_place() {
        let mut options = OptionMap::new();
        options.insert("page", 1);
        options.insert("count", 20);
        options.insert("page", 2);
        let entries: Vec<(String, String)> = options
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("page".to_string(), "2".to_string()),
                ("count".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn option_value_rendering() {
        assert_eq!(OptionValue::from("abc").to_string(), "abc");
        assert_eq!(OptionValue::from(42i64).to_string(), "42");
        assert_eq!(OptionValue::from(true).to_string(), "true");
        assert_eq!(OptionValue::from(false).to_string(), "false");
    }

    #[test]
    fn format_token_parsing() {
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("XML".parse::<Format>().unwrap(), Format::Xml);
        assert_eq!("rss".parse::<Format>().unwrap(), Format::Rss);
        assert_eq!("atom".parse::<Format>().unwrap(), Format::Atom);
        assert!("yaml".parse::<Format>().is_err());
    }
}
