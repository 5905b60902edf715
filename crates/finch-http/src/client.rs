//! Request execution and last-call bookkeeping

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::debug;

use crate::config::HttpConfig;
use crate::error::{Error, Result};
use crate::request::{RequestDescriptor, Verb};
use crate::response::{from_reqwest, ApiResponse};

/// HTTP Basic credentials, immutable after construction. Transmitted as
/// `username:password` per request when an endpoint requires them.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Status code and URL of the most recently completed exchange.
#[derive(Debug, Default)]
struct LastCall {
    status_code: Option<u16>,
    url: Option<String>,
}

/// Executes request descriptors over a pooled connection.
///
/// Each [`execute`](HttpClient::execute) call performs exactly one HTTP
/// exchange: no retries, no backoff, no redirect bookkeeping beyond the
/// transport default. After every completed exchange, success status or
/// not, the last-call state is overwritten; a transport failure leaves it
/// at its previous value.
///
/// Clones share the connection pool and the last-call state. When one
/// instance is shared across concurrent callers, the state reflects
/// whichever exchange completed last; per-call status and URL are always
/// available on the returned [`ApiResponse`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Arc<HttpClientInner>,
}

#[derive(Debug)]
struct HttpClientInner {
    http: reqwest::Client,
    state: Mutex<LastCall>,
}

impl HttpClient {
    /// Create a new client with the given transport configuration
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpClientInner {
                http,
                state: Mutex::new(LastCall::default()),
            }),
        })
    }

    /// Perform exactly one HTTP exchange for `descriptor`, resolving only
    /// after the full response body has been received.
    ///
    /// Credentials are attached only when the descriptor requires them;
    /// executing an auth-required descriptor without credentials is a
    /// configuration error surfaced before any I/O. The returned response
    /// carries the payload verbatim for any completed exchange, including
    /// 4xx/5xx statuses; only transport failures use the error channel.
    pub async fn execute(
        &self,
        descriptor: &RequestDescriptor,
        credentials: Option<&Credentials>,
    ) -> Result<ApiResponse> {
        let start = Instant::now();

        let mut request = match descriptor.verb {
            Verb::Get => self.inner.http.get(&descriptor.url),
            Verb::Post => self.inner.http.post(&descriptor.url),
        };

        if descriptor.requires_auth {
            let credentials = credentials.ok_or_else(|| {
                Error::Config("credentials required for authenticated endpoint".into())
            })?;
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        if let Some(body) = &descriptor.form_body {
            // The builder already percent-encoded the body; send it
            // byte-for-byte rather than re-encoding through a form helper.
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body.clone());
        }

        debug!(verb = descriptor.verb.as_str(), url = %descriptor.url, "dispatching request");
        let response = request.send().await?;
        let response = from_reqwest(response, &descriptor.url, start.elapsed()).await?;
        debug!(
            status = response.status_code,
            latency_ms = response.latency_ms,
            "exchange completed"
        );

        let mut state = self.inner.state.lock();
        state.status_code = Some(response.status_code);
        state.url = Some(response.url.clone());
        drop(state);

        Ok(response)
    }

    /// Status code of the most recently completed exchange, `None` before
    /// the first one.
    pub fn last_status_code(&self) -> Option<u16> {
        self.inner.state.lock().status_code
    }

    /// URL of the most recently completed exchange, exactly as
    /// transmitted, `None` before the first one.
    pub fn last_call(&self) -> Option<String> {
        self.inner.state.lock().url.clone()
    }
}
