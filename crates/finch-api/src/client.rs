//! High-level client: one method per remote operation
//!
//! Every method is the same one-line composition: resolve the catalogue
//! row, build a descriptor, execute it, hand back the raw payload. The
//! payload arrives in whatever format the server sent; callers parse it
//! themselves.

use finch_http::{
    ApiResponse, Credentials, Format, HttpClient, HttpConfig, OptionMap, RequestBuilder, Result,
};
use tracing::debug;

use crate::catalogue::{self, EndpointSpec};

/// Legacy plaintext host the service lived on.
pub const DEFAULT_BASE_URL: &str = "http://twitter.com";

/// Configuration for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Account username, also the Basic-auth identity
    pub username: String,

    /// Account password
    pub password: String,

    /// Optional application source label, attached to outgoing requests
    pub source: Option<String>,

    /// Service host (default: [`DEFAULT_BASE_URL`])
    pub base_url: String,

    /// Transport configuration
    pub http: HttpConfig,
}

impl ApiConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            source: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: HttpConfig::default(),
        }
    }

    /// Set the application source label
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the service host
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the transport configuration
    pub fn http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }
}

/// Client for the legacy REST API.
///
/// Construction fixes the credentials and the optional application
/// source; per-call state (status code and URL of the most recently
/// completed exchange) is available through
/// [`last_status_code`](Self::last_status_code) and
/// [`last_call`](Self::last_call), and on every returned [`ApiResponse`].
#[derive(Debug)]
pub struct ApiClient {
    http: HttpClient,
    builder: RequestBuilder,
    credentials: Credentials,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = HttpClient::new(&config.http)?;
        let mut builder = RequestBuilder::new(config.base_url)?;
        if let Some(source) = config.source {
            builder = builder.source(source);
        }
        Ok(Self {
            http,
            builder,
            credentials: Credentials::new(config.username, config.password),
        })
    }

    /// Create a client with default configuration for the given account.
    pub fn with_credentials(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::new(ApiConfig::new(username, password))
    }

    async fn dispatch(
        &self,
        endpoint: &EndpointSpec,
        path: &str,
        options: OptionMap,
        format: Format,
        requires_auth: bool,
    ) -> Result<ApiResponse> {
        debug!(endpoint = endpoint.name, "calling endpoint");
        let descriptor = self
            .builder
            .build(path, endpoint.verb, format, options, requires_auth);
        self.http.execute(&descriptor, Some(&self.credentials)).await
    }

    async fn call(
        &self,
        endpoint: &EndpointSpec,
        options: OptionMap,
        format: Format,
    ) -> Result<ApiResponse> {
        self.dispatch(endpoint, endpoint.path, options, format, endpoint.auth)
            .await
    }

    async fn call_with_id(
        &self,
        endpoint: &EndpointSpec,
        id: &str,
        options: OptionMap,
        format: Format,
    ) -> Result<ApiResponse> {
        let path = endpoint.resolve(id);
        self.dispatch(endpoint, &path, options, format, endpoint.auth)
            .await
    }

    // Timelines

    /// Returns the 20 most recent statuses from non-protected users who
    /// have set a custom user icon.
    pub async fn public_timeline(&self, format: Format) -> Result<ApiResponse> {
        self.call(&catalogue::PUBLIC_TIMELINE, OptionMap::new(), format)
            .await
    }

    /// Returns the 20 most recent statuses posted by the authenticating
    /// user and that user's friends.
    pub async fn friends_timeline(
        &self,
        options: OptionMap,
        format: Format,
    ) -> Result<ApiResponse> {
        self.call(&catalogue::FRIENDS_TIMELINE, options, format).await
    }

    /// Returns the 20 most recent statuses posted from the authenticating
    /// user.
    pub async fn user_timeline(&self, options: OptionMap, format: Format) -> Result<ApiResponse> {
        self.call(&catalogue::USER_TIMELINE, options, format).await
    }

    /// Returns the 20 most recent mentions for the authenticating user.
    pub async fn mentions(&self, options: OptionMap, format: Format) -> Result<ApiResponse> {
        self.call(&catalogue::MENTIONS, options, format).await
    }

    /// Returns the 20 most recent @replies for the authenticating user.
    /// Superseded upstream by [`mentions`](Self::mentions).
    pub async fn replies(&self, options: OptionMap, format: Format) -> Result<ApiResponse> {
        self.call(&catalogue::REPLIES, options, format).await
    }

    // Statuses

    /// Returns a single status, specified by `id`.
    pub async fn show_status(&self, id: &str, format: Format) -> Result<ApiResponse> {
        self.call_with_id(&catalogue::SHOW_STATUS, id, OptionMap::new(), format)
            .await
    }

    /// Updates the authenticating user's status, optionally as a reply.
    pub async fn update_status(
        &self,
        status: &str,
        reply_to: Option<&str>,
        format: Format,
    ) -> Result<ApiResponse> {
        let mut options = OptionMap::new();
        options.insert("status", status);
        if let Some(reply_to) = reply_to {
            options.insert("in_reply_to_status_id", reply_to);
        }
        self.call(&catalogue::UPDATE_STATUS, options, format).await
    }

    /// Destroys the status specified by `id`. The authenticating user must
    /// be its author.
    pub async fn destroy_status(&self, id: &str, format: Format) -> Result<ApiResponse> {
        self.call_with_id(&catalogue::DESTROY_STATUS, id, OptionMap::new(), format)
            .await
    }

    // Users

    /// Returns the authenticating user's friends, each with current status
    /// inline.
    pub async fn friends(&self, options: OptionMap, format: Format) -> Result<ApiResponse> {
        self.call(&catalogue::FRIENDS, options, format).await
    }

    /// Returns the authenticating user's followers, each with current
    /// status inline.
    pub async fn followers(&self, options: OptionMap, format: Format) -> Result<ApiResponse> {
        self.call(&catalogue::FOLLOWERS, options, format).await
    }

    /// Returns extended information on a user. When the options identify
    /// nobody (none of `id`, `user_id`, `screen_name`), the configured
    /// username is used.
    pub async fn show_user(&self, mut options: OptionMap, format: Format) -> Result<ApiResponse> {
        if !options.contains("id") && !options.contains("user_id") && !options.contains("screen_name")
        {
            options.insert("id", self.credentials.username.as_str());
        }
        self.call(&catalogue::SHOW_USER, options, format).await
    }

    // Direct messages

    /// Returns the 20 most recent direct messages sent to the
    /// authenticating user.
    pub async fn direct_messages(&self, options: OptionMap, format: Format) -> Result<ApiResponse> {
        self.call(&catalogue::DIRECT_MESSAGES, options, format).await
    }

    /// Returns the 20 most recent direct messages sent by the
    /// authenticating user.
    pub async fn sent_messages(&self, options: OptionMap, format: Format) -> Result<ApiResponse> {
        self.call(&catalogue::SENT_MESSAGES, options, format).await
    }

    /// Sends a new direct message from the authenticating user.
    pub async fn new_message(
        &self,
        user: &str,
        text: &str,
        format: Format,
    ) -> Result<ApiResponse> {
        let options = OptionMap::new().set("user", user).set("text", text);
        self.call(&catalogue::NEW_MESSAGE, options, format).await
    }

    /// Destroys the direct message specified by `id`.
    pub async fn destroy_message(&self, id: &str, format: Format) -> Result<ApiResponse> {
        self.call_with_id(&catalogue::DESTROY_MESSAGE, id, OptionMap::new(), format)
            .await
    }

    // Friendships

    /// Befriends the user identified in the options as the authenticating
    /// user. `follow` defaults to `true` unless the caller set it.
    pub async fn create_friendship(
        &self,
        mut options: OptionMap,
        format: Format,
    ) -> Result<ApiResponse> {
        if !options.contains("follow") {
            options.insert("follow", true);
        }
        self.call(&catalogue::CREATE_FRIENDSHIP, options, format)
            .await
    }

    /// Discontinues friendship with the user specified by `id`.
    pub async fn destroy_friendship(&self, id: &str, format: Format) -> Result<ApiResponse> {
        let options = OptionMap::new().set("id", id);
        self.call(&catalogue::DESTROY_FRIENDSHIP, options, format)
            .await
    }

    /// Tests whether a friendship exists between two users.
    pub async fn friendship_exists(
        &self,
        user_a: &str,
        user_b: &str,
        format: Format,
    ) -> Result<ApiResponse> {
        let options = OptionMap::new().set("user_a", user_a).set("user_b", user_b);
        self.call(&catalogue::FRIENDSHIP_EXISTS, options, format)
            .await
    }

    // Social graph

    /// Returns numeric IDs for every user the specified user is following.
    pub async fn friend_ids(&self, options: OptionMap, format: Format) -> Result<ApiResponse> {
        self.call(&catalogue::FRIEND_IDS, options, format).await
    }

    /// Returns numeric IDs for every user following the specified user.
    pub async fn follower_ids(&self, options: OptionMap, format: Format) -> Result<ApiResponse> {
        self.call(&catalogue::FOLLOWER_IDS, options, format).await
    }

    // Account

    /// Returns the requesting user when authentication succeeds, a 401
    /// payload when it does not.
    pub async fn verify_credentials(&self, format: Format) -> Result<ApiResponse> {
        self.call(&catalogue::VERIFY_CREDENTIALS, OptionMap::new(), format)
            .await
    }

    /// Returns the remaining API request quota for the current hour.
    /// Credentials are attached only when `authenticate` is set, so the
    /// quota can be checked for either the account or the calling IP.
    pub async fn rate_limit_status(
        &self,
        authenticate: bool,
        format: Format,
    ) -> Result<ApiResponse> {
        self.dispatch(
            &catalogue::RATE_LIMIT_STATUS,
            catalogue::RATE_LIMIT_STATUS.path,
            OptionMap::new(),
            format,
            authenticate,
        )
        .await
    }

    /// Ends the session of the authenticating user.
    pub async fn end_session(&self, format: Format) -> Result<ApiResponse> {
        self.call(&catalogue::END_SESSION, OptionMap::new(), format)
            .await
    }

    /// Sets which device the service delivers updates to. `device` must be
    /// `sms`, `im`, or `none`.
    pub async fn update_delivery_device(
        &self,
        device: &str,
        format: Format,
    ) -> Result<ApiResponse> {
        let options = OptionMap::new().set("device", device);
        self.call(&catalogue::UPDATE_DELIVERY_DEVICE, options, format)
            .await
    }

    /// Sets hex values controlling the profile page color scheme.
    pub async fn update_profile_colors(
        &self,
        options: OptionMap,
        format: Format,
    ) -> Result<ApiResponse> {
        self.call(&catalogue::UPDATE_PROFILE_COLORS, options, format)
            .await
    }

    /// Sets the values editable under the account settings page.
    pub async fn update_profile(&self, options: OptionMap, format: Format) -> Result<ApiResponse> {
        self.call(&catalogue::UPDATE_PROFILE, options, format).await
    }

    // Favorites

    /// Returns the 20 most recent favorite statuses for the authenticating
    /// user or the user identified in the options.
    pub async fn favorites(&self, options: OptionMap, format: Format) -> Result<ApiResponse> {
        self.call(&catalogue::FAVORITES, options, format).await
    }

    /// Favorites the status specified by `id`.
    pub async fn create_favorite(&self, id: &str, format: Format) -> Result<ApiResponse> {
        self.call_with_id(&catalogue::CREATE_FAVORITE, id, OptionMap::new(), format)
            .await
    }

    /// Un-favorites the status specified by `id`.
    pub async fn destroy_favorite(&self, id: &str, format: Format) -> Result<ApiResponse> {
        self.call_with_id(&catalogue::DESTROY_FAVORITE, id, OptionMap::new(), format)
            .await
    }

    // Notifications

    /// Enables notifications for updates from the specified user.
    pub async fn follow_notifications(&self, id: &str, format: Format) -> Result<ApiResponse> {
        let options = OptionMap::new().set("id", id);
        self.call(&catalogue::FOLLOW_NOTIFICATIONS, options, format)
            .await
    }

    /// Disables notifications for updates from the specified user.
    pub async fn leave_notifications(&self, id: &str, format: Format) -> Result<ApiResponse> {
        let options = OptionMap::new().set("id", id);
        self.call(&catalogue::LEAVE_NOTIFICATIONS, options, format)
            .await
    }

    // Blocks

    /// Blocks the user specified by `id`.
    pub async fn create_block(&self, id: &str, format: Format) -> Result<ApiResponse> {
        let options = OptionMap::new().set("id", id);
        self.call(&catalogue::CREATE_BLOCK, options, format).await
    }

    /// Unblocks the user specified by `id`.
    pub async fn destroy_block(&self, id: &str, format: Format) -> Result<ApiResponse> {
        let options = OptionMap::new().set("id", id);
        self.call(&catalogue::DESTROY_BLOCK, options, format).await
    }

    /// Returns whether the authenticating user is blocking a target user.
    pub async fn block_exists(&self, options: OptionMap, format: Format) -> Result<ApiResponse> {
        self.call(&catalogue::BLOCK_EXISTS, options, format).await
    }

    /// Returns the user objects the authenticating user is blocking.
    pub async fn blocking(&self, options: OptionMap, format: Format) -> Result<ApiResponse> {
        self.call(&catalogue::BLOCKING, options, format).await
    }

    /// Returns the numeric user IDs the authenticating user is blocking.
    pub async fn blocking_ids(&self, format: Format) -> Result<ApiResponse> {
        self.call(&catalogue::BLOCKING_IDS, OptionMap::new(), format)
            .await
    }

    // Help

    /// Returns the string "ok" in the requested format.
    pub async fn test(&self, format: Format) -> Result<ApiResponse> {
        self.call(&catalogue::TEST, OptionMap::new(), format).await
    }

    // Introspection

    /// Status code of the most recently completed exchange, `None` before
    /// the first call.
    pub fn last_status_code(&self) -> Option<u16> {
        self.http.last_status_code()
    }

    /// URL of the most recently completed exchange, exactly as
    /// transmitted, `None` before the first call.
    pub fn last_call(&self) -> Option<String> {
        self.http.last_call()
    }
}
