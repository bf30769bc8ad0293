//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod config;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::domain::{
    ApiEndpoint, ApiError, DeliveryStatus, GetStatus, MessageId, Password, ProtocolError,
    SendSms, Username, ValidationError,
};
use crate::transport::{
    ApiHosts, DEFAULT_BACKUP_URL, DEFAULT_PRIMARY_URL, GET_DLR_RESPONSE_PATH, SEND_SMS_PATH,
    api_url, encode_get_status_query, encode_send_sms_query, interpret_response,
};

pub use config::{
    ClientConfig, ConfigError, ENV_BACKUP_URL, ENV_PASSWORD, ENV_PRIMARY_URL, ENV_TIMEOUT_SECS,
    ENV_USE_BACKUP_API, ENV_USERNAME,
};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HttpMethod {
    Get,
    Post,
}

trait HttpTransport: Send + Sync {
    fn post_query<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;

    fn get_query<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: reqwest::RequestBuilder,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

impl HttpTransport for ReqwestTransport {
    fn post_query<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        self.execute(self.client.post(url).query(&params))
    }

    fn get_query<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        self.execute(self.client.get(url).query(&params))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Messente API username and password, sent with every request.
pub struct Credentials {
    username: Username,
    password: Password,
}

impl Credentials {
    /// Validate that both parts are non-empty.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    fn push_query_params(&self, params: &mut Vec<(String, String)>) {
        params.push((Username::FIELD.to_owned(), self.username.as_str().to_owned()));
        params.push((Password::FIELD.to_owned(), self.password.as_str().to_owned()));
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`MessenteClient`].
///
/// Transport failures (including non-2xx HTTP statuses) are kept apart from
/// protocol failures, which are either a malformed body or a classified
/// `ERROR`/`FAILURE` answer from the API.
pub enum MessenteError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Malformed response body, or an `ERROR`/`FAILURE` code from Messente.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Client configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl MessenteError {
    /// The classified API rejection, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Protocol(ProtocolError::Api(err)) => Some(err),
            _ => None,
        }
    }

    /// Returns `true` when Messente reported a transient `FAILURE` code.
    ///
    /// Retrying is left to the caller.
    pub fn is_retryable(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_retryable)
    }
}

#[derive(Debug, Clone)]
/// Builder for [`MessenteClient`].
///
/// Use this when you need to customize the hosts, timeout, or user-agent.
pub struct MessenteClientBuilder {
    credentials: Credentials,
    primary_url: String,
    backup_url: String,
    endpoint: ApiEndpoint,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl MessenteClientBuilder {
    /// Create a builder with the default hosts and no timeout/user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            primary_url: DEFAULT_PRIMARY_URL.to_owned(),
            backup_url: DEFAULT_BACKUP_URL.to_owned(),
            endpoint: ApiEndpoint::Primary,
            timeout: None,
            user_agent: None,
        }
    }

    /// Create a builder from a loaded [`ClientConfig`].
    pub fn from_config(config: ClientConfig) -> Result<Self, MessenteError> {
        let credentials = Credentials::new(config.username.as_str(), config.password.as_str())?;
        let timeout = config.timeout();
        let mut builder = Self::new(credentials).use_backup_api(config.use_backup_api);
        if let Some(primary_url) = config.primary_url {
            builder = builder.primary_url(primary_url);
        }
        if let Some(backup_url) = config.backup_url {
            builder = builder.backup_url(backup_url);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        Ok(builder)
    }

    /// Override the primary host base URL (default `https://api2.messente.com`).
    pub fn primary_url(mut self, url: impl Into<String>) -> Self {
        self.primary_url = url.into();
        self
    }

    /// Override the backup host base URL (default `https://api3.messente.com`).
    pub fn backup_url(mut self, url: impl Into<String>) -> Self {
        self.backup_url = url.into();
        self
    }

    /// Start on the backup host instead of the primary one.
    pub fn use_backup_api(mut self, use_backup_api: bool) -> Self {
        self.endpoint = ApiEndpoint::from_use_backup(use_backup_api);
        self
    }

    pub fn endpoint(mut self, endpoint: ApiEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`MessenteClient`].
    pub fn build(self) -> Result<MessenteClient, MessenteError> {
        let hosts = ApiHosts::new(&self.primary_url, &self.backup_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| MessenteError::Transport(Box::new(err)))?;

        Ok(MessenteClient {
            credentials: self.credentials,
            hosts,
            endpoint: self.endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PreparedRequest {
    method: HttpMethod,
    url: String,
    params: Vec<(String, String)>,
}

#[derive(Clone)]
/// High-level Messente client.
///
/// By default calls go to `https://api2.messente.com`. Switch to the backup
/// host (`https://api3.messente.com`) with [`MessenteClient::set_use_backup_api`]
/// when the primary is unavailable; the choice applies to the next call.
pub struct MessenteClient {
    credentials: Credentials,
    hosts: ApiHosts,
    endpoint: ApiEndpoint,
    http: Arc<dyn HttpTransport>,
}

impl MessenteClient {
    /// Create a client using the default hosts.
    ///
    /// For more customization, use [`MessenteClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            hosts: ApiHosts::default(),
            endpoint: ApiEndpoint::Primary,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> MessenteClientBuilder {
        MessenteClientBuilder::new(credentials)
    }

    /// Build a client from a loaded [`ClientConfig`].
    pub fn from_config(config: ClientConfig) -> Result<Self, MessenteError> {
        MessenteClientBuilder::from_config(config)?.build()
    }

    /// Route subsequent calls to the backup host (`true`) or the primary host (`false`).
    pub fn set_use_backup_api(&mut self, use_backup_api: bool) {
        self.endpoint = ApiEndpoint::from_use_backup(use_backup_api);
    }

    /// Whether calls currently go to the backup host.
    pub fn use_backup_api(&self) -> bool {
        self.endpoint.is_backup()
    }

    pub fn endpoint(&self) -> ApiEndpoint {
        self.endpoint
    }

    /// Return a copy of this client routed to `endpoint`.
    pub fn with_endpoint(&self, endpoint: ApiEndpoint) -> Self {
        Self {
            endpoint,
            ..self.clone()
        }
    }

    /// Send an SMS message.
    ///
    /// Returns the unique message id, which can later be passed to
    /// [`MessenteClient::get_status`].
    ///
    /// Errors:
    /// - [`MessenteError::Transport`] / [`MessenteError::HttpStatus`] for transport failures,
    /// - [`MessenteError::Protocol`] for malformed bodies and `ERROR`/`FAILURE` answers.
    #[instrument(level = "debug", skip_all, fields(endpoint = ?self.endpoint))]
    pub async fn send(&self, request: SendSms) -> Result<MessageId, MessenteError> {
        let prepared = self.prepare_send(self.endpoint, &request);
        let payload = self.execute(prepared).await?;
        debug!(message_id = %payload, "message accepted");
        Ok(MessageId::new(payload))
    }

    /// Send `text` to `to`, optionally from a specific sender name.
    pub async fn send_text(
        &self,
        text: &str,
        to: &str,
        from: Option<&str>,
    ) -> Result<MessageId, MessenteError> {
        let mut request = SendSms::new(text, to);
        if let Some(from) = from {
            request = request.from(from);
        }
        self.send(request).await
    }

    /// Query the delivery status of a previously sent message.
    ///
    /// The status word (`SENT`, `FAILED`, `DELIVERED`, ...) is returned as-is.
    /// `FAILURE 102` means no delivery report is available yet.
    #[instrument(
        level = "debug",
        skip_all,
        fields(endpoint = ?self.endpoint, message_id = %request.message_id())
    )]
    pub async fn get_status(&self, request: GetStatus) -> Result<DeliveryStatus, MessenteError> {
        let prepared = self.prepare_get_status(self.endpoint, &request);
        let payload = self.execute(prepared).await?;
        Ok(DeliveryStatus::new(payload))
    }

    /// Query the delivery status for `message_id`.
    pub async fn get_status_of(
        &self,
        message_id: impl Into<MessageId>,
    ) -> Result<DeliveryStatus, MessenteError> {
        self.get_status(GetStatus::new(message_id)).await
    }

    fn prepare_send(&self, endpoint: ApiEndpoint, request: &SendSms) -> PreparedRequest {
        let mut params = Vec::<(String, String)>::new();
        self.credentials.push_query_params(&mut params);
        params.extend(encode_send_sms_query(request));
        PreparedRequest {
            method: HttpMethod::Post,
            url: api_url(&self.hosts, endpoint, SEND_SMS_PATH),
            params,
        }
    }

    fn prepare_get_status(&self, endpoint: ApiEndpoint, request: &GetStatus) -> PreparedRequest {
        let mut params = Vec::<(String, String)>::new();
        self.credentials.push_query_params(&mut params);
        params.extend(encode_get_status_query(request));
        PreparedRequest {
            method: HttpMethod::Get,
            url: api_url(&self.hosts, endpoint, GET_DLR_RESPONSE_PATH),
            params,
        }
    }

    async fn execute(&self, request: PreparedRequest) -> Result<String, MessenteError> {
        debug!(method = ?request.method, url = %request.url, "sending request");

        let response = match request.method {
            HttpMethod::Post => self.http.post_query(&request.url, request.params).await,
            HttpMethod::Get => self.http.get_query(&request.url, request.params).await,
        }
        .map_err(MessenteError::Transport)?;

        debug!(status = response.status, "received response");

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(MessenteError::HttpStatus {
                status: response.status,
                body,
            });
        }

        interpret_response(&response.body).map_err(|err| {
            match &err {
                ProtocolError::Api(api) => warn!(
                    code = %api.code(),
                    retryable = api.is_retryable(),
                    "Messente rejected the request"
                ),
                ProtocolError::InvalidResponse { body } => {
                    warn!(body = %body, "malformed response from Messente")
                }
            }
            MessenteError::Protocol(err)
        })
    }
}
