//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::domain::{
    ApiKey, BalanceInfo, DeliveryReport, DeliveryReportQuery, MessageText, SendResult, SendSms,
    SenderId, ValidationError,
};

const SEND_SMS_PATH: &str = "/sms/2/text/advanced";
const REPORTS_PATH: &str = "/sms/1/reports";
const BALANCE_PATH: &str = "/account/1/balance";

/// Default provider endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.infobip.com";
/// Default timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const JSON_CONTENT_TYPE: &str = "application/json";

const BALANCE_PERMISSION_MESSAGE: &str = "balance checking requires additional API permissions; \
     ask the provider to enable account access for this key. SMS sending is not affected";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone)]
struct HttpRequest {
    method: HttpMethod,
    url: String,
    query: Vec<(String, String)>,
    headers: Vec<(&'static str, String)>,
    body: Option<String>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
                HttpMethod::Post => self.client.post(&request.url),
            };
            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            for (name, value) in &request.headers {
                builder = builder.header(*name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Credentials sent with every call as `Authorization: App <key>`.
pub struct Auth {
    api_key: ApiKey,
}

impl Auth {
    /// Create [`Auth`] from an API key, rejecting blank keys.
    pub fn api_key(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            api_key: ApiKey::new(value)?,
        })
    }

    fn push_headers(&self, headers: &mut Vec<(&'static str, String)>) {
        headers.push(("Authorization", format!("App {}", self.api_key.as_str())));
        headers.push(("Content-Type", JSON_CONTENT_TYPE.to_owned()));
        headers.push(("Accept", JSON_CONTENT_TYPE.to_owned()));
    }
}

/// Coarse classification of [`SmsError`] for callers that map failures onto
/// user-facing responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input rejected before any network call.
    InvalidArgument,
    /// Network failure, timeout, non-2xx status or unreadable response.
    Transport,
    /// The API key lacks access to the requested resource.
    Permission,
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsClient`].
pub enum SmsError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the provider.
    #[error("unexpected HTTP status {status}: {}", .body.as_deref().unwrap_or("<empty body>"))]
    HttpStatus { status: u16, body: Option<String> },

    /// The provider refused access to an endpoint the key is not entitled to.
    #[error("permission denied: {message}")]
    Permission { message: String },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl SmsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::InvalidArgument,
            Self::Permission { .. } => ErrorKind::Permission,
            Self::Transport(_) | Self::HttpStatus { .. } | Self::Parse(_) => ErrorKind::Transport,
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`SmsClient`].
///
/// Use this when you need to customize the base URL, timeout, or user-agent.
pub struct SmsClientBuilder {
    auth: Auth,
    sender: SenderId,
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl SmsClientBuilder {
    /// Create a builder with the default base URL and a 30 second timeout.
    pub fn new(auth: Auth, sender: SenderId) -> Self {
        Self {
            auth,
            sender,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Override the provider base URL (for example an account-specific host).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout applied to each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`SmsClient`].
    pub fn build(self) -> Result<SmsClient, SmsError> {
        let base_url = normalize_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| SmsError::Transport(Box::new(err)))?;

        Ok(SmsClient {
            auth: self.auth,
            sender: self.sender,
            base_url,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = || ValidationError::InvalidUrl {
        input: raw.to_owned(),
    };
    let parsed = url::Url::parse(trimmed).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(invalid());
    }
    Ok(trimmed.to_owned())
}

#[derive(Clone)]
/// High-level bulk-SMS client.
///
/// Holds immutable configuration (base URL, API key, default sender) and a
/// shared HTTP client. Every method issues exactly one request; nothing is
/// retried.
pub struct SmsClient {
    auth: Auth,
    sender: SenderId,
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for SmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsClient")
            .field("auth", &self.auth)
            .field("sender", &self.sender)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SmsClient {
    /// Start building a client with custom settings.
    pub fn builder(auth: Auth, sender: SenderId) -> SmsClientBuilder {
        SmsClientBuilder::new(auth, sender)
    }

    /// Base URL every endpoint path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sender id used when a request carries no override.
    pub fn default_sender(&self) -> &SenderId {
        &self.sender
    }

    /// Validate raw inputs and send them as one message.
    ///
    /// See [`SendSms::build`] for the validation order. Nothing is sent when
    /// validation fails.
    pub async fn send_message<I, S>(
        &self,
        recipients: I,
        text: impl Into<String>,
        sender: Option<String>,
    ) -> Result<SendResult, SmsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = SendSms::build(recipients, text, sender)?;
        self.send_sms(request).await
    }

    /// Send an SMS message to every recipient of `request`.
    ///
    /// Texts longer than a single segment are sent anyway; a warning is logged
    /// because the provider may bill several segments.
    ///
    /// Errors:
    /// - [`SmsError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`SmsError::Transport`] when the request could not be completed,
    /// - [`SmsError::Parse`] when the response body is not the expected JSON.
    #[instrument(skip_all, fields(recipients = request.recipients().len()))]
    pub async fn send_sms(&self, request: SendSms) -> Result<SendResult, SmsError> {
        if request.text().exceeds_single_segment() {
            warn!(
                chars = request.text().char_count(),
                limit = MessageText::SINGLE_SEGMENT_CHARS,
                "SMS text may be split into multiple parts"
            );
        }

        let body = crate::transport::encode_send_sms_body(&request, &self.sender)
            .map_err(|err| SmsError::Parse(Box::new(err)))?;

        let response = self
            .execute(HttpMethod::Post, SEND_SMS_PATH, Vec::new(), Some(body))
            .await?;
        let body = success_body(response)?;

        let parsed = crate::transport::decode_send_sms_json_response(&body)
            .map_err(|err| SmsError::Parse(Box::new(err)))?;

        debug!(
            bulk_id = parsed.bulk_id.as_deref().unwrap_or_default(),
            accepted = parsed.accepted_count(),
            rejected = parsed.rejected_count(),
            "SMS submitted"
        );
        Ok(parsed)
    }

    /// Fetch delivery reports, at most `query.limit` of them, in provider order.
    ///
    /// Errors: same as [`SmsClient::send_sms`].
    #[instrument(skip_all, fields(limit = query.limit.value()))]
    pub async fn delivery_reports(
        &self,
        query: &DeliveryReportQuery,
    ) -> Result<Vec<DeliveryReport>, SmsError> {
        let params = crate::transport::encode_reports_query(query);
        let response = self
            .execute(HttpMethod::Get, REPORTS_PATH, params, None)
            .await?;
        let body = success_body(response)?;

        let reports = crate::transport::decode_reports_json_response(&body)
            .map_err(|err| SmsError::Parse(Box::new(err)))?;
        debug!(count = reports.len(), "delivery reports fetched");
        Ok(reports)
    }

    /// Check the account balance.
    ///
    /// Errors: [`SmsError::Permission`] when the provider answers 403 (the key
    /// lacks account access), otherwise the same as [`SmsClient::send_sms`].
    #[instrument(skip_all)]
    pub async fn balance(&self) -> Result<BalanceInfo, SmsError> {
        let response = self
            .execute(HttpMethod::Get, BALANCE_PATH, Vec::new(), None)
            .await?;
        if response.status == 403 {
            warn!("balance endpoint refused with 403");
            return Err(SmsError::Permission {
                message: BALANCE_PERMISSION_MESSAGE.to_owned(),
            });
        }
        let body = success_body(response)?;

        crate::transport::decode_balance_json_response(&body)
            .map_err(|err| SmsError::Parse(Box::new(err)))
    }

    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<String>,
    ) -> Result<HttpResponse, SmsError> {
        let mut headers = Vec::with_capacity(3);
        self.auth.push_headers(&mut headers);

        let request = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            query,
            headers,
            body,
        };
        debug!(method = ?request.method, url = %request.url, "calling SMS API");

        self.http.send(request).await.map_err(|err| {
            warn!(error = %err, "SMS API request failed");
            SmsError::Transport(err)
        })
    }
}

fn success_body(response: HttpResponse) -> Result<String, SmsError> {
    if !(200..=299).contains(&response.status) {
        warn!(status = response.status, "SMS API returned an error status");
        let body = if response.body.trim().is_empty() {
            None
        } else {
            Some(response.body)
        };
        return Err(SmsError::HttpStatus {
            status: response.status,
            body,
        });
    }
    Ok(response.body)
}
