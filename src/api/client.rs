use super::{
    auth::{fetch_token, AccessToken},
    config::AipConfig,
    error::{map_deserialization_error, ApiError, ClientError},
    request::{AipRequest, Charset, ACCEPT, CONTENT_TYPE, FORM_URLENCODE_DATA},
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use std::{future::Future, sync::Arc};
use tokio::sync::Mutex;

/// Value of the `aipSdk` query parameter sent with every call
pub const AIP_SDK: &str = "rust";

/// The hooks every operation runs its request through.
///
/// `pre_operation` runs on the empty request, before any operation specific field is
/// added. `post_operation` runs once the request is fully described. `request_server`
/// sends it and returns the parsed JSON body.
pub trait BaseClient: Send + Sync {
    fn pre_operation(
        &self,
        request: &mut AipRequest,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn post_operation(
        &self,
        request: &mut AipRequest,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn request_server(
        &self,
        request: AipRequest,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;
}

/// reqwest backed [`BaseClient`] authenticating with OAuth access tokens.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    pub config: AipConfig,
    pub backoff: backoff::ExponentialBackoff,
    token: Arc<Mutex<Option<AccessToken>>>,
}

impl ApiClient {
    pub fn new(config: AipConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.connection_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.socket_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy.as_str())?);
        }
        Ok(Self {
            http_client: builder.build()?,
            backoff: backoff::ExponentialBackoffBuilder::new()
                .with_max_elapsed_time(Some(config.max_retry_elapsed))
                .build(),
            config,
            token: Arc::new(Mutex::new(None)),
        })
    }

    pub fn app_id(&self) -> Option<&str> {
        self.config.app_id.as_deref()
    }

    /// Returns the cached token, fetching a new one when none is cached or it expired.
    async fn access_token(&self) -> Result<Secret<String>, ClientError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
            crate::debug!("Access token expired, refreshing");
        }
        let token = fetch_token(&self.http_client, &self.config).await?;
        crate::trace!("Token scope: {}", token.scope);
        let secret = token.token.clone();
        *cached = Some(token);
        Ok(secret)
    }

    /// Drops the cached token, unless it was already replaced by a call that saw the
    /// same rejection.
    async fn invalidate_token(&self, rejected: &str) {
        let mut cached = self.token.lock().await;
        if cached
            .as_ref()
            .is_some_and(|token| token.token.expose_secret() == rejected)
        {
            *cached = None;
        }
    }

    fn build_request(&self, request: &AipRequest) -> Result<reqwest::Request, ClientError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientError::InvalidArgument(format!("header {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::InvalidArgument(format!("header {name}: {e}")))?;
            headers.insert(name, value);
        }
        crate::trace!("Sending request to {}", request.uri);

        Ok(self
            .http_client
            .post(self.config.url(&request.uri))
            .query(&request.params)
            .headers(headers)
            .body(request.body_bytes()?)
            .build()?)
    }

    /// Execute a HTTP request and retry on rate limit
    async fn execute(&self, request: &AipRequest) -> Result<Value, ClientError> {
        backoff::future::retry(self.backoff.clone(), || async move {
            let http_request = self
                .build_request(request)
                .map_err(backoff::Error::Permanent)?;
            let response = self
                .http_client
                .execute(http_request)
                .await
                .map_err(ClientError::Reqwest)
                .map_err(backoff::Error::Permanent)?;

            let status = response.status();
            let declared = response_charset(response.headers());
            let bytes = response
                .bytes()
                .await
                .map_err(ClientError::Reqwest)
                .map_err(backoff::Error::Permanent)?;
            let text = decode_body(declared, &bytes);

            if !status.is_success() {
                let err = ClientError::Http {
                    status: status.as_u16(),
                    body: text,
                };
                if status.as_u16() == 429 || status.is_server_error() {
                    crate::warn!("Retrying after {}", err);
                    return Err(backoff::Error::Transient {
                        err,
                        retry_after: None,
                    });
                }
                return Err(backoff::Error::Permanent(err));
            }

            crate::trace!("Serialized response: {}", text);
            let value: Value = serde_json::from_str(&text)
                .map_err(|e| map_deserialization_error(e, &bytes))
                .map_err(backoff::Error::Permanent)?;

            // The qps limit arrives as a 200 with an error object
            if let Some(api_error) = ApiError::from_response(&value) {
                if api_error.is_rate_limited() {
                    crate::warn!("Rate limited: {}", api_error.error_msg);
                    return Err(backoff::Error::Transient {
                        err: ClientError::Api(api_error),
                        retry_after: None,
                    });
                }
            }
            Ok(value)
        })
        .await
    }
}

impl BaseClient for ApiClient {
    async fn pre_operation(&self, request: &mut AipRequest) -> Result<(), ClientError> {
        self.access_token().await?;
        request.add_header(CONTENT_TYPE, FORM_URLENCODE_DATA);
        request.add_header(ACCEPT, "*/*");
        Ok(())
    }

    async fn post_operation(&self, request: &mut AipRequest) -> Result<(), ClientError> {
        let token = self.access_token().await?;
        request.add_param("aipSdk", AIP_SDK);
        request.add_param("aipVersion", env!("CARGO_PKG_VERSION"));
        request.add_param("access_token", token.expose_secret().as_str());
        Ok(())
    }

    async fn request_server(&self, mut request: AipRequest) -> Result<Value, ClientError> {
        let value = self.execute(&request).await?;
        match ApiError::from_response(&value) {
            Some(api_error) if api_error.is_token_error() => {
                crate::debug!(
                    "Access token rejected with {}, refreshing and resending",
                    api_error.error_code
                );
                if let Some(rejected) = request.params.get("access_token") {
                    self.invalidate_token(rejected).await;
                }
                let token = self.access_token().await?;
                request.add_param("access_token", token.expose_secret().as_str());
                self.execute(&request).await
            }
            _ => Ok(value),
        }
    }
}

/// Charset named by a `Content-Type: ...; charset=...` response header.
fn response_charset(headers: &HeaderMap) -> Option<Charset> {
    let content_type = headers.get(reqwest::header::CONTENT_TYPE)?.to_str().ok()?;
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Charset::from_label(value)
        } else {
            None
        }
    })
}

/// Undeclared bodies are UTF-8 when they validate as such, GBK otherwise.
fn decode_body(declared: Option<Charset>, bytes: &[u8]) -> String {
    match declared {
        Some(charset) => charset.decode(bytes),
        None => match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => Charset::Gbk.decode(bytes),
        },
    }
}
