use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Underlying error from reqwest library after an API call was made
    #[error("http error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Server answered with a non-success status code
    #[error("unexpected status {status}: {body}")]
    Http { status: u16, body: String },
    /// The token endpoint rejected the configured credentials
    #[error("auth error {error}: {description}")]
    Auth { error: String, description: String },
    /// API kept returning a transient error object until the retry budget ran out
    #[error("{}: {}", .0.error_code, .0.error_msg)]
    Api(ApiError),
    /// Error when a request cannot be serialized
    #[error("failed to serialize api request: {0}")]
    JSONSerialize(serde_json::Error),
    /// Error when a response cannot be deserialized into a Rust type
    #[error("failed to deserialize api response: {0}")]
    JSONDeserialize(serde_json::Error),
    /// Error from client side validation
    /// or when a request cannot be turned into an http request
    #[error("invalid args: {0}")]
    InvalidArgument(String),
}

/// Error object embedded in an otherwise successful (HTTP 200) response body.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub error_code: i64,
    #[serde(default)]
    pub error_msg: String,
}

impl ApiError {
    /// Invalid access token.
    pub const INVALID_TOKEN: i64 = 110;
    /// Access token expired.
    pub const EXPIRED_TOKEN: i64 = 111;
    /// Open api qps request limit reached.
    pub const QPS_LIMIT: i64 = 18;

    /// Pulls `error_code`/`error_msg` out of a response, if the server reported one.
    pub fn from_response(value: &serde_json::Value) -> Option<Self> {
        let error_code = value.get("error_code")?.as_i64()?;
        let error_msg = value
            .get("error_msg")
            .and_then(|m| m.as_str())
            .unwrap_or_default()
            .to_string();
        Some(Self {
            error_code,
            error_msg,
        })
    }

    pub fn is_token_error(&self) -> bool {
        matches!(self.error_code, Self::INVALID_TOKEN | Self::EXPIRED_TOKEN)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.error_code == Self::QPS_LIMIT
    }
}

/// Error body returned by the OAuth token endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct AuthErrorBody {
    pub(crate) error: String,
    #[serde(default)]
    pub(crate) error_description: String,
}

impl From<AuthErrorBody> for ClientError {
    fn from(body: AuthErrorBody) -> Self {
        ClientError::Auth {
            error: body.error,
            description: body.error_description,
        }
    }
}

pub(crate) fn map_deserialization_error(e: serde_json::Error, bytes: &[u8]) -> ClientError {
    tracing::error!(
        "failed deserialization of: {}",
        String::from_utf8_lossy(bytes)
    );
    ClientError::JSONDeserialize(e)
}

pub(crate) fn map_serialization_error(e: serde_json::Error) -> ClientError {
    tracing::error!("failed serialization: {}", e);
    ClientError::JSONSerialize(e)
}
