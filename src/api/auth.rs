use super::{
    config::AipConfig,
    error::{map_deserialization_error, AuthErrorBody},
    ClientError,
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::{Duration, Instant};

pub(crate) const TOKEN_PATH: &str = "/oauth/2.0/token";

/// Upper bound on how long a token is trusted, whatever `expires_in` says.
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(30 * 24 * 60 * 60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
    #[serde(default)]
    scope: String,
}

#[derive(Clone, Debug)]
pub(crate) struct AccessToken {
    pub(crate) token: Secret<String>,
    pub(crate) scope: String,
    expires_at: Instant,
}

impl AccessToken {
    pub(crate) fn new(token: String, scope: String, expires_in: u64) -> Self {
        let lifetime = Duration::from_secs(expires_in).min(MAX_TOKEN_LIFETIME);
        let now = Instant::now();
        Self {
            token: Secret::new(token),
            scope,
            expires_at: now.checked_add(lifetime).unwrap_or(now),
        }
    }

    pub(crate) fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Exchanges the api key/secret key pair for an access token.
pub(crate) async fn fetch_token(
    http_client: &reqwest::Client,
    config: &AipConfig,
) -> Result<AccessToken, ClientError> {
    let (Some(api_key), Some(secret_key)) = (&config.api_key, &config.secret_key) else {
        return Err(ClientError::InvalidArgument(
            "api_key and secret_key must be loaded before requesting a token".to_string(),
        ));
    };

    let response = http_client
        .post(config.url(TOKEN_PATH))
        .query(&[
            ("grant_type", "client_credentials"),
            ("client_id", api_key.expose_secret().as_str()),
            ("client_secret", secret_key.expose_secret().as_str()),
        ])
        .send()
        .await?;
    let status = response.status();
    let bytes = response.bytes().await?;

    let value: serde_json::Value = match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(_) if !status.is_success() => {
            return Err(ClientError::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            })
        }
        Err(e) => return Err(map_deserialization_error(e, &bytes)),
    };
    if value.get("error").is_some() {
        let body: AuthErrorBody =
            serde_json::from_value(value).map_err(|e| map_deserialization_error(e, &bytes))?;
        crate::error!("Token request rejected: {}", body.error);
        return Err(body.into());
    }
    if !status.is_success() {
        return Err(ClientError::Http {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }

    let token: TokenResponse =
        serde_json::from_value(value).map_err(|e| map_deserialization_error(e, &bytes))?;
    crate::debug!(
        "Obtained access token, expires in {}s, scope: {}",
        token.expires_in,
        token.scope
    );
    Ok(AccessToken::new(token.access_token, token.scope, token.expires_in))
}
