use secrecy::Secret;
use std::time::Duration;

/// Default API host
pub const AIP_API_HOST: &str = "https://aip.baidubce.com";

#[derive(Clone, Debug)]
pub struct AipConfig {
    pub host: String,
    pub app_id: Option<String>,
    pub api_key: Option<Secret<String>>,
    pub secret_key: Option<Secret<String>>,
    pub app_id_env_var: String,
    pub api_key_env_var: String,
    pub secret_key_env_var: String,
    pub connection_timeout: Option<Duration>,
    pub socket_timeout: Option<Duration>,
    pub proxy: Option<String>,
    pub max_retry_elapsed: Duration,
}

impl Default for AipConfig {
    fn default() -> Self {
        Self {
            host: AIP_API_HOST.to_string(),
            app_id: None,
            api_key: None,
            secret_key: None,
            app_id_env_var: "AIP_APP_ID".to_string(),
            api_key_env_var: "AIP_API_KEY".to_string(),
            secret_key_env_var: "AIP_SECRET_KEY".to_string(),
            connection_timeout: None,
            socket_timeout: None,
            proxy: None,
            max_retry_elapsed: Duration::from_secs(60),
        }
    }
}

impl AipConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.host.trim_end_matches('/'), path)
    }

    /// Fills in every credential that was not set explicitly from `.env` or the environment.
    pub(crate) fn load_credentials(&mut self) -> crate::Result<()> {
        if self.app_id.is_none() {
            // The app id is only reported back to the caller, so a missing one is not fatal
            self.app_id = load_env_var(&self.app_id_env_var).ok();
        }
        if self.api_key.is_none() {
            self.api_key = Some(load_env_var(&self.api_key_env_var)?.into());
        } else {
            crate::trace!("Using api_key from parameter");
        }
        if self.secret_key.is_none() {
            self.secret_key = Some(load_env_var(&self.secret_key_env_var)?.into());
        } else {
            crate::trace!("Using secret_key from parameter");
        }
        Ok(())
    }
}

fn load_env_var(env_var: &str) -> crate::Result<String> {
    crate::trace!("{} not set. Attempting to load from .env", env_var);
    dotenvy::dotenv().ok();

    match dotenvy::var(env_var) {
        Ok(value) => {
            crate::trace!("Successfully loaded {} from .env", env_var);
            Ok(value)
        }
        Err(_) => {
            crate::trace!("{} not found in dotenv, nor was it set manually", env_var);
            crate::bail!("Failed to load {} from parameter or .env", env_var)
        }
    }
}

pub trait AipConfigTrait {
    fn aip_config_mut(&mut self) -> &mut AipConfig;

    fn aip_config(&self) -> &AipConfig;

    fn with_api_host<S: AsRef<str>>(mut self, host: S) -> Self
    where
        Self: Sized,
    {
        self.aip_config_mut().host = host.as_ref().to_string();
        self
    }

    fn with_app_id<S: Into<String>>(mut self, app_id: S) -> Self
    where
        Self: Sized,
    {
        self.aip_config_mut().app_id = Some(app_id.into());
        self
    }

    fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self
    where
        Self: Sized,
    {
        self.aip_config_mut().api_key = Some(Secret::from(api_key.into()));
        self
    }

    fn with_secret_key<S: Into<String>>(mut self, secret_key: S) -> Self
    where
        Self: Sized,
    {
        self.aip_config_mut().secret_key = Some(Secret::from(secret_key.into()));
        self
    }

    /// Set the environment variable name for the app id. Default is `AIP_APP_ID`.
    fn with_app_id_env_var<S: Into<String>>(mut self, env_var: S) -> Self
    where
        Self: Sized,
    {
        self.aip_config_mut().app_id_env_var = env_var.into();
        self
    }

    /// Set the environment variable name for the API key. Default is `AIP_API_KEY`.
    fn with_api_key_env_var<S: Into<String>>(mut self, env_var: S) -> Self
    where
        Self: Sized,
    {
        self.aip_config_mut().api_key_env_var = env_var.into();
        self
    }

    /// Set the environment variable name for the secret key. Default is `AIP_SECRET_KEY`.
    fn with_secret_key_env_var<S: Into<String>>(mut self, env_var: S) -> Self
    where
        Self: Sized,
    {
        self.aip_config_mut().secret_key_env_var = env_var.into();
        self
    }

    /// Time allowed for establishing the connection.
    fn with_connection_timeout(mut self, timeout: Duration) -> Self
    where
        Self: Sized,
    {
        self.aip_config_mut().connection_timeout = Some(timeout);
        self
    }

    /// Time allowed for the whole request, response body included.
    fn with_socket_timeout(mut self, timeout: Duration) -> Self
    where
        Self: Sized,
    {
        self.aip_config_mut().socket_timeout = Some(timeout);
        self
    }

    /// Route every request through this proxy, e.g. `http://10.0.0.1:3128`.
    fn with_proxy<S: Into<String>>(mut self, proxy: S) -> Self
    where
        Self: Sized,
    {
        self.aip_config_mut().proxy = Some(proxy.into());
        self
    }

    /// Upper bound on the time spent retrying rate limited requests.
    fn with_max_retry_elapsed(mut self, max_elapsed: Duration) -> Self
    where
        Self: Sized,
    {
        self.aip_config_mut().max_retry_elapsed = max_elapsed;
        self
    }
}

impl AipConfigTrait for AipConfig {
    fn aip_config_mut(&mut self) -> &mut AipConfig {
        self
    }

    fn aip_config(&self) -> &AipConfig {
        self
    }
}
