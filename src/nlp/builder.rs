use super::NlpClient;
use crate::{
    api::{AipConfig, AipConfigTrait, ApiClient},
    logging::{LoggingConfig, LoggingConfigTrait},
};

#[derive(Default)]
pub struct NlpClientBuilder {
    pub config: AipConfig,
    pub logging_config: LoggingConfig,
}

impl NlpClientBuilder {
    /// Loads any credential not set on the builder from `.env` or the environment,
    /// then installs logging.
    pub fn init(mut self) -> crate::Result<NlpClient<ApiClient>> {
        self.logging_config.load_logger()?;
        self.config.load_credentials()?;
        let base = ApiClient::new(self.config)?;
        crate::info!(
            "NLP client ready for app {}",
            base.app_id().unwrap_or("<unset>")
        );
        Ok(NlpClient::with_base(base))
    }
}

impl AipConfigTrait for NlpClientBuilder {
    fn aip_config_mut(&mut self) -> &mut AipConfig {
        &mut self.config
    }

    fn aip_config(&self) -> &AipConfig {
        &self.config
    }
}

impl LoggingConfigTrait for NlpClientBuilder {
    fn logging_config_mut(&mut self) -> &mut LoggingConfig {
        &mut self.logging_config
    }
}
