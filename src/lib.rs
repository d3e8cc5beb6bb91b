#[allow(unused_imports)]
pub(crate) use anyhow::{anyhow, bail, Error, Result};
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn, Level};

pub mod api;
pub mod logging;
pub mod nlp;

pub use api::{
    AipConfig, AipConfigTrait, AipRequest, ApiClient, ApiError, BaseClient, BodyFormat, Charset,
    ClientError,
};
pub use logging::{LoggingConfig, LoggingConfigTrait};
pub use nlp::{
    builder::NlpClientBuilder,
    options::{CommentType, EmotionScene, NlpOptions, SimnetModel},
    Operation, NlpClient,
};

pub struct AipNlp {}

impl AipNlp {
    pub fn builder() -> NlpClientBuilder {
        NlpClientBuilder::default()
    }
}
