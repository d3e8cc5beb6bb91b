// Internal modules
mod auth;
mod client;
mod config;
mod error;
mod request;

// Internal exports
pub(crate) use request::{CONTENT_ENCODING, CONTENT_TYPE, JSON_DATA};

// Public exports
pub use client::{ApiClient, BaseClient};
pub use config::{AipConfig, AipConfigTrait, AIP_API_HOST};
pub use error::{ApiError, ClientError};
pub use request::{AipRequest, BodyFormat, Charset};
