//! Device facade errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("required service missing: {0}")]
    MissingService(&'static str),

    #[error("service error: {0}")]
    Service(#[from] droidctl_services::ServiceError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
