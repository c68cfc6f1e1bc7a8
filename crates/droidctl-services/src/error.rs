//! Service call errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("remote call failed: {0}")]
    Remote(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
