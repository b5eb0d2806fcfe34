use client_core::SessionError;
use shared::error::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("view rendering failed: {0}")]
    Render(#[from] tera::Error),
    #[error("invalid form: {0}")]
    InvalidForm(String),
    #[error("no signed-in user")]
    NoSession,
}
