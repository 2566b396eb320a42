pub mod session;
pub mod content;
pub mod booking;
pub mod desk;
pub mod notify;
pub mod editor;
pub mod repository;
mod patterns;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Validation(String),
    #[error("Not configured: {0}")]
    NotConfigured(String),
    #[error("Upstream call failed: {0}")]
    Upstream(String),
    #[error("Storage failure: {0}")]
    Storage(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
