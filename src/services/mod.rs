use thiserror::Error;

use crate::renderer::RenderError;
use crate::repository::errors::RepositoryError;

pub mod catalog;
pub mod clients;
pub mod order;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A submitted form or payload failed validation.
    #[error("{0}")]
    Form(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
