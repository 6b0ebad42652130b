//! Crate-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Errors surfaced outside the domain layer, e.g. while loading settings.
#[derive(Error, Debug)]
pub enum OrgTreeError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },
}

pub type OrgTreeResult<T> = Result<T, OrgTreeError>;
