use thiserror::Error;

use tnm_core::error::CoreError;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("config error: {0}")]
    Config(#[from] CoreError),

    #[error("conditional region '{0}' is declared more than once")]
    DuplicateRegion(String),

    #[error("mixture block '{0}' must have at least one row")]
    EmptyMixture(String),
}
