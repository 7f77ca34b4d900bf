use crate::constraints::ConstraintViolation;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unsupported model: '{0}'")]
    UnknownModel(String),

    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),
}
