use thiserror::Error;

/// Errors raised while assigning or rearranging display positions.
#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Entity not found: {0}")]
    NotFound(i64),
    #[error("Validation failed: target order {0} must be >= 1")]
    InvalidTarget(i64),
    #[error("Order already taken: {0}")]
    ConstraintViolation(String),
    #[error("Could not assign a unique order after {attempts} attempts")]
    SlotAssignmentExhausted { attempts: u32 },
    #[error("Order arithmetic overflowed")]
    Overflow,
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl OrderError {
    /// Whether resubmitting the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OrderError::SlotAssignmentExhausted { .. } | OrderError::ConstraintViolation(_)
        )
    }
}
