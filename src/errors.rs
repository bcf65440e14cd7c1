use thiserror::Error;
use uuid::Uuid;

/// Coarse error category callers can branch on without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Store,
}

/// Error type shared by the engine, the services and the store boundary.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Budget not found: {0}")]
    BudgetNotFound(Uuid),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Validation(_) => ErrorKind::Validation,
            CoreError::BudgetNotFound(_) | CoreError::TransactionNotFound(_) => {
                ErrorKind::NotFound
            }
            CoreError::Storage(_) | CoreError::Io(_) | CoreError::Serde(_) => ErrorKind::Store,
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_group_variants() {
        assert_eq!(
            CoreError::Validation("x".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            CoreError::TransactionNotFound(Uuid::nil()).kind(),
            ErrorKind::NotFound
        );
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        assert_eq!(CoreError::from(io).kind(), ErrorKind::Store);
    }

    #[test]
    fn messages_name_the_missing_id() {
        let id = Uuid::new_v4();
        let message = CoreError::BudgetNotFound(id).to_string();
        assert!(message.contains(&id.to_string()));
    }
}
