use thiserror::Error;

/// Typed outcomes for every ledger-affecting operation.
///
/// `Store` wraps driver-level failures (connectivity, timeouts). All
/// mutating operations commit atomically, so a `Store` error before commit
/// leaves no partial state and the whole operation is safe to retry.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("out of stock")]
    OutOfStock,

    #[error("code already used")]
    AlreadyUsed,

    #[error("code usage limit reached")]
    Exhausted,

    #[error("order already resolved")]
    AlreadyResolved,

    #[error("daily bonus already claimed")]
    AlreadyClaimed,

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("store unavailable: {0}")]
    Store(#[from] sqlx::Error),
}

impl StoreError {
    /// Whether the caller may safely retry the whole operation.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Store(_))
    }
}
