use thiserror::Error;

/// Unified error type for the entire stock-sim-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Trading ─────────────────────────────────────────────────────
    #[error("Insufficient funds to buy {quantity} shares of {symbol} (cost {cost:.2}, balance {balance:.2})")]
    InsufficientFunds {
        symbol: String,
        quantity: u32,
        cost: f64,
        balance: f64,
    },

    #[error("Not enough shares of {symbol} to sell (requested {requested}, held {held})")]
    InsufficientHoldings {
        symbol: String,
        requested: u32,
        held: u32,
    },

    #[error("Invalid stock symbol: {0}")]
    UnknownSymbol(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Storage ─────────────────────────────────────────────────────
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
}

impl CoreError {
    /// True for rejections caused by the request itself (bad input, not enough
    /// cash or shares). These leave the ledger untouched and are safe to show
    /// to the user as-is.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CoreError::InsufficientFunds { .. }
                | CoreError::InsufficientHoldings { .. }
                | CoreError::UnknownSymbol(_)
                | CoreError::InvalidQuantity(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<sqlx::Error> for CoreError {
    fn from(e: sqlx::Error) -> Self {
        CoreError::Storage(e.to_string())
    }
}
