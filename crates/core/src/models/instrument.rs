use serde::{Deserialize, Serialize};

/// A tradable symbol with a mutable simulated price.
///
/// The symbol is always stored uppercased so lookups from user input
/// ("aapl", " Aapl ") resolve to the same instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Ticker symbol, uppercased (e.g., "AAPL", "GOOGL", "MSFT")
    pub symbol: String,

    /// Current simulated price per share
    pub price: f64,
}

impl Instrument {
    pub fn new(symbol: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: normalize_symbol(&symbol.into()),
            price,
        }
    }
}

/// Canonical form of a user-entered symbol: surrounding whitespace removed, uppercased.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
