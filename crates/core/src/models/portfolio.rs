use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::transaction::{TradeAction, TransactionRecord};

/// Quantity held per instrument symbol.
///
/// A symbol that is absent and a symbol held at zero both read as `0`.
/// Whether a zero entry is kept after selling down is decided by the caller
/// of [`Holdings::set`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holdings {
    entries: BTreeMap<String, u32>,
}

impl Holdings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity held for `symbol` (0 when absent).
    pub fn quantity(&self, symbol: &str) -> u32 {
        self.entries.get(symbol).copied().unwrap_or(0)
    }

    /// True if an entry exists for `symbol`, even a zero one.
    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    /// Overwrite the quantity for `symbol`.
    /// A zero quantity removes the entry unless `retain_zero` is set.
    pub fn set(&mut self, symbol: &str, quantity: u32, retain_zero: bool) {
        if quantity == 0 && !retain_zero {
            self.entries.remove(symbol);
        } else {
            self.entries.insert(symbol.to_string(), quantity);
        }
    }

    /// Iterate `(symbol, quantity)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(s, q)| (s.as_str(), *q))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One line of the portfolio view: a persisted instrument price joined with
/// the live holding quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRow {
    pub symbol: String,
    pub price: f64,
    pub quantity: u32,
}

/// Result of a successful buy or sell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeReceipt {
    /// The logged transaction
    pub record: TransactionRecord,

    /// Price per share the trade executed at (the pre-trade price)
    pub execution_price: f64,

    /// Cash moved: cost for a buy, proceeds for a sell (always positive)
    pub amount: f64,

    /// Instrument price after the post-trade drift
    pub new_price: f64,

    /// Cash balance after the trade
    pub balance_after: f64,

    /// Holding quantity of the traded symbol after the trade
    pub holding_after: u32,
}

impl TradeReceipt {
    pub fn action(&self) -> TradeAction {
        self.record.action
    }
}
