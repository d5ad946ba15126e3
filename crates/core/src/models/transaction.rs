use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeAction {
    /// Shares bought with cash
    Buy,
    /// Shares sold for cash
    Sell,
}

impl TradeAction {
    /// Text stored in the `transactions.action` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(TradeAction::Buy),
            "SELL" => Ok(TradeAction::Sell),
            other => Err(CoreError::CorruptRecord(format!(
                "unknown transaction action '{other}'"
            ))),
        }
    }
}

/// One row of the append-only transaction log.
///
/// Records are created by the store inside the same database transaction as
/// the price update of the trade, and are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Row id assigned by the database (monotonically increasing)
    pub id: i64,

    pub symbol: String,

    /// Number of shares traded (always positive)
    pub quantity: u32,

    pub action: TradeAction,

    /// Insertion time, assigned by the database (UTC, second precision)
    pub timestamp: NaiveDateTime,
}
