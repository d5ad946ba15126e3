use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::CoreError;
use crate::models::instrument::{normalize_symbol, Instrument};

/// Cash the portfolio starts with.
pub const DEFAULT_STARTING_BALANCE: f64 = 10_000.0;

/// Largest post-trade price move, in percent, either direction.
pub const DEFAULT_MAX_PRICE_MOVE_PCT: f64 = 5.0;

/// Database file next to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://portfolio.db";

/// Private in-memory database, lost when the ledger is dropped.
pub const IN_MEMORY_DATABASE_URL: &str = "sqlite::memory:";

/// Everything needed to open a [`crate::Ledger`].
///
/// Missing fields fall back to the defaults, so a JSON file only needs the
/// values it wants to change:
///
/// ```json
/// { "database_url": "sqlite://sim.db", "starting_balance": 25000 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// sqlx SQLite URL; the file is created if missing.
    pub database_url: String,

    pub starting_balance: f64,

    /// The fixed instrument list with opening prices.
    pub instruments: Vec<Instrument>,

    pub max_price_move_pct: f64,

    /// Keep a zero entry in the holdings after selling a position down to
    /// nothing instead of removing it.
    pub retain_zero_holdings: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            starting_balance: DEFAULT_STARTING_BALANCE,
            instruments: default_instruments(),
            max_price_move_pct: DEFAULT_MAX_PRICE_MOVE_PCT,
            retain_zero_holdings: false,
        }
    }
}

/// AAPL 150, GOOGL 2500, MSFT 300.
pub fn default_instruments() -> Vec<Instrument> {
    vec![
        Instrument::new("AAPL", 150.0),
        Instrument::new("GOOGL", 2500.0),
        Instrument::new("MSFT", 300.0),
    ]
}

impl LedgerConfig {
    /// Default configuration backed by an in-memory database.
    pub fn in_memory() -> Self {
        Self {
            database_url: IN_MEMORY_DATABASE_URL.to_string(),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let mut config: LedgerConfig = serde_json::from_str(json)?;
        // Deserialization bypasses Instrument::new.
        for instrument in &mut config.instruments {
            *instrument = Instrument::new(instrument.symbol.as_str(), instrument.price);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject configurations the ledger invariants cannot hold under.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.database_url.trim().is_empty() {
            return Err(CoreError::InvalidConfig("database_url must not be empty".into()));
        }
        if !self.starting_balance.is_finite() || self.starting_balance < 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "starting_balance must be a non-negative number, got {}",
                self.starting_balance
            )));
        }
        if !(0.0..100.0).contains(&self.max_price_move_pct) {
            return Err(CoreError::InvalidConfig(format!(
                "max_price_move_pct must be in [0, 100), got {}",
                self.max_price_move_pct
            )));
        }
        if self.instruments.is_empty() {
            return Err(CoreError::InvalidConfig("at least one instrument is required".into()));
        }

        let mut seen = HashSet::new();
        for instrument in &self.instruments {
            if instrument.symbol.is_empty() {
                return Err(CoreError::InvalidConfig("instrument symbol must not be empty".into()));
            }
            if instrument.symbol != normalize_symbol(&instrument.symbol) {
                return Err(CoreError::InvalidConfig(format!(
                    "instrument symbol '{}' must be uppercase without surrounding whitespace",
                    instrument.symbol
                )));
            }
            if !seen.insert(instrument.symbol.as_str()) {
                return Err(CoreError::InvalidConfig(format!(
                    "duplicate instrument symbol {}",
                    instrument.symbol
                )));
            }
            if !instrument.price.is_finite() || instrument.price <= 0.0 {
                return Err(CoreError::InvalidConfig(format!(
                    "price of {} must be positive, got {}",
                    instrument.symbol, instrument.price
                )));
            }
        }
        Ok(())
    }
}
