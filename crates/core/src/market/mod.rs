pub mod drift;

use crate::errors::CoreError;
use crate::models::instrument::{normalize_symbol, Instrument};

/// The fixed set of tradable instruments with their live simulated prices.
///
/// Instruments are created once from configuration and never removed; only
/// their prices change, one trade at a time.
#[derive(Debug, Clone)]
pub struct Market {
    instruments: Vec<Instrument>,
}

impl Market {
    pub fn new(instruments: Vec<Instrument>) -> Self {
        Self { instruments }
    }

    /// All instruments in configuration order.
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Case-insensitive lookup.
    pub fn get(&self, symbol: &str) -> Option<&Instrument> {
        let symbol = normalize_symbol(symbol);
        self.instruments.iter().find(|i| i.symbol == symbol)
    }

    /// Like [`Market::get`] but fails with `UnknownSymbol`.
    pub fn resolve(&self, symbol: &str) -> Result<&Instrument, CoreError> {
        self.get(symbol)
            .ok_or_else(|| CoreError::UnknownSymbol(symbol.trim().to_string()))
    }

    /// Overwrite the live price of a known instrument.
    pub fn set_price(&mut self, symbol: &str, price: f64) -> Result<(), CoreError> {
        let symbol = normalize_symbol(symbol);
        let instrument = self
            .instruments
            .iter_mut()
            .find(|i| i.symbol == symbol)
            .ok_or(CoreError::UnknownSymbol(symbol))?;
        instrument.price = price;
        Ok(())
    }
}
