use crate::errors::CoreError;
use crate::models::instrument::Instrument;
use crate::models::portfolio::Holdings;
use crate::models::transaction::TradeAction;

/// The state a trade would leave the portfolio in, computed before anything
/// is written.
#[derive(Debug, Clone, PartialEq)]
pub struct TradePlan {
    pub symbol: String,
    pub quantity: u32,
    pub action: TradeAction,
    /// Price per share the trade executes at
    pub price: f64,
    /// Cash moved (cost of a buy, proceeds of a sell)
    pub amount: f64,
    pub balance_after: f64,
    pub holding_after: u32,
}

/// Validates buy/sell requests and computes their effect.
///
/// Pure business logic: no I/O, no randomness. The ledger commits a plan to
/// the store and only then applies it to its in-memory state.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Parse a user-entered quantity. Only positive whole numbers are accepted.
    pub fn parse_quantity(&self, input: &str) -> Result<u32, CoreError> {
        let trimmed = input.trim();
        let value: i64 = trimmed.parse().map_err(|_| {
            CoreError::InvalidQuantity(format!("'{trimmed}' is not a valid integer"))
        })?;
        let quantity = u32::try_from(value)
            .map_err(|_| CoreError::InvalidQuantity(format!("{value} is out of range")))?;
        Self::check_quantity(quantity)?;
        Ok(quantity)
    }

    /// Plan a purchase of `quantity` shares at the instrument's current price.
    ///
    /// Fails with `InsufficientFunds` when the cost exceeds `balance`.
    pub fn plan_buy(
        &self,
        balance: f64,
        holdings: &Holdings,
        instrument: &Instrument,
        quantity: u32,
    ) -> Result<TradePlan, CoreError> {
        Self::check_quantity(quantity)?;

        let cost = instrument.price * f64::from(quantity);
        if cost > balance {
            return Err(CoreError::InsufficientFunds {
                symbol: instrument.symbol.clone(),
                quantity,
                cost,
                balance,
            });
        }

        let held = holdings.quantity(&instrument.symbol);
        let holding_after = held.checked_add(quantity).ok_or_else(|| {
            CoreError::InvalidQuantity(format!(
                "holding of {} would exceed {}",
                instrument.symbol,
                u32::MAX
            ))
        })?;

        Ok(TradePlan {
            symbol: instrument.symbol.clone(),
            quantity,
            action: TradeAction::Buy,
            price: instrument.price,
            amount: cost,
            balance_after: balance - cost,
            holding_after,
        })
    }

    /// Plan a sale of `quantity` shares at the instrument's current price.
    ///
    /// Fails with `InsufficientHoldings` when fewer shares are held
    /// (including never having bought the instrument).
    pub fn plan_sell(
        &self,
        balance: f64,
        holdings: &Holdings,
        instrument: &Instrument,
        quantity: u32,
    ) -> Result<TradePlan, CoreError> {
        Self::check_quantity(quantity)?;

        let held = holdings.quantity(&instrument.symbol);
        if held < quantity {
            return Err(CoreError::InsufficientHoldings {
                symbol: instrument.symbol.clone(),
                requested: quantity,
                held,
            });
        }

        let proceeds = instrument.price * f64::from(quantity);
        Ok(TradePlan {
            symbol: instrument.symbol.clone(),
            quantity,
            action: TradeAction::Sell,
            price: instrument.price,
            amount: proceeds,
            balance_after: balance + proceeds,
            holding_after: held - quantity,
        })
    }

    /// Cash plus every holding marked at its instrument's live price.
    /// Holdings without a known instrument count as zero.
    pub fn total_value(&self, balance: f64, holdings: &Holdings, instruments: &[Instrument]) -> f64 {
        holdings
            .iter()
            .filter_map(|(symbol, quantity)| {
                instruments
                    .iter()
                    .find(|i| i.symbol == symbol)
                    .map(|i| i.price * f64::from(quantity))
            })
            .fold(balance, |acc, value| acc + value)
    }

    fn check_quantity(quantity: u32) -> Result<(), CoreError> {
        if quantity == 0 {
            return Err(CoreError::InvalidQuantity(
                "quantity must be a positive integer".into(),
            ));
        }
        Ok(())
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
