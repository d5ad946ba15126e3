pub mod config;
pub mod errors;
pub mod market;
pub mod models;
pub mod services;
pub mod storage;

use config::LedgerConfig;
use errors::CoreError;
use market::drift::{apply_change, PriceDrift, UniformDrift};
use market::Market;
use models::{
    instrument::Instrument,
    portfolio::{Holdings, PortfolioRow, TradeReceipt},
    transaction::TransactionRecord,
};
use services::ledger_service::{LedgerService, TradePlan};
use storage::store::Store;
use tracing::{debug, info, warn};

/// Main entry point for the stock-sim core library.
///
/// Owns the cash balance, the holdings, the instrument prices and the
/// database connection. Construct one per process and hand it to the
/// presentation layer by reference; re-read the queries after every trade.
#[must_use]
pub struct Ledger {
    config: LedgerConfig,
    balance: f64,
    holdings: Holdings,
    market: Market,
    store: Store,
    drift: Box<dyn PriceDrift + Send>,
    ledger_service: LedgerService,
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("balance", &self.balance)
            .field("holdings", &self.holdings)
            .field("instruments", &self.market.instruments())
            .field("database_url", &self.config.database_url)
            .finish()
    }
}

impl Ledger {
    /// Open the store and start a fresh session with entropy-seeded prices.
    pub async fn open(config: LedgerConfig) -> Result<Self, CoreError> {
        Self::open_with_drift(config, UniformDrift::new()).await
    }

    /// Open with a caller-supplied price drift (seeded or fixed for tests).
    pub async fn open_with_drift(
        config: LedgerConfig,
        drift: impl PriceDrift + Send + 'static,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        let store = Store::open(&config.database_url).await?;

        info!(
            balance = config.starting_balance,
            instruments = config.instruments.len(),
            "ledger opened"
        );

        Ok(Self {
            balance: config.starting_balance,
            holdings: Holdings::new(),
            market: Market::new(config.instruments.clone()),
            store,
            drift: Box::new(drift),
            ledger_service: LedgerService::new(),
            config,
        })
    }

    /// Close the database connection.
    pub async fn close(self) -> Result<(), CoreError> {
        self.store.close().await
    }

    // ── Trading ─────────────────────────────────────────────────────

    /// Buy `quantity` shares of `symbol` at its current price.
    ///
    /// On success the cost is debited, the holding credited, a BUY record
    /// logged and the instrument's price moved. On failure nothing changes.
    pub async fn buy(&mut self, symbol: &str, quantity: u32) -> Result<TradeReceipt, CoreError> {
        let plan = self.market.resolve(symbol).and_then(|instrument| {
            self.ledger_service
                .plan_buy(self.balance, &self.holdings, instrument, quantity)
        });
        self.execute(plan).await
    }

    /// Sell `quantity` shares of `symbol` at its current price.
    ///
    /// On success the proceeds are credited, the holding reduced, a SELL
    /// record logged and the instrument's price moved. On failure nothing
    /// changes.
    pub async fn sell(&mut self, symbol: &str, quantity: u32) -> Result<TradeReceipt, CoreError> {
        let plan = self.market.resolve(symbol).and_then(|instrument| {
            self.ledger_service
                .plan_sell(self.balance, &self.holdings, instrument, quantity)
        });
        self.execute(plan).await
    }

    /// Buy with a raw, user-entered quantity string.
    pub async fn buy_input(&mut self, symbol: &str, quantity: &str) -> Result<TradeReceipt, CoreError> {
        let quantity = self.ledger_service.parse_quantity(quantity)?;
        self.buy(symbol, quantity).await
    }

    /// Sell with a raw, user-entered quantity string.
    pub async fn sell_input(&mut self, symbol: &str, quantity: &str) -> Result<TradeReceipt, CoreError> {
        let quantity = self.ledger_service.parse_quantity(quantity)?;
        self.sell(symbol, quantity).await
    }

    /// Commit a validated plan: write the record and the moved price in one
    /// database transaction, then apply the plan in memory.
    async fn execute(&mut self, plan: Result<TradePlan, CoreError>) -> Result<TradeReceipt, CoreError> {
        let plan = match plan {
            Ok(plan) => plan,
            Err(e) => {
                warn!(error = %e, "trade rejected");
                return Err(e);
            }
        };

        let change_pct = self.drift.change_pct(self.config.max_price_move_pct);
        let new_price = apply_change(plan.price, change_pct);

        let record = self
            .store
            .commit_trade(&plan.symbol, plan.quantity, plan.action, new_price)
            .await?;

        self.balance = plan.balance_after;
        self.holdings
            .set(&plan.symbol, plan.holding_after, self.config.retain_zero_holdings);
        self.market.set_price(&plan.symbol, new_price)?;

        debug!(
            symbol = %plan.symbol,
            old_price = plan.price,
            new_price,
            change_pct,
            "price moved"
        );

        Ok(TradeReceipt {
            record,
            execution_price: plan.price,
            amount: plan.amount,
            new_price,
            balance_after: plan.balance_after,
            holding_after: plan.holding_after,
        })
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Every trade ever committed to the store, oldest first.
    /// Read from the database on each call.
    pub async fn transaction_history(&mut self) -> Result<Vec<TransactionRecord>, CoreError> {
        self.store.transactions().await
    }

    /// Persisted instrument prices joined with the live holding quantities.
    ///
    /// Built from the `stocks` table, so it lists every instrument that has
    /// been traded (quantity 0 if no longer held) and none that has not.
    pub async fn portfolio_snapshot(&mut self) -> Result<Vec<PortfolioRow>, CoreError> {
        let prices = self.store.prices().await?;
        Ok(prices
            .into_iter()
            .map(|instrument| PortfolioRow {
                quantity: self.holdings.quantity(&instrument.symbol),
                symbol: instrument.symbol,
                price: instrument.price,
            })
            .collect())
    }

    #[must_use]
    pub fn balance(&self) -> f64 {
        self.balance
    }

    #[must_use]
    pub fn holdings(&self) -> &Holdings {
        &self.holdings
    }

    /// Shares held of `symbol` (case-insensitive); 0 if none.
    #[must_use]
    pub fn holding(&self, symbol: &str) -> u32 {
        self.holdings
            .quantity(&models::instrument::normalize_symbol(symbol))
    }

    /// The fixed instrument list with live prices.
    #[must_use]
    pub fn instruments(&self) -> &[Instrument] {
        self.market.instruments()
    }

    /// Live price of a known instrument.
    pub fn quote(&self, symbol: &str) -> Result<f64, CoreError> {
        self.market.resolve(symbol).map(|i| i.price)
    }

    /// Cash plus all holdings at live prices.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.ledger_service
            .total_value(self.balance, &self.holdings, self.market.instruments())
    }

    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }
}
