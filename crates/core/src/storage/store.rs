use chrono::NaiveDateTime;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};
use std::str::FromStr;
use tracing::{debug, info};

use crate::errors::CoreError;
use crate::models::instrument::Instrument;
use crate::models::transaction::{TradeAction, TransactionRecord};

use super::schema;

/// The ledger's single SQLite connection.
///
/// Opened once, held for the ledger's lifetime. All writes of one trade go
/// through [`Store::commit_trade`], which wraps them in one database
/// transaction.
pub struct Store {
    conn: SqliteConnection,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    /// Connect to `database_url` (creating the file if needed) and make sure
    /// both tables exist.
    pub async fn open(database_url: &str) -> Result<Self, CoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let mut conn = SqliteConnection::connect_with(&options).await?;

        sqlx::query(schema::CREATE_STOCKS).execute(&mut conn).await?;
        sqlx::query(schema::CREATE_TRANSACTIONS)
            .execute(&mut conn)
            .await?;

        info!(database_url, "ledger store opened");
        Ok(Self { conn })
    }

    /// Log one trade and store the instrument's new price, atomically.
    ///
    /// Either both rows are written or neither is.
    pub async fn commit_trade(
        &mut self,
        symbol: &str,
        quantity: u32,
        action: TradeAction,
        new_price: f64,
    ) -> Result<TransactionRecord, CoreError> {
        let mut tx = self.conn.begin().await?;

        let row = sqlx::query(schema::INSERT_TRANSACTION)
            .bind(symbol)
            .bind(i64::from(quantity))
            .bind(action.as_str())
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(schema::UPSERT_PRICE)
            .bind(symbol)
            .bind(new_price)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let record = TransactionRecord {
            id: row.try_get("id")?,
            symbol: symbol.to_string(),
            quantity,
            action,
            timestamp: row.try_get("timestamp")?,
        };
        debug!(id = record.id, symbol, quantity, %action, new_price, "trade committed");
        Ok(record)
    }

    /// The full transaction log in insertion order.
    pub async fn transactions(&mut self) -> Result<Vec<TransactionRecord>, CoreError> {
        let rows = sqlx::query(schema::SELECT_TRANSACTIONS)
            .fetch_all(&mut self.conn)
            .await?;
        rows.iter().map(record_from_row).collect()
    }

    /// Every persisted instrument price, ordered by symbol.
    pub async fn prices(&mut self) -> Result<Vec<Instrument>, CoreError> {
        let rows = sqlx::query(schema::SELECT_PRICES)
            .fetch_all(&mut self.conn)
            .await?;
        rows.iter()
            .map(|row| -> Result<Instrument, CoreError> {
                Ok(Instrument {
                    symbol: row.try_get("symbol")?,
                    price: row.try_get("price")?,
                })
            })
            .collect()
    }

    /// Close the connection cleanly.
    pub async fn close(self) -> Result<(), CoreError> {
        self.conn.close().await?;
        Ok(())
    }
}

fn record_from_row(row: &SqliteRow) -> Result<TransactionRecord, CoreError> {
    let id: i64 = row.try_get("id")?;
    let quantity: i64 = row.try_get("quantity")?;
    let quantity = u32::try_from(quantity)
        .ok()
        .filter(|q| *q > 0)
        .ok_or_else(|| {
            CoreError::CorruptRecord(format!("transaction {id} has invalid quantity {quantity}"))
        })?;
    let action: String = row.try_get("action")?;
    let timestamp: NaiveDateTime = row.try_get("timestamp")?;

    Ok(TransactionRecord {
        id,
        symbol: row.try_get("symbol")?,
        quantity,
        action: action.parse()?,
        timestamp,
    })
}
