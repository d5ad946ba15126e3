//! SQLite layout: a `stocks` price table upserted on every trade and an
//! append-only `transactions` log.

/// Current price per traded instrument.
pub const CREATE_STOCKS: &str = r"
    CREATE TABLE IF NOT EXISTS stocks (
        id INTEGER PRIMARY KEY,
        symbol TEXT UNIQUE,
        price REAL
    )
";

/// One row per executed trade. `timestamp` is filled in by SQLite.
pub const CREATE_TRANSACTIONS: &str = r"
    CREATE TABLE IF NOT EXISTS transactions (
        id INTEGER PRIMARY KEY,
        symbol TEXT,
        quantity INTEGER,
        action TEXT,
        timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
    )
";

pub const UPSERT_PRICE: &str = r"
    INSERT INTO stocks (symbol, price) VALUES (?1, ?2)
    ON CONFLICT(symbol) DO UPDATE SET price = excluded.price
";

pub const INSERT_TRANSACTION: &str = r"
    INSERT INTO transactions (symbol, quantity, action) VALUES (?1, ?2, ?3)
    RETURNING id, timestamp
";

pub const SELECT_TRANSACTIONS: &str = r"
    SELECT id, symbol, quantity, action, timestamp FROM transactions ORDER BY id
";

pub const SELECT_PRICES: &str = r"
    SELECT symbol, price FROM stocks ORDER BY symbol
";
