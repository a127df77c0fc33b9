// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Ledgerbank", "ledgerbank"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("ledgerbank.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    open_at(&path)
}

pub fn open_at(path: &Path) -> Result<Connection> {
    let mut conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

/// Schema-initialized in-memory database; the tests run against this.
pub fn open_in_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory().context("Open in-memory DB")?;
    init_schema(&mut conn)?;
    Ok(conn)
}

fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS users(
        user_id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        phone_number TEXT NOT NULL,
        address TEXT NOT NULL,
        created_timestamp TEXT NOT NULL,
        updated_timestamp TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS accounts(
        account_number TEXT PRIMARY KEY,
        sort_code TEXT NOT NULL,
        name TEXT NOT NULL,
        account_type TEXT NOT NULL,
        balance TEXT NOT NULL, -- Money, 2-decimal TEXT
        currency TEXT NOT NULL,
        user_id TEXT NOT NULL,
        created_timestamp TEXT NOT NULL,
        updated_timestamp TEXT NOT NULL,
        FOREIGN KEY(user_id) REFERENCES users(user_id)
    );
    CREATE INDEX IF NOT EXISTS idx_accounts_user ON accounts(user_id);

    CREATE TABLE IF NOT EXISTS transactions(
        transaction_id TEXT PRIMARY KEY,
        amount TEXT NOT NULL, -- Money, 2-decimal TEXT
        currency TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('deposit','withdrawal')),
        reference TEXT,
        user_id TEXT NOT NULL,
        account_number TEXT NOT NULL,
        created_timestamp TEXT NOT NULL,
        FOREIGN KEY(account_number) REFERENCES accounts(account_number)
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_account ON transactions(account_number);
    "#,
    )?;
    Ok(())
}
