// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Row-level access to the accounts, transactions, and users tables.
//!
//! Everything here takes a plain `&Connection`, so the same helpers work
//! inside a `rusqlite::Transaction` (which derefs to `Connection`) when
//! the ledger needs several of them to commit as one unit.

use crate::error::LedgerError;
use crate::models::{Account, AccountType, Currency, Transaction, TransactionType, User};
use crate::money::Money;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::str::FromStr;

fn bad_column(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

const ACCOUNT_COLS: &str =
    "account_number, sort_code, name, account_type, balance, currency, user_id, \
     created_timestamp, updated_timestamp";

fn account_from_row(r: &Row) -> rusqlite::Result<Account> {
    let account_type: String = r.get(3)?;
    let balance: String = r.get(4)?;
    let currency: String = r.get(5)?;
    Ok(Account {
        account_number: r.get(0)?,
        sort_code: r.get(1)?,
        name: r.get(2)?,
        account_type: AccountType::from_str(&account_type).map_err(|e| bad_column(3, e))?,
        balance: Money::from_db_str(&balance).map_err(|e| bad_column(4, e))?,
        currency: Currency::from_str(&currency).map_err(|e| bad_column(5, e))?,
        user_id: r.get(6)?,
        created_timestamp: r.get(7)?,
        updated_timestamp: r.get(8)?,
    })
}

pub fn account_number_exists(conn: &Connection, account_number: &str) -> Result<bool, LedgerError> {
    let hit: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM accounts WHERE account_number=?1",
            params![account_number],
            |r| r.get(0),
        )
        .optional()?;
    Ok(hit.is_some())
}

pub fn find_account(
    conn: &Connection,
    account_number: &str,
) -> Result<Option<Account>, LedgerError> {
    let sql = format!("SELECT {ACCOUNT_COLS} FROM accounts WHERE account_number=?1");
    let account = conn
        .query_row(&sql, params![account_number], account_from_row)
        .optional()?;
    Ok(account)
}

pub fn insert_account(conn: &Connection, account: &Account) -> Result<(), LedgerError> {
    conn.execute(
        "INSERT INTO accounts(account_number, sort_code, name, account_type, balance, currency, \
         user_id, created_timestamp, updated_timestamp) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            account.account_number,
            account.sort_code,
            account.name,
            account.account_type.to_string(),
            account.balance.to_db_string(),
            account.currency.to_string(),
            account.user_id,
            account.created_timestamp,
            account.updated_timestamp,
        ],
    )?;
    Ok(())
}

pub fn update_account_balance(
    conn: &Connection,
    account_number: &str,
    balance: Money,
    updated: DateTime<Utc>,
) -> Result<(), LedgerError> {
    conn.execute(
        "UPDATE accounts SET balance=?1, updated_timestamp=?2 WHERE account_number=?3",
        params![balance.to_db_string(), updated, account_number],
    )?;
    Ok(())
}

pub fn update_account_metadata(conn: &Connection, account: &Account) -> Result<(), LedgerError> {
    conn.execute(
        "UPDATE accounts SET name=?1, account_type=?2, updated_timestamp=?3 \
         WHERE account_number=?4",
        params![
            account.name,
            account.account_type.to_string(),
            account.updated_timestamp,
            account.account_number,
        ],
    )?;
    Ok(())
}

/// All accounts owned by a user, newest-created-first.
pub fn accounts_for_user(conn: &Connection, user_id: &str) -> Result<Vec<Account>, LedgerError> {
    let sql = format!(
        "SELECT {ACCOUNT_COLS} FROM accounts WHERE user_id=?1 \
         ORDER BY created_timestamp DESC, rowid DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], account_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

const TRANSACTION_COLS: &str =
    "transaction_id, amount, currency, type, reference, user_id, account_number, \
     created_timestamp";

fn transaction_from_row(r: &Row) -> rusqlite::Result<Transaction> {
    let amount: String = r.get(1)?;
    let currency: String = r.get(2)?;
    let kind: String = r.get(3)?;
    Ok(Transaction {
        transaction_id: r.get(0)?,
        amount: Money::from_db_str(&amount).map_err(|e| bad_column(1, e))?,
        currency: Currency::from_str(&currency).map_err(|e| bad_column(2, e))?,
        transaction_type: TransactionType::from_str(&kind).map_err(|e| bad_column(3, e))?,
        reference: r.get(4)?,
        user_id: r.get(5)?,
        account_number: r.get(6)?,
        created_timestamp: r.get(7)?,
    })
}

pub fn insert_transaction(conn: &Connection, tx: &Transaction) -> Result<(), LedgerError> {
    conn.execute(
        "INSERT INTO transactions(transaction_id, amount, currency, type, reference, user_id, \
         account_number, created_timestamp) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            tx.transaction_id,
            tx.amount.to_db_string(),
            tx.currency.to_string(),
            tx.transaction_type.to_string(),
            tx.reference,
            tx.user_id,
            tx.account_number,
            tx.created_timestamp,
        ],
    )?;
    Ok(())
}

pub fn find_transaction(
    conn: &Connection,
    account_number: &str,
    transaction_id: &str,
) -> Result<Option<Transaction>, LedgerError> {
    let sql = format!(
        "SELECT {TRANSACTION_COLS} FROM transactions \
         WHERE account_number=?1 AND transaction_id=?2"
    );
    let tx = conn
        .query_row(&sql, params![account_number, transaction_id], transaction_from_row)
        .optional()?;
    Ok(tx)
}

/// All transactions for an account, newest-created-first.
pub fn transactions_for_account(
    conn: &Connection,
    account_number: &str,
) -> Result<Vec<Transaction>, LedgerError> {
    let sql = format!(
        "SELECT {TRANSACTION_COLS} FROM transactions WHERE account_number=?1 \
         ORDER BY created_timestamp DESC, rowid DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![account_number], transaction_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

fn user_from_row(r: &Row) -> rusqlite::Result<User> {
    Ok(User {
        user_id: r.get(0)?,
        name: r.get(1)?,
        email: r.get(2)?,
        phone_number: r.get(3)?,
        address: r.get(4)?,
        created_timestamp: r.get(5)?,
        updated_timestamp: r.get(6)?,
    })
}

pub fn insert_user(conn: &Connection, user: &User) -> Result<(), LedgerError> {
    conn.execute(
        "INSERT INTO users(user_id, name, email, phone_number, address, created_timestamp, \
         updated_timestamp) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user.user_id,
            user.name,
            user.email,
            user.phone_number,
            user.address,
            user.created_timestamp,
            user.updated_timestamp,
        ],
    )?;
    Ok(())
}

pub fn find_user(conn: &Connection, user_id: &str) -> Result<Option<User>, LedgerError> {
    let user = conn
        .query_row(
            "SELECT user_id, name, email, phone_number, address, created_timestamp, \
             updated_timestamp FROM users WHERE user_id=?1",
            params![user_id],
            user_from_row,
        )
        .optional()?;
    Ok(user)
}

pub fn user_exists(conn: &Connection, user_id: &str) -> Result<bool, LedgerError> {
    let hit: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM users WHERE user_id=?1",
            params![user_id],
            |r| r.get(0),
        )
        .optional()?;
    Ok(hit.is_some())
}

pub fn email_exists(conn: &Connection, email: &str) -> Result<bool, LedgerError> {
    let hit: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM users WHERE email=?1",
            params![email],
            |r| r.get(0),
        )
        .optional()?;
    Ok(hit.is_some())
}

pub fn phone_exists(conn: &Connection, phone_number: &str) -> Result<bool, LedgerError> {
    let hit: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM users WHERE phone_number=?1",
            params![phone_number],
            |r| r.get(0),
        )
        .optional()?;
    Ok(hit.is_some())
}
