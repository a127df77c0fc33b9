// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The account ledger: the single authority for money movement.
//!
//! Every balance-affecting operation runs its load-compute-write sequence
//! inside one IMMEDIATE SQLite transaction, so concurrent writers
//! serialize and a failed operation leaves neither the balance nor the
//! transactions table touched. Ownership is checked strictly after
//! existence: a missing account is `NotFound`, an account owned by
//! someone else is `Forbidden`, in that order, for every operation.

use crate::error::LedgerError;
use crate::ids::{
    allocate_account_number, generate_transaction_id, RetryObserver, TracingObserver,
};
use crate::models::{Account, AccountType, Transaction, TransactionType, Currency, SORT_CODE};
use crate::money::Money;
use crate::store;
use chrono::Utc;
use rusqlite::{Connection, TransactionBehavior};

/// Reference strings longer than this are rejected outright.
const MAX_REFERENCE_LEN: usize = 255;

/// Partial update for [`update_account_metadata`]. `None` fields are
/// left as they are.
#[derive(Debug, Default, Clone)]
pub struct MetadataUpdate {
    pub name: Option<String>,
    pub account_type: Option<AccountType>,
}

/// Empty string and `None` both mean "no reference".
fn normalize_reference(reference: Option<String>) -> Result<Option<String>, LedgerError> {
    match reference {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) if s.len() > MAX_REFERENCE_LEN => Err(LedgerError::Validation(format!(
            "reference exceeds {MAX_REFERENCE_LEN} characters"
        ))),
        Some(s) => Ok(Some(s)),
    }
}

/// Open a new account owned by `owner_user_id`, with a freshly allocated
/// account number, zero balance, and GBP currency.
pub fn create_account(
    conn: &mut Connection,
    owner_user_id: &str,
    name: &str,
    account_type: AccountType,
) -> Result<Account, LedgerError> {
    create_account_with_observer(conn, owner_user_id, name, account_type, &mut TracingObserver)
}

/// [`create_account`] with an explicit collision observer for callers
/// that want the retry count routed elsewhere than `tracing`.
pub fn create_account_with_observer(
    conn: &mut Connection,
    owner_user_id: &str,
    name: &str,
    account_type: AccountType,
    observer: &mut dyn RetryObserver,
) -> Result<Account, LedgerError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    if !store::user_exists(&tx, owner_user_id)? {
        return Err(LedgerError::NotFound("user"));
    }
    let account_number =
        allocate_account_number(|n| store::account_number_exists(&tx, n), observer)?;
    let now = Utc::now();
    let account = Account {
        account_number,
        sort_code: SORT_CODE.to_string(),
        name: name.to_string(),
        account_type,
        balance: Money::ZERO,
        currency: Currency::GBP,
        user_id: owner_user_id.to_string(),
        created_timestamp: now,
        updated_timestamp: now,
    };
    store::insert_account(&tx, &account)?;
    tx.commit()?;
    tracing::info!(account_number = %account.account_number, "account created");
    Ok(account)
}

/// Apply a deposit or withdrawal to an account and record it.
///
/// The balance update and the transaction row commit as one unit; on any
/// failure the account is left exactly as it was and no row exists for
/// the attempt. A withdrawal that would drive the balance negative fails
/// with `InsufficientFunds` carrying both sides of the comparison.
pub fn apply_transaction(
    conn: &mut Connection,
    account_number: &str,
    requesting_user_id: &str,
    amount: Money,
    transaction_type: TransactionType,
    reference: Option<String>,
) -> Result<Transaction, LedgerError> {
    // Upstream schema validation should have caught both of these, but
    // the ledger re-checks before touching the balance.
    let amount = amount.validate_transaction_amount()?;
    let reference = normalize_reference(reference)?;

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let account = store::find_account(&tx, account_number)?
        .ok_or(LedgerError::NotFound("bank account"))?;
    if account.user_id != requesting_user_id {
        return Err(LedgerError::Forbidden("bank account"));
    }

    let new_balance = match transaction_type {
        TransactionType::Deposit => account
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Validation("balance overflow".to_string()))?,
        TransactionType::Withdrawal => {
            account
                .balance
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientFunds {
                    balance: account.balance,
                    requested: amount,
                })?
        }
    };

    let now = Utc::now();
    store::update_account_balance(&tx, account_number, new_balance, now)?;

    let record = Transaction {
        transaction_id: generate_transaction_id(),
        amount,
        currency: account.currency,
        transaction_type,
        reference,
        user_id: account.user_id,
        account_number: account_number.to_string(),
        created_timestamp: now,
    };
    store::insert_transaction(&tx, &record)?;
    tx.commit()?;

    tracing::info!(
        account_number,
        transaction_id = %record.transaction_id,
        kind = %record.transaction_type,
        amount = %record.amount,
        "transaction committed"
    );
    Ok(record)
}

/// Change an account's name and/or type. A request in which no provided
/// field differs from the stored value performs no write at all, so
/// `updated_timestamp` stays put.
pub fn update_account_metadata(
    conn: &mut Connection,
    account_number: &str,
    requesting_user_id: &str,
    changes: MetadataUpdate,
) -> Result<Account, LedgerError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let mut account = store::find_account(&tx, account_number)?
        .ok_or(LedgerError::NotFound("bank account"))?;
    if account.user_id != requesting_user_id {
        return Err(LedgerError::Forbidden("bank account"));
    }

    let mut changed = false;
    if let Some(name) = changes.name {
        if name != account.name {
            account.name = name;
            changed = true;
        }
    }
    if let Some(account_type) = changes.account_type {
        if account_type != account.account_type {
            account.account_type = account_type;
            changed = true;
        }
    }

    if !changed {
        // No-op update: the open transaction is dropped without a write.
        return Ok(account);
    }

    account.updated_timestamp = Utc::now();
    store::update_account_metadata(&tx, &account)?;
    tx.commit()?;
    Ok(account)
}

pub fn get_account(
    conn: &Connection,
    account_number: &str,
    requesting_user_id: &str,
) -> Result<Account, LedgerError> {
    let account = store::find_account(conn, account_number)?
        .ok_or(LedgerError::NotFound("bank account"))?;
    if account.user_id != requesting_user_id {
        return Err(LedgerError::Forbidden("bank account"));
    }
    Ok(account)
}

/// Accounts owned by the requesting user, newest-created-first.
pub fn list_accounts_for_user(
    conn: &Connection,
    requesting_user_id: &str,
) -> Result<Vec<Account>, LedgerError> {
    store::accounts_for_user(conn, requesting_user_id)
}

/// Transactions on an account, newest-created-first. Ownership-gated
/// like every other account operation.
pub fn list_transactions_for_account(
    conn: &Connection,
    account_number: &str,
    requesting_user_id: &str,
) -> Result<Vec<Transaction>, LedgerError> {
    get_account(conn, account_number, requesting_user_id)?;
    store::transactions_for_account(conn, account_number)
}

/// A single transaction, looked up through its account so the ownership
/// gate applies before the transaction itself is consulted.
pub fn get_transaction(
    conn: &Connection,
    account_number: &str,
    requesting_user_id: &str,
    transaction_id: &str,
) -> Result<Transaction, LedgerError> {
    get_account(conn, account_number, requesting_user_id)?;
    store::find_transaction(conn, account_number, transaction_id)?
        .ok_or(LedgerError::NotFound("transaction"))
}
