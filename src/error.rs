// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::money::{Money, MoneyError};
use thiserror::Error;

/// Typed failures surfaced by the ledger core.
///
/// Each variant maps to a distinct stable classification at the API
/// boundary, so callers can tell "this does not exist" from "you do not
/// own this" from "try again with different money".
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("not authorized to access this {0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("insufficient funds: current balance {balance}, withdrawal amount {requested}")]
    InsufficientFunds { balance: Money, requested: Money },

    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] MoneyError),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}

impl LedgerError {
    /// Stable machine-readable kind, independent of message wording.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::NotFound(_) => "not_found",
            LedgerError::Forbidden(_) => "forbidden",
            LedgerError::Conflict(_) => "conflict",
            LedgerError::InsufficientFunds { .. } => "insufficient_funds",
            LedgerError::InvalidAmount(_) => "invalid_amount",
            LedgerError::Validation(_) => "validation_failed",
            LedgerError::Storage(_) => "storage",
        }
    }
}
