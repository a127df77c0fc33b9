// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Every account carries the same sort code in this design.
pub const SORT_CODE: &str = "10-10-10";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {field} '{value}'")]
pub struct ParseEnumError {
    pub field: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Personal,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Personal => f.write_str("personal"),
        }
    }
}

impl FromStr for AccountType {
    type Err = ParseEnumError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal" => Ok(AccountType::Personal),
            other => Err(ParseEnumError {
                field: "account type",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    GBP,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::GBP => f.write_str("GBP"),
        }
    }
}

impl FromStr for Currency {
    type Err = ParseEnumError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GBP" => Ok(Currency::GBP),
            other => Err(ParseEnumError {
                field: "currency",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Deposit => f.write_str("deposit"),
            TransactionType::Withdrawal => f.write_str("withdrawal"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = ParseEnumError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(TransactionType::Deposit),
            "withdrawal" => Ok(TransactionType::Withdrawal),
            other => Err(ParseEnumError {
                field: "transaction type",
                value: other.to_string(),
            }),
        }
    }
}

/// A bank account. `balance` is mutated only through the ledger's
/// transaction path; it is never directly settable.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub account_number: String,
    pub sort_code: String,
    pub name: String,
    pub account_type: AccountType,
    pub balance: Money,
    pub currency: Currency,
    pub user_id: String,
    pub created_timestamp: DateTime<Utc>,
    pub updated_timestamp: DateTime<Utc>,
}

/// A committed money movement. Immutable once written.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub transaction_id: String,
    pub amount: Money,
    pub currency: Currency,
    pub transaction_type: TransactionType,
    /// Absent when the caller supplied nothing or an empty string.
    pub reference: Option<String>,
    pub user_id: String,
    pub account_number: String,
    pub created_timestamp: DateTime<Utc>,
}

/// Ownership anchor for accounts. Credential material lives upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub created_timestamp: DateTime<Utc>,
    pub updated_timestamp: DateTime<Utc>,
}
