// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Wire views of the domain entities: camelCase field names, money as a
//! plain 2-decimal number, RFC 3339 timestamps, and `reference` omitted
//! outright when absent rather than serialized as null.

use crate::models::{Account, AccountType, Currency, Transaction, TransactionType, User};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub account_number: String,
    pub sort_code: String,
    pub name: String,
    pub account_type: AccountType,
    pub balance: f64,
    pub currency: Currency,
    pub user_id: String,
    pub created_timestamp: String,
    pub updated_timestamp: String,
}

impl From<&Account> for AccountView {
    fn from(a: &Account) -> Self {
        AccountView {
            account_number: a.account_number.clone(),
            sort_code: a.sort_code.clone(),
            name: a.name.clone(),
            account_type: a.account_type,
            balance: a.balance.to_api_number(),
            currency: a.currency,
            user_id: a.user_id.clone(),
            created_timestamp: a.created_timestamp.to_rfc3339(),
            updated_timestamp: a.updated_timestamp.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    /// The customer-facing transaction id, renamed `id` on the wire.
    pub id: String,
    pub amount: f64,
    pub currency: Currency,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub user_id: String,
    pub account_number: String,
    pub created_timestamp: String,
}

impl From<&Transaction> for TransactionView {
    fn from(t: &Transaction) -> Self {
        TransactionView {
            id: t.transaction_id.clone(),
            amount: t.amount.to_api_number(),
            currency: t.currency,
            transaction_type: t.transaction_type,
            reference: t.reference.clone(),
            user_id: t.user_id.clone(),
            account_number: t.account_number.clone(),
            created_timestamp: t.created_timestamp.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub created_timestamp: String,
    pub updated_timestamp: String,
}

impl From<&User> for UserView {
    fn from(u: &User) -> Self {
        UserView {
            user_id: u.user_id.clone(),
            name: u.name.clone(),
            email: u.email.clone(),
            phone_number: u.phone_number.clone(),
            address: u.address.clone(),
            created_timestamp: u.created_timestamp.to_rfc3339(),
            updated_timestamp: u.updated_timestamp.to_rfc3339(),
        }
    }
}
