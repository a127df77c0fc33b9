// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! User creation and lookup. Users anchor account ownership; credential
//! handling (password hashing, token issuance) lives upstream of this
//! crate entirely.

use crate::error::LedgerError;
use crate::ids::generate_user_id;
use crate::models::User;
use crate::store;
use chrono::Utc;
use rusqlite::{Connection, TransactionBehavior};

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
}

/// Register a user. Email is normalized to lowercase; duplicate email or
/// phone number is a conflict. The uniqueness check and the insert share
/// one transaction so two concurrent registrations cannot both pass.
pub fn create_user(conn: &mut Connection, new: NewUser) -> Result<User, LedgerError> {
    let email = new.email.to_lowercase();
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    if store::email_exists(&tx, &email)? {
        return Err(LedgerError::Conflict(
            "a user with this email already exists".to_string(),
        ));
    }
    if store::phone_exists(&tx, &new.phone_number)? {
        return Err(LedgerError::Conflict(
            "a user with this phone number already exists".to_string(),
        ));
    }
    let now = Utc::now();
    let user = User {
        user_id: generate_user_id(),
        name: new.name,
        email,
        phone_number: new.phone_number,
        address: new.address,
        created_timestamp: now,
        updated_timestamp: now,
    };
    store::insert_user(&tx, &user)?;
    tx.commit()?;
    tracing::info!(user_id = %user.user_id, "user created");
    Ok(user)
}

/// Fetch a user. Callers may only fetch themselves: a missing user is
/// `NotFound`, an existing user other than the requester is `Forbidden`.
pub fn get_user(
    conn: &Connection,
    user_id: &str,
    requesting_user_id: &str,
) -> Result<User, LedgerError> {
    let user = store::find_user(conn, user_id)?.ok_or(LedgerError::NotFound("user"))?;
    if user.user_id != requesting_user_id {
        return Err(LedgerError::Forbidden("user"));
    }
    Ok(user)
}
