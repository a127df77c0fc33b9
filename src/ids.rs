// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

/// The account-number namespace is only 10^6 values, so allocation is
/// bounded: after this many collisions the attempt fails with a conflict.
pub const MAX_ACCOUNT_NUMBER_ATTEMPTS: usize = 20;

static ACCOUNT_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^01\d{6}$").unwrap());
static USER_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^usr-[A-Za-z0-9]+$").unwrap());
static TRANSACTION_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^tan-[A-Za-z0-9]+$").unwrap());

/// `usr-` followed by 16 lowercase hex characters.
pub fn generate_user_id() -> String {
    format!("usr-{:016x}", rand::random::<u64>())
}

/// `tan-` followed by 16 lowercase hex characters. The namespace is
/// effectively unbounded, so no collision handling happens here; the
/// storage layer's uniqueness constraint is the backstop.
pub fn generate_transaction_id() -> String {
    format!("tan-{:016x}", rand::random::<u64>())
}

/// `01` followed by six random decimal digits, zero-padded.
pub fn generate_account_number() -> String {
    format!("01{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

pub fn is_valid_account_number(s: &str) -> bool {
    ACCOUNT_NUMBER_RE.is_match(s)
}

pub fn is_valid_user_id(s: &str) -> bool {
    USER_ID_RE.is_match(s)
}

pub fn is_valid_transaction_id(s: &str) -> bool {
    TRANSACTION_ID_RE.is_match(s)
}

/// Receives the collision count of the bounded account-number retry loop.
/// Injected so callers decide where the signal goes; the default routes
/// to `tracing`.
pub trait RetryObserver {
    fn collision(&mut self, attempt: usize, max: usize);
}

/// Default observer: structured warn per collision.
pub struct TracingObserver;

impl RetryObserver for TracingObserver {
    fn collision(&mut self, attempt: usize, max: usize) {
        tracing::warn!(attempt, max, "account number collision");
    }
}

/// Allocate an account number not yet present in storage.
///
/// `exists` is consulted once per candidate; every taken candidate is
/// reported to `observer` before the next draw. Exhausting
/// [`MAX_ACCOUNT_NUMBER_ATTEMPTS`] fails with `Conflict`.
pub fn allocate_account_number<E>(
    mut exists: E,
    observer: &mut dyn RetryObserver,
) -> Result<String, LedgerError>
where
    E: FnMut(&str) -> Result<bool, LedgerError>,
{
    for attempt in 1..=MAX_ACCOUNT_NUMBER_ATTEMPTS {
        let candidate = generate_account_number();
        if !exists(&candidate)? {
            return Ok(candidate);
        }
        observer.collision(attempt, MAX_ACCOUNT_NUMBER_ATTEMPTS);
    }
    Err(LedgerError::Conflict(format!(
        "unable to allocate a unique account number after {} attempts",
        MAX_ACCOUNT_NUMBER_ATTEMPTS
    )))
}
