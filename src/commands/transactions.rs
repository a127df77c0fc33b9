// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::TransactionView;
use crate::ids::{is_valid_account_number, is_valid_transaction_id, is_valid_user_id};
use crate::ledger;
use crate::models::{Transaction, TransactionType};
use crate::money::Money;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("deposit", sub)) => transact(conn, sub, TransactionType::Deposit)?,
        Some(("withdraw", sub)) => transact(conn, sub, TransactionType::Withdrawal)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn checked_path_params<'a>(sub: &'a clap::ArgMatches) -> Result<(&'a String, &'a String)> {
    let number = sub.get_one::<String>("account_number").unwrap();
    if !is_valid_account_number(number) {
        bail!("'{}' is not a valid account number", number);
    }
    let user = sub.get_one::<String>("user").unwrap();
    if !is_valid_user_id(user) {
        bail!("'{}' is not a valid user id", user);
    }
    Ok((number, user))
}

fn transaction_table(txs: &[Transaction]) -> comfy_table::Table {
    let rows = txs
        .iter()
        .map(TransactionView::from)
        .map(|v| {
            vec![
                v.id,
                v.transaction_type.to_string(),
                format!("{:.2}", v.amount),
                v.currency.to_string(),
                v.reference.unwrap_or_default(),
                v.created_timestamp,
            ]
        })
        .collect();
    pretty_table(&["ID", "Type", "Amount", "CCY", "Reference", "Created"], rows)
}

fn transact(conn: &mut Connection, sub: &clap::ArgMatches, kind: TransactionType) -> Result<()> {
    let (number, user) = checked_path_params(sub)?;
    let amount = Money::from_decimal_str(sub.get_one::<String>("amount").unwrap())?;
    let reference = sub.get_one::<String>("reference").cloned();
    let tx = ledger::apply_transaction(conn, number, user, amount, kind, reference)?;
    if !maybe_print_json(sub.get_flag("json"), &TransactionView::from(&tx))? {
        println!(
            "Recorded {} of {} on {} ({})",
            tx.transaction_type, tx.amount, number, tx.transaction_id
        );
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (number, user) = checked_path_params(sub)?;
    let txs = ledger::list_transactions_for_account(conn, number, user)?;
    let views: Vec<TransactionView> = txs.iter().map(TransactionView::from).collect();
    if !maybe_print_json(sub.get_flag("json"), &views)? {
        println!("{}", transaction_table(&txs));
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (number, user) = checked_path_params(sub)?;
    let transaction_id = sub.get_one::<String>("transaction_id").unwrap();
    if !is_valid_transaction_id(transaction_id) {
        bail!("'{}' is not a valid transaction id", transaction_id);
    }
    let tx = ledger::get_transaction(conn, number, user, transaction_id)?;
    if !maybe_print_json(sub.get_flag("json"), &TransactionView::from(&tx))? {
        println!("{}", transaction_table(std::slice::from_ref(&tx)));
    }
    Ok(())
}
