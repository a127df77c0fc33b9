// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::AccountView;
use crate::ids::{is_valid_account_number, is_valid_user_id};
use crate::ledger::{self, MetadataUpdate};
use crate::models::{Account, AccountType};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{bail, Result};
use rusqlite::Connection;
use std::str::FromStr;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("open", sub)) => open(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn requesting_user(sub: &clap::ArgMatches) -> Result<&String> {
    let user = sub.get_one::<String>("user").unwrap();
    if !is_valid_user_id(user) {
        bail!("'{}' is not a valid user id", user);
    }
    Ok(user)
}

fn path_account_number(sub: &clap::ArgMatches) -> Result<&String> {
    let number = sub.get_one::<String>("account_number").unwrap();
    if !is_valid_account_number(number) {
        bail!("'{}' is not a valid account number", number);
    }
    Ok(number)
}

fn account_table(accounts: &[Account]) -> comfy_table::Table {
    let rows = accounts
        .iter()
        .map(AccountView::from)
        .map(|v| {
            vec![
                v.account_number,
                v.sort_code,
                v.name,
                v.account_type.to_string(),
                format!("{:.2}", v.balance),
                v.currency.to_string(),
                v.updated_timestamp,
            ]
        })
        .collect();
    pretty_table(
        &["Number", "Sort code", "Name", "Type", "Balance", "CCY", "Updated"],
        rows,
    )
}

fn open(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = requesting_user(sub)?;
    let name = sub.get_one::<String>("name").unwrap();
    let account_type = AccountType::from_str(sub.get_one::<String>("type").unwrap())?;
    let account = ledger::create_account(conn, user, name, account_type)?;
    if !maybe_print_json(sub.get_flag("json"), &AccountView::from(&account))? {
        println!(
            "Opened account {} (sort code {}) for {}",
            account.account_number, account.sort_code, account.user_id
        );
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = requesting_user(sub)?;
    let number = path_account_number(sub)?;
    let account = ledger::get_account(conn, number, user)?;
    if !maybe_print_json(sub.get_flag("json"), &AccountView::from(&account))? {
        println!("{}", account_table(std::slice::from_ref(&account)));
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = requesting_user(sub)?;
    let accounts = ledger::list_accounts_for_user(conn, user)?;
    let views: Vec<AccountView> = accounts.iter().map(AccountView::from).collect();
    if !maybe_print_json(sub.get_flag("json"), &views)? {
        println!("{}", account_table(&accounts));
    }
    Ok(())
}

fn update(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = requesting_user(sub)?;
    let number = path_account_number(sub)?;
    let account_type = match sub.get_one::<String>("type") {
        Some(s) => Some(AccountType::from_str(s)?),
        None => None,
    };
    let changes = MetadataUpdate {
        name: sub.get_one::<String>("name").cloned(),
        account_type,
    };
    let account = ledger::update_account_metadata(conn, number, user, changes)?;
    if !maybe_print_json(sub.get_flag("json"), &AccountView::from(&account))? {
        println!("{}", account_table(std::slice::from_ref(&account)));
    }
    Ok(())
}
