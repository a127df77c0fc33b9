// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::UserView;
use crate::ids::is_valid_user_id;
use crate::users::{self, NewUser};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("create", sub)) => create(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn create(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = users::create_user(
        conn,
        NewUser {
            name: sub.get_one::<String>("name").unwrap().clone(),
            email: sub.get_one::<String>("email").unwrap().clone(),
            phone_number: sub.get_one::<String>("phone").unwrap().clone(),
            address: sub.get_one::<String>("address").unwrap().clone(),
        },
    )?;
    let view = UserView::from(&user);
    if !maybe_print_json(sub.get_flag("json"), &view)? {
        println!("Created user {} ({})", view.user_id, view.email);
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = sub.get_one::<String>("user_id").unwrap();
    let as_user = sub.get_one::<String>("user").unwrap();
    if !is_valid_user_id(user_id) {
        bail!("'{}' is not a valid user id", user_id);
    }
    let user = users::get_user(conn, user_id, as_user)?;
    let view = UserView::from(&user);
    if !maybe_print_json(sub.get_flag("json"), &view)? {
        println!(
            "{}",
            pretty_table(
                &["User ID", "Name", "Email", "Phone", "Created"],
                vec![vec![
                    view.user_id,
                    view.name,
                    view.email,
                    view.phone_number,
                    view.created_timestamp,
                ]],
            )
        );
    }
    Ok(())
}
