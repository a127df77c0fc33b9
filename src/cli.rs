// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{arg, ArgAction, Command};

fn json_flag() -> clap::Arg {
    arg!(--json "Print JSON instead of a table").action(ArgAction::SetTrue)
}

pub fn build_cli() -> Command {
    Command::new("ledgerbank")
        .about("Retail banking core: users, accounts, deposits and withdrawals")
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("user")
                .about("Manage users")
                .subcommand(
                    Command::new("create")
                        .about("Register a user")
                        .arg(arg!(--name <NAME> "Full name").required(true))
                        .arg(arg!(--email <EMAIL> "Email address").required(true))
                        .arg(arg!(--phone <PHONE> "Phone number, E.164 form").required(true))
                        .arg(arg!(--address <ADDRESS> "Postal address").required(true))
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show a user")
                        .arg(arg!(<user_id> "Customer-facing user id (usr-...)"))
                        .arg(arg!(--user <USER_ID> "Requesting user id").required(true))
                        .arg(json_flag()),
                ),
        )
        .subcommand(
            Command::new("account")
                .about("Manage bank accounts")
                .subcommand(
                    Command::new("open")
                        .about("Open a new account")
                        .arg(arg!(--user <USER_ID> "Owning user id").required(true))
                        .arg(arg!(--name <NAME> "Account name").required(true))
                        .arg(
                            clap::Arg::new("type")
                                .long("type")
                                .value_name("TYPE")
                                .default_value("personal")
                                .help("Account type"),
                        )
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show one account")
                        .arg(arg!(<account_number> "Account number (01......)"))
                        .arg(arg!(--user <USER_ID> "Requesting user id").required(true))
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("list")
                        .about("List the requesting user's accounts")
                        .arg(arg!(--user <USER_ID> "Requesting user id").required(true))
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("update")
                        .about("Update account name and/or type")
                        .arg(arg!(<account_number> "Account number (01......)"))
                        .arg(arg!(--user <USER_ID> "Requesting user id").required(true))
                        .arg(arg!(--name <NAME> "New account name"))
                        .arg(
                            clap::Arg::new("type")
                                .long("type")
                                .value_name("TYPE")
                                .help("New account type"),
                        )
                        .arg(json_flag()),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Deposits and withdrawals")
                .subcommand(
                    Command::new("deposit")
                        .about("Deposit into an account")
                        .arg(arg!(<account_number> "Account number (01......)"))
                        .arg(arg!(--user <USER_ID> "Requesting user id").required(true))
                        .arg(arg!(--amount <AMOUNT> "Amount, e.g. 100.00").required(true))
                        .arg(arg!(--reference <REFERENCE> "Optional reference"))
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("withdraw")
                        .about("Withdraw from an account")
                        .arg(arg!(<account_number> "Account number (01......)"))
                        .arg(arg!(--user <USER_ID> "Requesting user id").required(true))
                        .arg(arg!(--amount <AMOUNT> "Amount, e.g. 30.00").required(true))
                        .arg(arg!(--reference <REFERENCE> "Optional reference"))
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("list")
                        .about("List an account's transactions, newest first")
                        .arg(arg!(<account_number> "Account number (01......)"))
                        .arg(arg!(--user <USER_ID> "Requesting user id").required(true))
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show one transaction")
                        .arg(arg!(<account_number> "Account number (01......)"))
                        .arg(arg!(<transaction_id> "Transaction id (tan-...)"))
                        .arg(arg!(--user <USER_ID> "Requesting user id").required(true))
                        .arg(json_flag()),
                ),
        )
}
