// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Record id")
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .help("Month as YYYY-MM (default: current month)")
}

pub fn build_cli() -> Command {
    Command::new("dompet")
        .about("Personal finance, bills, savings, notes and habits")
        .version(clap::crate_version!())
        .arg(
            Arg::new("today")
                .long("today")
                .global(true)
                .help("Evaluate as if today were YYYY-MM-DD"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("session")
                .about("Choose the user all records belong to")
                .subcommand(
                    Command::new("login").arg(Arg::new("user").required(true)),
                )
                .subcommand(Command::new("logout"))
                .subcommand(Command::new("whoami")),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-currency").arg(Arg::new("code").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Income and expense transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("type").long("type").required(true).help("income|expense"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD (default: today)"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .arg(month_arg())
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32))
                                .conflicts_with("month"),
                        )
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly spending ceilings per category")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(month_arg()),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(month_arg()),
                )
                .subcommand(json_args(Command::new("list").arg(month_arg())))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("report")
                .about("Totals, categories and chart series")
                .subcommand(json_args(
                    Command::new("summary").arg(month_arg()).arg(
                        Arg::new("top")
                            .long("top")
                            .value_parser(value_parser!(usize))
                            .default_value("3"),
                    ),
                ))
                .subcommand(json_args(Command::new("daily")))
                .subcommand(json_args(Command::new("monthly").arg(month_arg())))
                .subcommand(json_args(
                    Command::new("yearly").arg(
                        Arg::new("year")
                            .long("year")
                            .value_parser(value_parser!(i32)),
                    ),
                )),
        )
        .subcommand(
            Command::new("savings")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("deadline").long("deadline"))
                        .arg(Arg::new("icon").long("icon"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("deposit")
                        .arg(id_arg())
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(
                    Command::new("withdraw")
                        .arg(id_arg())
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("bill")
                .about("Recurring bills")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("due-day")
                                .long("due-day")
                                .required(true)
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(Arg::new("category").long("category").default_value("other"))
                        .arg(
                            Arg::new("once")
                                .long("once")
                                .action(ArgAction::SetTrue)
                                .help("Not a recurring bill"),
                        )
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .default_value("monthly"),
                        )
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("pay").arg(id_arg()))
                .subcommand(Command::new("reset").arg(id_arg()))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("note")
                .about("Notes with tags")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("content").long("content"))
                        .arg(Arg::new("tag").long("tag").action(ArgAction::Append)),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("title").long("title"))
                        .arg(Arg::new("content").long("content"))
                        .arg(Arg::new("tag").long("tag").action(ArgAction::Append))
                        .arg(
                            Arg::new("clear-tags")
                                .long("clear-tags")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .arg(Arg::new("search").long("search"))
                        .arg(
                            Arg::new("archived")
                                .long("archived")
                                .action(ArgAction::SetTrue),
                        ),
                ))
                .subcommand(Command::new("archive").arg(id_arg()))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("habit")
                .about("Daily habits")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("toggle")
                        .arg(id_arg())
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .arg(month_arg())
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out")),
                ),
        )
        .subcommand(json_args(
            Command::new("dashboard").about("This month at a glance"),
        ))
}
