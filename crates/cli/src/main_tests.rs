// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;
use yare::parameterized;

use super::*;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("stalk").chain(args.iter().copied()))
}

#[test]
fn put_uses_protocol_defaults() {
    let cli = parse(&["put", "hello"]).unwrap();
    let Command::Put(args) = cli.command else {
        panic!("expected put");
    };
    assert_eq!(args.body, "hello");
    assert_eq!(args.priority, 65536);
    assert_eq!(args.delay, 0);
    assert_eq!(args.ttr, 60);
}

#[test]
fn global_flags_follow_subcommand() {
    let cli = parse(&["reserve", "--timeout", "5", "--watch", "a", "--watch", "b", "-o", "json"])
        .unwrap();
    assert_eq!(cli.connection.watch, vec!["a", "b"]);
    assert_eq!(cli.output, OutputFormat::Json);
    let Command::Reserve(args) = cli.command else {
        panic!("expected reserve");
    };
    assert_eq!(args.timeout, Some(5));
    assert!(!args.delete);
}

#[test]
fn reserve_job_excludes_timeout() {
    assert!(parse(&["reserve", "--job", "3", "--timeout", "1"]).is_err());
}

#[parameterized(
    by_id = { &["peek", "7"] },
    ready = { &["peek", "--ready"] },
    delayed = { &["peek", "--delayed"] },
    buried = { &["peek", "--buried"] },
)]
fn peek_takes_one_selector(args: &[&str]) {
    assert!(parse(args).is_ok());
}

#[parameterized(
    none = { &["peek"] },
    two_flags = { &["peek", "--ready", "--buried"] },
    id_and_flag = { &["peek", "3", "--delayed"] },
)]
fn peek_rejects_bad_selection(args: &[&str]) {
    assert!(parse(args).is_err());
}

#[test]
fn stats_job_excludes_tube() {
    assert!(parse(&["stats", "--job", "1", "--tube", "x"]).is_err());
    assert!(parse(&["stats", "--tube", "x"]).is_ok());
}

#[test]
fn kick_job_is_kebab_case() {
    let cli = parse(&["kick-job", "12"]).unwrap();
    assert!(matches!(cli.command, Command::KickJob { id: 12 }));
}

#[test]
fn unknown_output_format_is_rejected() {
    assert!(parse(&["-o", "yaml", "tubes"]).is_err());
}
