// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::run::{RunStatus, render_entries, resolve_environment};
use crate::cli::run::RunArgs;
use crate::config::Config;
use crate::config::types::PrintFormat;
use crate::core::env::list::EnvList;

fn generic_config(extra: &str) -> Config {
    Config::parse(&format!(
        "[separators]\npath = \"/\"\nlist = \":\"\n{extra}"
    ))
    .unwrap()
}

#[test]
fn test_render_plain() {
    let entries = vec!["A=1".to_string(), "B=x/y".to_string()];
    insta::assert_snapshot!(render_entries(&entries, PrintFormat::Plain).unwrap(), @r"
    A=1
    B=x/y
    ");
    assert_eq!(render_entries(&[], PrintFormat::Plain).unwrap(), "");
}

#[test]
fn test_render_json() {
    let entries = vec!["A=1".to_string(), "Q=say \"hi\"".to_string()];
    insta::assert_snapshot!(render_entries(&entries, PrintFormat::Json).unwrap(), @r#"
    [
      "A=1",
      "Q=say \"hi\""
    ]
    "#);
}

#[test]
fn test_exit_codes() {
    assert_eq!(RunStatus::Printed.exit_code(), 0);
    assert_eq!(RunStatus::Exited(0).exit_code(), 0);
    assert_eq!(RunStatus::Exited(42).exit_code(), 42);
    assert_eq!(RunStatus::Exited(-1).exit_code(), 1);
    assert_eq!(RunStatus::Exited(70000).exit_code(), 1);
    assert_eq!(RunStatus::Interrupted.exit_code(), 130);
}

#[test]
fn test_configured_sources_come_first() {
    let config = generic_config("[sources]\nenv = [\"ROOT=/opt\"]\n");
    let args = RunArgs {
        env: vec!["BIN=$ROOT/bin,ROOT=/srv".to_string()],
        ..RunArgs::default()
    };

    let composed = resolve_environment(&args, &config, EnvList::new()).unwrap();
    assert_eq!(composed.added(), ["ROOT=/opt", "BIN=/opt/bin", "ROOT=/srv"]);
    assert_eq!(composed.env().get("ROOT"), Some("/srv"));
}

#[test]
fn test_resolve_on_top_of_base() {
    let config = generic_config("");
    let args = RunArgs {
        env: vec!["PATH=$HOME/bin:$PATH".to_string()],
        ..RunArgs::default()
    };
    let base: EnvList = ["HOME=/home/u", "PATH=/usr/bin"].into_iter().collect();

    let composed = resolve_environment(&args, &config, base).unwrap();
    assert_eq!(composed.added(), ["PATH=/home/u/bin:/usr/bin"]);
    assert_eq!(composed.env().len(), 3);
}

#[test]
fn test_resolve_reports_source_errors() {
    let config = generic_config("");
    let args = RunArgs {
        env: vec!["A=`open".to_string()],
        ..RunArgs::default()
    };

    let err = resolve_environment(&args, &config, EnvList::new()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"env error: quote(`) not terminated: A=`open");
}

#[test]
fn test_expansion_limit_from_config() {
    let config = generic_config("[expand]\nmax_expansions = 2\n");
    let args = RunArgs {
        env: vec!["A=$A$A".to_string()],
        ..RunArgs::default()
    };
    let base: EnvList = ["A=$A"].into_iter().collect();

    let err = resolve_environment(&args, &config, base).unwrap_err();
    assert!(err.to_string().starts_with("env error: variable expansion exceeded 2"));
}
