// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the environment module.

use std::io::Write as _;
use std::path::{MAIN_SEPARATOR_STR, Path};

use super::compose::{EnvSources, split_list};
use super::current_env;
use super::file::EnvFileSpec;
use super::list::EnvList;
use super::resolver::Resolver;
use super::separators::Separators;
use crate::error::EnvError;

/// Rewrites `/` the way the host resolver does.
fn native(text: &str) -> String {
    text.replace('/', MAIN_SEPARATOR_STR)
}

fn env_of(entries: &[&str]) -> EnvList {
    entries.iter().copied().collect()
}

/// Resolver with Windows-style separators, regardless of the host.
fn windows_style() -> Resolver {
    Resolver::builder()
        .with_separators(Separators::new('\\', ';'))
        .build()
}

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create fixture dir");
    }
    let mut file = std::fs::File::create(&path).expect("failed to create fixture");
    file.write_all(content.as_bytes())
        .expect("failed to write fixture");
    path
}

// =============================================================================
// EnvList lookup
// =============================================================================

#[test]
fn test_lookup_last_entry_wins() {
    let env = env_of(&["A=first", "B=other", "A=second"]);
    assert_eq!(env.get("A"), Some("second"));
    assert_eq!(env.get("B"), Some("other"));
    assert_eq!(env.get("C"), None);
    assert_eq!(env.len(), 3, "earlier entries stay in the list");
}

#[test]
fn test_lookup_trims_and_skips_malformed() {
    let env = env_of(&["  A = abc ", "A=x=y", "NOEQUALS", "=empty"]);
    // "A=x=y" is later but holds two '=' and is ignored
    assert_eq!(env.get("A"), Some("abc"));
    assert_eq!(env.get("NOEQUALS"), None);
    assert_eq!(env.get(""), Some("empty"));
}

#[test]
fn test_pairs_split_at_first_equals() {
    let env = env_of(&["A=1", "URL=http://x?a=b", "BROKEN", "=nokey"]);
    let pairs: Vec<_> = env.pairs().collect();
    assert_eq!(pairs, vec![("A", "1"), ("URL", "http://x?a=b")]);
}

#[test]
fn test_current_env_has_path() {
    let env = current_env();
    assert!(
        env.get("PATH").is_some() || env.get("Path").is_some(),
        "PATH should exist in current environment"
    );
}

#[cfg(unix)]
#[test]
fn test_env_from_os_skips_non_utf8() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt as _;

    let vars = vec![
        (OsString::from("GOOD"), OsString::from("1")),
        (OsString::from_vec(b"BAD\xff".to_vec()), OsString::from("2")),
        (OsString::from("RAW"), OsString::from_vec(vec![b'v', 0xfe])),
        (OsString::from("LAST"), OsString::from("3")),
    ];
    let env = super::env_from_os(vars);
    assert_eq!(env.iter().collect::<Vec<_>>(), ["GOOD=1", "LAST=3"]);
}

// =============================================================================
// Separators
// =============================================================================

#[test]
fn test_normalize_synthetic_separators() {
    let separators = Separators::new('\\', ';');
    assert_eq!(separators.normalize("a/b:c/d"), "a\\b;c\\d");
    assert_eq!(separators.normalize("plain"), "plain");
}

#[test]
fn test_normalize_generic_is_identity() {
    let separators = Separators::generic();
    assert_eq!(separators.normalize("a/b:c"), "a/b:c");
}

#[test]
fn test_normalize_idempotent() {
    let separators = Separators::new('\\', ';');
    let once = separators.normalize("x/y:z").into_owned();
    assert_eq!(separators.normalize(&once), once);
}

#[test]
fn test_host_separators() {
    let host = Separators::host();
    assert_eq!(host.path(), std::path::MAIN_SEPARATOR);
    assert_eq!(host.list(), if cfg!(windows) { ';' } else { ':' });
}

// =============================================================================
// Expansion
// =============================================================================

#[test]
fn test_expand_references() {
    let resolver = Resolver::default();
    let env = env_of(&["A=abc", "B_2=def"]);
    assert_eq!(resolver.expand("$A-$B_2", &env).unwrap(), "abc-def");
    assert_eq!(resolver.expand("$MISSING!", &env).unwrap(), "!");
    assert_eq!(resolver.expand("cost $ 5", &env).unwrap(), "cost $ 5");
}

#[test]
fn test_expand_rescans_substituted_values() {
    let resolver = Resolver::default();
    let env = env_of(&["INNER=deep", "OUTER=$INNER"]);
    assert_eq!(resolver.expand("$OUTER", &env).unwrap(), "deep");
}

#[test]
fn test_expand_cycle_hits_limit() {
    let resolver = Resolver::builder().with_max_expansions(16).build();
    let env = env_of(&["LOOP=x$LOOP"]);
    let err = resolver.expand("$LOOP", &env).unwrap_err();
    assert!(matches!(err, EnvError::ExpansionLimit { limit: 16, .. }));
}

#[test]
fn test_expand_limit_counts_substitutions() {
    let resolver = Resolver::builder().with_max_expansions(2).build();
    let env = env_of(&["A=a"]);
    assert_eq!(resolver.expand("$A$A", &env).unwrap(), "aa");
    assert!(resolver.expand("$A$A$A", &env).is_err());
}

// =============================================================================
// Quote-aware conversion
// =============================================================================

#[test]
fn test_convert_skips_quoted_spans() {
    let resolver = windows_style();
    let env = env_of(&["HOST=example.org"]);
    let converted = resolver
        .convert("`https://`$HOST/a:`$HOST`", &env)
        .unwrap();
    assert_eq!(converted, "https://example.org\\a;$HOST");
}

#[test]
fn test_convert_does_not_normalize_expanded_values() {
    let resolver = windows_style();
    let env = env_of(&["ROOT=Z:/vfx"]);
    assert_eq!(resolver.convert("$ROOT/bin", &env).unwrap(), "Z:/vfx\\bin");
}

#[test]
fn test_convert_unterminated_quote() {
    let resolver = Resolver::default();
    let err = resolver.convert("a`b", &EnvList::new()).unwrap_err();
    assert!(matches!(err, EnvError::UnterminatedQuote { .. }));
}

#[test]
fn test_convert_limit_spans_quoted_segments() {
    let env = env_of(&["X=x"]);

    let one = Resolver::builder().with_max_expansions(1).build();
    let err = one.convert("$X`q`$X`q`$X", &env).unwrap_err();
    assert!(matches!(err, EnvError::ExpansionLimit { limit: 1, .. }));

    let three = Resolver::builder().with_max_expansions(3).build();
    assert_eq!(three.convert("$X`q`$X`q`$X", &env).unwrap(), "xqxqx");
    assert_eq!(one.convert("$X`$X`", &env).unwrap(), "x$X");
}

#[test]
fn test_assignment_limit_covers_whole_value() {
    let resolver = Resolver::builder()
        .with_separators(Separators::generic())
        .with_max_expansions(1)
        .build();
    let env = env_of(&["X=x"]);
    let err = resolver.parse_assignment("K=$X`q`$X`q`$X", &env).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"variable expansion exceeded 1 substitutions: K=$X`q`$X`q`$X");
}

#[test]
fn test_convert_empty_quotes() {
    let resolver = Resolver::default();
    assert_eq!(resolver.convert("a``b", &EnvList::new()).unwrap(), "ab");
}

// =============================================================================
// Assignment parsing
// =============================================================================

#[test]
fn test_parse_assignment_cases() {
    let resolver = Resolver::default();
    let cases: [(&str, &[&str], String); 6] = [
        ("TEST=abc", &[], "TEST=abc".to_string()),
        ("TEST=$A", &["A=abc"], "TEST=abc".to_string()),
        ("TEST=$B", &["A=abc"], "TEST=".to_string()),
        ("TEST=$A/$B", &["A=abc"], format!("TEST={}", native("abc/"))),
        (
            "TEST=$A/$B",
            &["A=abc", "B=def"],
            format!("TEST={}", native("abc/def")),
        ),
        (
            "TEST=$A/$B",
            &["  A = abc ", " B =def  "],
            format!("TEST={}", native("abc/def")),
        ),
    ];

    for (line, env, want) in cases {
        let got = resolver
            .parse_assignment(line, &env_of(env))
            .unwrap_or_else(|e| panic!("parse_assignment({line:?}, {env:?}): {e}"));
        assert_eq!(got, want, "parse_assignment({line:?}, {env:?})");
    }
}

#[test]
fn test_parse_assignment_trims() {
    let resolver = Resolver::default();
    assert_eq!(
        resolver.parse_assignment("  A = abc ", &EnvList::new()).unwrap(),
        "A=abc"
    );
}

#[test]
fn test_parse_assignment_quoted_url() {
    let resolver = windows_style();
    assert_eq!(
        resolver
            .parse_assignment("SITE=`https://host/path`", &EnvList::new())
            .unwrap(),
        "SITE=https://host/path"
    );
    assert_eq!(
        resolver.parse_assignment("DIR=a/b", &EnvList::new()).unwrap(),
        "DIR=a\\b"
    );
}

#[test]
fn test_parse_assignment_errors() {
    let resolver = Resolver::default();
    let env = EnvList::new();

    let err = resolver.parse_assignment("A=b=c", &env).unwrap_err();
    assert!(matches!(err, EnvError::MalformedAssignment { hint: None, .. }));

    let err = resolver.parse_assignment("novalue", &env).unwrap_err();
    assert!(matches!(err, EnvError::MalformedAssignment { hint: None, .. }));

    let err = resolver.parse_assignment("  =abc", &env).unwrap_err();
    assert!(matches!(err, EnvError::EmptyKey { .. }));

    let err = resolver.parse_assignment("$A=abc", &env).unwrap_err();
    assert!(matches!(err, EnvError::KeyContainsMarker { ref key } if key == "$A"));

    let err = resolver.parse_assignment("A=`abc", &env).unwrap_err();
    assert!(matches!(err, EnvError::UnterminatedQuote { ref text } if text == "A=`abc"));
}

#[test]
fn test_parse_assignment_file_hints() {
    let resolver = Resolver::default();
    let env = EnvList::new();

    let err = resolver.parse_assignment(" site.env ", &env).unwrap_err();
    assert!(matches!(
        err,
        EnvError::MalformedAssignment { hint: Some(hint), .. } if hint.contains("--envfile")
    ));

    let err = resolver.parse_assignment("site.envs", &env).unwrap_err();
    assert!(matches!(
        err,
        EnvError::MalformedAssignment { hint: Some(hint), .. } if hint.contains("--envset")
    ));
}

// =============================================================================
// Env files
// =============================================================================

#[test]
fn test_parse_env_text_accumulates() {
    let resolver = Resolver::default();
    let text = "# comment\n\n  A = a \nB=$A$BASE\r\n   # indented comment\nC=$B\n";
    let env = env_of(&["BASE=base"]);

    let parsed = resolver
        .parse_env_text(Path::new("inline.env"), text, &env)
        .unwrap();
    assert_eq!(parsed, vec!["A=a", "B=abase", "C=abase"]);
    assert_eq!(env.len(), 1, "caller's list is not modified");
}

#[test]
fn test_parse_env_text_aborts_on_bad_line() {
    let resolver = Resolver::default();
    let text = "A=a\nB=`b\nC=c\n";

    let err = resolver
        .parse_env_text(Path::new("bad.env"), text, &EnvList::new())
        .unwrap_err();
    assert!(matches!(err, EnvError::Line { line: 2, .. }));
    assert!(matches!(err.root(), EnvError::UnterminatedQuote { .. }));
}

#[test]
fn test_load_env_file() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = write_file(dir.path(), "app.env", "NAME=app\nGREETING=hello $NAME\n");

    let resolver = Resolver::default();
    let parsed = resolver.load_env_file(&path, &EnvList::new()).unwrap();
    assert_eq!(parsed, vec!["NAME=app", "GREETING=hello app"]);
}

#[test]
fn test_load_env_file_not_found() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let missing = dir.path().join("missing.env");
    let resolver = Resolver::default();

    let err = resolver.load_env_file(&missing, &EnvList::new()).unwrap_err();
    assert!(matches!(err, EnvError::FileNotFound { .. }));

    let required = EnvFileSpec::required(&missing);
    assert!(
        resolver
            .load_env_spec(&required, &EnvList::new())
            .unwrap_err()
            .is_not_found()
    );

    let optional = EnvFileSpec::optional(&missing);
    let parsed = resolver.load_env_spec(&optional, &EnvList::new()).unwrap();
    assert!(parsed.is_empty());
}

#[test]
fn test_load_env_file_read_error_not_suppressed() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let resolver = Resolver::default();

    // Reading a directory fails with something other than NotFound
    let spec = EnvFileSpec::optional(dir.path());
    let err = resolver.load_env_spec(&spec, &EnvList::new()).unwrap_err();
    assert!(matches!(err, EnvError::FileRead { .. }));
}

#[test]
fn test_load_env_file_optional_parse_error_propagates() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = write_file(dir.path(), "bad.env", "oops\n");
    let resolver = Resolver::default();

    let err = resolver
        .load_env_spec(&EnvFileSpec::optional(&path), &EnvList::new())
        .unwrap_err();
    assert!(matches!(err.root(), EnvError::MalformedAssignment { .. }));
}

// =============================================================================
// Env file specs and env-set files
// =============================================================================

#[test]
fn test_env_file_spec_parse() {
    let cases = [
        ("a.env", "a.env", false),
        ("a.env?", "a.env", true),
        ("?a.env", "a.env", true),
        (" ?a.env? ", "a.env", true),
    ];
    for (text, path, optional) in cases {
        let spec = EnvFileSpec::parse(text);
        assert_eq!(spec.path(), Path::new(path), "{text}");
        assert_eq!(spec.is_optional(), optional, "{text}");
    }
    assert_eq!(EnvFileSpec::parse("?x.env").to_string(), "x.env?");
}

#[test]
fn test_parse_envset_text() {
    let resolver = Resolver::builder()
        .with_separators(Separators::generic())
        .build();
    let env = env_of(&["ROOT=site", "PROGRAM=maya"]);
    let text = "# site files\n$ROOT/all.env\n\n$ROOT/$PROGRAM/all.env?\n?$ROOT/`odd:name`.env\n";

    let specs = resolver
        .parse_envset_text(Path::new("site.envs"), text, &env)
        .unwrap();
    assert_eq!(
        specs,
        vec![
            EnvFileSpec::required("site/all.env"),
            EnvFileSpec::optional("site/maya/all.env"),
            EnvFileSpec::optional("site/odd:name.env"),
        ]
    );
}

#[test]
fn test_load_envset_file_optional_missing() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let resolver = Resolver::default();
    let missing = dir.path().join("none.envs");

    let specs = resolver
        .load_envset_file(&EnvFileSpec::optional(&missing), &EnvList::new())
        .unwrap();
    assert!(specs.is_empty());

    let err = resolver
        .load_envset_file(&EnvFileSpec::required(&missing), &EnvList::new())
        .unwrap_err();
    assert!(err.is_not_found());
}

// =============================================================================
// Composition
// =============================================================================

#[test]
fn test_split_list() {
    let items: Vec<_> = split_list(" A=1, ,B=2 ,").collect();
    assert_eq!(items, vec!["A=1", "B=2"]);
}

#[test]
fn test_compose_precedence() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let root = dir.path().display().to_string();
    write_file(dir.path(), "base.env", "LEVEL=base\nFROM_BASE=$NAME\n");
    write_file(dir.path(), "late.env", "LEVEL=late-$LEVEL\n");
    write_file(
        dir.path(),
        "set.envs",
        &format!("`{root}`/base.env\n`{root}`/missing.env?\n"),
    );

    let sources = EnvSources::new()
        .with_assignments("NAME=inline, LEVEL=$HOME_LEVEL")
        .with_envsets(&format!("{root}/set.envs"))
        .with_envfiles(&format!("{root}/late.env"));

    let resolver = Resolver::builder()
        .with_separators(Separators::generic())
        .build();
    let composed = resolver
        .compose(env_of(&["HOME_LEVEL=home"]), &sources)
        .unwrap();

    assert_eq!(
        composed.added(),
        [
            "NAME=inline",
            "LEVEL=home",
            "LEVEL=base",
            "FROM_BASE=inline",
            "LEVEL=late-base",
        ]
    );
    assert_eq!(composed.env().get("LEVEL"), Some("late-base"));
    assert_eq!(composed.env().len(), 6);
}

#[test]
fn test_compose_stops_at_first_error() {
    let sources = EnvSources::new()
        .with_assignments("A=1")
        .with_envfiles("definitely-missing-envrun-file.env");

    let err = Resolver::default()
        .compose(EnvList::new(), &sources)
        .unwrap_err();
    assert!(err.is_not_found());
}
