// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn empty_string_is_any() {
    assert_eq!("".parse::<Target>().unwrap(), Target::Any);
}

#[test]
fn explicit_any_and_all() {
    assert_eq!("_any".parse::<Target>().unwrap(), Target::Any);
    assert_eq!("_all".parse::<Target>().unwrap(), Target::All);
}

#[test]
fn host_prefix_form() {
    assert_eq!("host:server1".parse::<Target>().unwrap(), Target::host("server1"));
}

#[test]
fn bare_hostname_is_host_target() {
    assert_eq!("server1".parse::<Target>().unwrap(), Target::host("server1"));
}

#[test]
fn label_form_parses_key_and_dotted_value() {
    let t: Target = "label:group=web.dev.us-east".parse().unwrap();
    assert_eq!(t, Target::label("group", "web.dev.us-east"));
}

#[test]
fn label_without_separator_is_an_error() {
    assert!("label:group".parse::<Target>().is_err());
}

#[test]
fn label_with_empty_key_or_value_is_an_error() {
    assert!("label:=value".parse::<Target>().is_err());
    assert!("label:key=".parse::<Target>().is_err());
}

#[test]
fn unknown_underscore_token_is_rejected() {
    assert!("_bogus".parse::<Target>().is_err());
}

#[test]
fn display_round_trips_through_parse() {
    for t in [
        Target::Any,
        Target::All,
        Target::host("server1"),
        Target::label("group", "web.dev"),
    ] {
        let s = t.to_string();
        let parsed: Target = s.parse().unwrap();
        assert_eq!(parsed, t, "round trip through {s:?}");
    }
}

#[test]
fn serde_round_trips_as_tagged_string() {
    let t = Target::label("group", "web.dev.us-east");
    let json = serde_json::to_string(&t).unwrap();
    assert_eq!(json, "\"label:group=web.dev.us-east\"");
    let back: Target = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
}
