// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::target::Target;

#[test]
fn any_routes_under_query_and_modify() {
    assert_eq!(route(Namespace::Query, &Target::Any), "jobs.query._any");
    assert_eq!(route(Namespace::Modify, &Target::Any), "jobs.modify._any");
}

#[test]
fn all_routes_to_broadcast_subject() {
    assert_eq!(route(Namespace::Query, &Target::All), "jobs.query._all");
}

#[test]
fn host_routes_with_sanitized_hostname() {
    let subject = route(Namespace::Modify, &Target::host("web-1.prod"));
    assert_eq!(subject, "jobs.modify.host.web-1_prod");
}

#[test]
fn label_routes_with_full_dotted_value() {
    let subject = route(Namespace::Query, &Target::label("group", "web.dev.us-east"));
    assert_eq!(subject, "jobs.query.label.group.web.dev.us-east");
}

#[test]
fn label_prefix_hierarchy_has_one_subject_per_depth() {
    let subjects = label_prefix_subjects(Namespace::Query, "group", "web.dev.us-east");
    assert_eq!(
        subjects,
        vec![
            "jobs.query.label.group.web",
            "jobs.query.label.group.web.dev",
            "jobs.query.label.group.web.dev.us-east",
        ]
    );
}

#[test]
fn label_prefix_hierarchy_single_segment() {
    let subjects = label_prefix_subjects(Namespace::Modify, "tier", "gold");
    assert_eq!(subjects, vec!["jobs.modify.label.tier.gold"]);
}

#[test]
fn publish_to_any_prefix_depth_is_in_the_subscribed_set() {
    let subjects = label_prefix_subjects(Namespace::Query, "group", "web.dev.us-east");
    let publish_to_mid_depth = route(Namespace::Query, &Target::label("group", "web.dev"));
    assert!(subjects.contains(&publish_to_mid_depth));
}
