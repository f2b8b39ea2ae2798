// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use fontmatch::{CompareOp, Edit, EditOp, MatchKind, Object, Qualifier, Rule, Test};

use crate::util::{config_with_rules, families, pattern};

/// A family "not equal" test with the `all` qualifier that finds the family
/// ends the whole substitution instead of only skipping its rule-list.
/// Later rule-lists never run. This is long standing behavior that
/// configurations rely on, so it is kept as is.
#[test]
fn issue_family_not_equal_all_stops_substitution() {
    let config = config_with_rules(
        MatchKind::Pattern,
        vec![
            vec![
                Rule::from(Test::new(
                    Object::Family,
                    Qualifier::All,
                    CompareOp::NotEqual,
                    "family2",
                )),
                Rule::from(Edit::new(Object::Family, EditOp::AppendLast, "first")),
            ],
            vec![Rule::from(Edit::new(Object::Family, EditOp::AppendLast, "second"))],
        ],
    );
    let mut pat = pattern("family1,family2");
    assert!(config.substitute(&mut pat, MatchKind::Pattern), "reported as success");
    assert_eq!(families(&pat), ["family1", "family2"]);

    // Without the family, both rule-lists run.
    let mut pat = pattern("family1");
    config.substitute(&mut pat, MatchKind::Pattern);
    assert_eq!(families(&pat), ["family1", "first", "second"]);
}

/// The same test on any other object only skips its own rule-list.
#[test]
fn issue_not_equal_all_on_other_objects_skips() {
    let config = config_with_rules(
        MatchKind::Pattern,
        vec![
            vec![
                Rule::from(Test::new(
                    Object::Style,
                    Qualifier::All,
                    CompareOp::NotEqual,
                    "Bold",
                )),
                Rule::from(Edit::new(Object::Family, EditOp::AppendLast, "first")),
            ],
            vec![Rule::from(Edit::new(Object::Family, EditOp::AppendLast, "second"))],
        ],
    );
    let mut pat = pattern("family1:style=Bold");
    config.substitute(&mut pat, MatchKind::Pattern);
    assert_eq!(families(&pat), ["family1", "second"]);
}

/// Edits whose values the object does not accept leave the list unchanged
/// when they insert relative to a match.
#[test]
fn issue_rejected_edit_keeps_values() {
    let config = config_with_rules(
        MatchKind::Pattern,
        vec![vec![
            Rule::from(Test::new(Object::Family, Qualifier::Any, CompareOp::Equal, "B")),
            Rule::from(Edit::new(Object::Family, EditOp::Append, 12)),
        ]],
    );
    let mut pat = pattern("A,B");
    config.substitute(&mut pat, MatchKind::Pattern);
    assert_eq!(families(&pat), ["A", "B"]);
}
