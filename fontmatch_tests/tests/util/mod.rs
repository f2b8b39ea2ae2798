// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helpers shared by the test modules.

use fontmatch::{Config, MatchKind, Object, Pattern, Rule, RuleSet, SetName};

/// Parses a pattern name, panicking on malformed input.
pub(crate) fn pattern(name: &str) -> Pattern {
    name.parse()
        .unwrap_or_else(|err| panic!("invalid pattern name {name:?}: {err}"))
}

/// Returns the string values of `object`.
pub(crate) fn strings(pattern: &Pattern, object: Object) -> Vec<&str> {
    pattern
        .values(object)
        .unwrap_or_default()
        .iter()
        .filter_map(|entry| entry.value.as_str())
        .collect()
}

/// Returns the family names of `pattern`.
pub(crate) fn families(pattern: &Pattern) -> Vec<&str> {
    strings(pattern, Object::Family)
}

/// Builds a configuration holding the fonts named by `names` in the
/// system set.
pub(crate) fn config_with_fonts(names: &[&str]) -> Config {
    let mut config = Config::new();
    for name in names {
        assert!(
            config.add_font(SetName::System, pattern(name)),
            "font {name} was rejected"
        );
    }
    config
}

/// Builds a configuration with a single rule set holding one rule-list of
/// `kind` per entry of `lists`.
pub(crate) fn config_with_rules(kind: MatchKind, lists: Vec<Vec<Rule>>) -> Config {
    let mut set = RuleSet::new("test");
    for rules in lists {
        set.add(rules, kind).expect("rule-list should compile");
    }
    let mut config = Config::new();
    config.add_rule_set(set);
    config
}
