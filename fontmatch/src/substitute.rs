// Copyright 2024 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule driven rewriting of patterns.

use crate::config::Config;
use crate::expr::{compare_values, CompareOp, EvalContext};
use crate::family::FamilyTable;
use crate::lang::LangSet;
use crate::object::{Object, OBJECT_COUNT};
use crate::pattern::{Pattern, ValueList};
use crate::rule::{Edit, EditOp, MatchKind, Qualifier, RuleList, Test};
use crate::value::{Binding, Value, ValueEntry};

/// Result of running one test against a pattern.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum TestOutcome {
    /// The test holds. Carries the first satisfying position, if any.
    Matched(Option<usize>),
    /// The test fails; the rule-list is abandoned.
    Skip,
    /// The test fails in a way that ends the whole substitution
    /// successfully.
    StopAll,
}

/// Position matched by the first test of each object, per rule-list.
type Positions = [Option<usize>; OBJECT_COUNT];

impl Config {
    /// Runs the rules of `kind` over `pattern`.
    ///
    /// Returns false only if `kind` is [`MatchKind::Default`].
    pub fn substitute(&self, pattern: &mut Pattern, kind: MatchKind) -> bool {
        self.substitute_with_pat(pattern, None, kind)
    }

    /// Runs the rules of `kind` over `pattern`. When running font rules,
    /// `test_pattern` is the query that font-time tests on the pattern
    /// kind read from.
    pub fn substitute_with_pat(
        &self,
        pattern: &mut Pattern,
        test_pattern: Option<&Pattern>,
        kind: MatchKind,
    ) -> bool {
        if kind == MatchKind::Default {
            return false;
        }
        if kind == MatchKind::Pattern {
            self.add_default_langs(pattern);
            if !pattern.contains(Object::PrgName) {
                if let Some(prgname) = self.prgname() {
                    let _ = pattern.add(Object::PrgName, prgname);
                }
            }
        }
        let mut table = FamilyTable::new(pattern);
        for set in self.rule_sets().iter().filter(|set| set.is_enabled()) {
            log::trace!("running rule set {}", set.name());
            for list in set.rule_lists(kind) {
                match run_rule_list(list, pattern, test_pattern, kind, &mut table) {
                    TestOutcome::StopAll => {
                        log::debug!("substitution stopped by a family test in {}", set.name());
                        return true;
                    }
                    TestOutcome::Skip => log::trace!("rule-list skipped"),
                    TestOutcome::Matched(_) => {}
                }
            }
        }
        true
    }

    /// Appends the default languages as weak `lang` values, stopping at
    /// the first one the pattern already covers.
    fn add_default_langs(&self, pattern: &mut Pattern) {
        let mut und = LangSet::new();
        und.add("und");
        for lang in self.default_languages() {
            let covered = pattern
                .values(Object::Lang)
                .unwrap_or_default()
                .iter()
                .any(|entry| match &entry.value {
                    Value::LangSet(ls) => {
                        let mut wanted = LangSet::new();
                        wanted.add(lang);
                        ls.contains(&wanted) || ls.contains(&und)
                    }
                    Value::String(s) => {
                        s.eq_ignore_ascii_case(lang) || s.eq_ignore_ascii_case("und")
                    }
                    _ => false,
                });
            if covered {
                break;
            }
            let value = Value::from(lang.as_str());
            let _ = pattern.add_with_binding(Object::Lang, value, Binding::Weak, true);
        }
    }
}

fn run_rule_list(
    list: &RuleList,
    pattern: &mut Pattern,
    test_pattern: Option<&Pattern>,
    kind: MatchKind,
    table: &mut FamilyTable,
) -> TestOutcome {
    let mut positions: Positions = [None; OBJECT_COUNT];
    for test in list.tests() {
        let slot = test.object.index();
        let reads_query = kind == MatchKind::Font && test.kind == MatchKind::Pattern;
        let (target, family_table) = if reads_query {
            (test_pattern, None)
        } else {
            (Some(&*pattern), Some(&*table))
        };
        let Some(values) = target.and_then(|target| target.values(test.object)) else {
            if test.qual == Qualifier::All {
                if kind == test.kind {
                    positions[slot] = None;
                }
                continue;
            }
            return TestOutcome::Skip;
        };
        let ctx = EvalContext {
            kind,
            pattern: &*pattern,
            test_pattern,
        };
        let position = match match_value_list(&ctx, test, values, family_table) {
            TestOutcome::Matched(position) => position,
            other => return other,
        };
        if positions[slot].is_none() && kind == test.kind {
            positions[slot] = position;
        }
        let rejected = match (position, test.qual) {
            (None, _) => true,
            (Some(pos), Qualifier::First) => pos != 0,
            (Some(pos), Qualifier::NotFirst) => pos == 0,
            _ => false,
        };
        if rejected {
            return TestOutcome::Skip;
        }
    }
    for edit in list.edits() {
        let ctx = EvalContext {
            kind,
            pattern: &*pattern,
            test_pattern,
        };
        let values: ValueList = edit
            .expr
            .items()
            .into_iter()
            .filter_map(|expr| expr.evaluate(&ctx))
            .map(|value| ValueEntry::new(value, edit.binding))
            .collect();
        apply_edit(pattern, edit, values, &mut positions[edit.object.index()], table);
        pattern.canonicalize(edit.object);
        log::trace!("applied {:?} to {}", edit.op, edit.object);
    }
    TestOutcome::Matched(None)
}

/// Finds the first value of `values` satisfying `test`.
///
/// With `All`, every value must satisfy the test and the first position
/// is reported. Each value of a comma expression is tried in turn.
fn match_value_list(
    ctx: &EvalContext<'_>,
    test: &Test,
    values: &[ValueEntry],
    table: Option<&FamilyTable>,
) -> TestOutcome {
    let mut found = None;
    for expr in test.expr.items() {
        let value = expr.evaluate(ctx);
        if let (Object::Family, Some(table)) = (test.object, table) {
            let name = value.as_ref().and_then(Value::as_str).unwrap_or_default();
            match test.op {
                CompareOp::Equal | CompareOp::Listing => {
                    if !table.contains(name, test.ignore_blanks) {
                        found = None;
                        continue;
                    }
                }
                CompareOp::NotEqual if test.qual == Qualifier::All => {
                    // A present name ends the substitution, not just this
                    // rule-list.
                    if table.contains(name, test.ignore_blanks) {
                        return TestOutcome::StopAll;
                    }
                    found = Some(0);
                    continue;
                }
                _ => {}
            }
        }
        for (i, entry) in values.iter().enumerate() {
            if compare_values(Some(&entry.value), test.op, test.ignore_blanks, value.as_ref()) {
                if found.is_none() {
                    found = Some(i);
                }
                if test.qual != Qualifier::All {
                    break;
                }
            } else if test.qual == Qualifier::All {
                found = None;
                break;
            }
        }
    }
    TestOutcome::Matched(found)
}

/// Inserts `new` next to `position`, or at an end of the list without one.
///
/// Returns false, leaving the pattern untouched, if the object rejects the
/// type of any value.
fn insert(
    pattern: &mut Pattern,
    object: Object,
    position: Option<usize>,
    append: bool,
    mut new: ValueList,
    table: &mut FamilyTable,
) -> bool {
    if let Some(bad) = new
        .iter()
        .find(|entry| !object.accepts(entry.value.value_type()))
    {
        log::warn!(
            "object {object} does not accept {} values, not adding",
            bad.value.value_type()
        );
        return false;
    }
    if new.is_empty() {
        return true;
    }
    if object == Object::Family {
        table.add(&new);
    }
    let list = pattern.entry(object);
    let position = position.filter(|pos| *pos < list.len());
    let same = position.map_or(Binding::Weak, |pos| list[pos].binding);
    for entry in &mut new {
        if entry.binding == Binding::Same {
            entry.binding = same;
        }
    }
    let at = match (position, append) {
        (Some(pos), true) => pos + 1,
        (Some(pos), false) => pos,
        (None, true) => list.len(),
        (None, false) => 0,
    };
    list.insert_many(at, new);
    true
}

fn delete(pattern: &mut Pattern, object: Object, position: usize, table: &mut FamilyTable) {
    let Some(list) = pattern.values_mut(object) else {
        return;
    };
    if position < list.len() {
        let entry = list.remove(position);
        if object == Object::Family {
            table.remove(core::slice::from_ref(&entry));
        }
    }
}

fn delete_all(pattern: &mut Pattern, object: Object, table: &mut FamilyTable) {
    if let Some(list) = pattern.remove(object) {
        if object == Object::Family {
            table.remove(&list);
        }
    }
}

/// Applies one edit, keeping `position` on the same value where the edit
/// leaves it in place.
fn apply_edit(
    pattern: &mut Pattern,
    edit: &Edit,
    values: ValueList,
    position: &mut Option<usize>,
    table: &mut FamilyTable,
) {
    let object = edit.object;
    let count = values.len();
    match (edit.op, *position) {
        (EditOp::Assign, Some(pos)) => {
            let inserted = insert(pattern, object, Some(pos), true, values, table);
            delete(pattern, object, pos, table);
            *position = (inserted && count > 0).then_some(pos);
        }
        (EditOp::Assign | EditOp::AssignReplace, _) => {
            delete_all(pattern, object, table);
            insert(pattern, object, None, true, values, table);
            *position = None;
        }
        (EditOp::Prepend, Some(pos)) => {
            if insert(pattern, object, Some(pos), false, values, table) {
                *position = Some(pos + count);
            }
        }
        (EditOp::Prepend | EditOp::PrependFirst, _) => {
            if insert(pattern, object, None, false, values, table) {
                *position = position.map(|pos| pos + count);
            }
        }
        (EditOp::Append, Some(pos)) => {
            insert(pattern, object, Some(pos), true, values, table);
        }
        (EditOp::Append | EditOp::AppendLast, _) => {
            insert(pattern, object, None, true, values, table);
        }
        (EditOp::Delete, Some(pos)) => {
            delete(pattern, object, pos, table);
            *position = None;
        }
        (EditOp::Delete | EditOp::DeleteAll, _) => {
            delete_all(pattern, object, table);
            *position = None;
        }
    }
}
