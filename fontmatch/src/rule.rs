// Copyright 2024 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Substitution rules.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::RuleError;
use crate::expr::{CompareOp, Expr};
use crate::object::Object;
use crate::value::Binding;

/// Which pattern a rule or field reference targets.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum MatchKind {
    /// Inherit the kind of the enclosing rule-list.
    #[default]
    Default,
    /// The query pattern, before matching.
    Pattern,
    /// A candidate font, after matching.
    Font,
    /// A font being added to the font sets.
    Scan,
}

impl MatchKind {
    pub(crate) fn slot(self) -> Option<usize> {
        match self {
            Self::Default => None,
            Self::Pattern => Some(0),
            Self::Font => Some(1),
            Self::Scan => Some(2),
        }
    }
}

/// How many values of a list must satisfy a test.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Qualifier {
    /// At least one value.
    #[default]
    Any,
    /// Every value; vacuously true when the object is absent.
    All,
    /// The first value.
    First,
    /// Any value except the first.
    NotFirst,
}

/// A condition on one object of a pattern.
#[derive(Clone, Debug)]
pub struct Test {
    /// Pattern the test reads; `Default` means the rule-list's kind.
    pub kind: MatchKind,
    /// Qualifier.
    pub qual: Qualifier,
    /// Object tested.
    pub object: Object,
    /// Comparison applied between each list value and the expression.
    pub op: CompareOp,
    /// Ignore spaces in string comparisons.
    pub ignore_blanks: bool,
    /// Right-hand side; a comma list tests several values.
    pub expr: Expr,
}

impl Test {
    /// Creates a test with the default kind.
    pub fn new(object: Object, qual: Qualifier, op: CompareOp, expr: impl Into<Expr>) -> Self {
        Self {
            kind: MatchKind::Default,
            qual,
            object,
            op,
            ignore_blanks: false,
            expr: expr.into(),
        }
    }

    /// Sets the pattern the test reads.
    #[must_use]
    pub fn with_kind(mut self, kind: MatchKind) -> Self {
        self.kind = kind;
        self
    }

    /// Makes string comparisons ignore spaces.
    #[must_use]
    pub fn ignoring_blanks(mut self) -> Self {
        self.ignore_blanks = true;
        self
    }
}

/// How an edit changes a value list.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EditOp {
    /// Replace the matched value, or the whole list if nothing matched.
    Assign,
    /// Replace the whole list.
    AssignReplace,
    /// Insert before the matched value, or at the front.
    Prepend,
    /// Insert at the front.
    PrependFirst,
    /// Insert after the matched value, or at the end.
    Append,
    /// Insert at the end.
    AppendLast,
    /// Remove the matched value, or nothing if nothing matched.
    Delete,
    /// Remove the whole list.
    DeleteAll,
}

/// A change to one object of a pattern.
#[derive(Clone, Debug)]
pub struct Edit {
    /// Object edited.
    pub object: Object,
    /// Operation.
    pub op: EditOp,
    /// New values; a comma list yields several.
    pub expr: Expr,
    /// Binding given to every new value.
    pub binding: Binding,
}

impl Edit {
    /// Creates an edit whose values are weakly bound.
    pub fn new(object: Object, op: EditOp, expr: impl Into<Expr>) -> Self {
        Self {
            object,
            op,
            expr: expr.into(),
            binding: Binding::Weak,
        }
    }

    /// Sets the binding given to new values.
    #[must_use]
    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.binding = binding;
        self
    }
}

/// One element of a rule-list, as produced by a configuration loader.
#[derive(Clone, Debug)]
pub enum Rule {
    /// A condition.
    Test(Test),
    /// A change.
    Edit(Edit),
}

impl From<Test> for Rule {
    fn from(value: Test) -> Self {
        Self::Test(value)
    }
}

impl From<Edit> for Rule {
    fn from(value: Edit) -> Self {
        Self::Edit(value)
    }
}

/// A compiled rule-list: every test runs before any edit.
#[derive(Clone, Debug, Default)]
pub struct RuleList {
    pub(crate) tests: Vec<Test>,
    pub(crate) edits: Vec<Edit>,
}

impl RuleList {
    /// Splits `rules` into tests and edits, rejecting a test that follows
    /// an edit.
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Result<Self, RuleError> {
        let mut list = Self::default();
        for (index, rule) in rules.into_iter().enumerate() {
            match rule {
                Rule::Test(test) => {
                    if !list.edits.is_empty() {
                        return Err(RuleError::TestAfterEdit { index });
                    }
                    list.tests.push(test);
                }
                Rule::Edit(edit) => list.edits.push(edit),
            }
        }
        Ok(list)
    }

    /// Returns the tests in order.
    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    /// Returns the edits in order.
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }
}

/// Named group of rule-lists, one ordered sequence per match kind.
#[derive(Clone, Debug)]
pub struct RuleSet {
    name: String,
    description: String,
    domain: Option<String>,
    enabled: bool,
    lists: [Vec<RuleList>; 3],
}

impl RuleSet {
    /// Creates an empty, enabled set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            domain: None,
            enabled: true,
            lists: [Vec::new(), Vec::new(), Vec::new()],
        }
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Sets the description and the translation domain it belongs to.
    pub fn set_description(&mut self, domain: Option<&str>, description: &str) {
        self.domain = domain.map(Into::into);
        self.description = description.into();
    }

    /// Returns the translation domain of the description.
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Returns whether substitution runs this set.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the set.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Compiles `rules` and appends them as a rule-list of `kind`.
    ///
    /// Tests with a [`MatchKind::Default`] kind take on `kind`.
    pub fn add(
        &mut self,
        rules: impl IntoIterator<Item = Rule>,
        kind: MatchKind,
    ) -> Result<(), RuleError> {
        let slot = kind.slot().ok_or(RuleError::DefaultKind)?;
        let mut list = RuleList::new(rules)?;
        for test in &mut list.tests {
            if test.kind == MatchKind::Default {
                test.kind = kind;
            }
        }
        log::trace!(
            "rule set {}: {} tests, {} edits for {kind:?}",
            self.name,
            list.tests.len(),
            list.edits.len()
        );
        self.lists[slot].push(list);
        Ok(())
    }

    /// Returns the rule-lists of `kind`.
    pub fn rule_lists(&self, kind: MatchKind) -> &[RuleList] {
        match kind.slot() {
            Some(slot) => &self.lists[slot][..],
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Edit, EditOp, MatchKind, Qualifier, Rule, RuleList, RuleSet, Test};
    use crate::error::RuleError;
    use crate::expr::CompareOp;
    use crate::object::Object;

    fn test() -> Rule {
        Test::new(Object::Family, Qualifier::Any, CompareOp::Equal, "Sans").into()
    }

    fn edit() -> Rule {
        Edit::new(Object::Family, EditOp::Append, "DejaVu Sans").into()
    }

    #[test]
    fn tests_must_precede_edits() {
        let list = RuleList::new([test(), test(), edit(), edit()]).unwrap();
        assert_eq!(list.tests().len(), 2);
        assert_eq!(list.edits().len(), 2);
        assert_eq!(
            RuleList::new([test(), edit(), test()]).unwrap_err(),
            RuleError::TestAfterEdit { index: 2 }
        );
    }

    #[test]
    fn default_test_kind_is_resolved() {
        let mut set = RuleSet::new("aliases");
        set.add([test(), edit()], MatchKind::Font).unwrap();
        let lists = set.rule_lists(MatchKind::Font);
        assert_eq!(lists[0].tests()[0].kind, MatchKind::Font);
        assert!(set.rule_lists(MatchKind::Pattern).is_empty(), "other kinds untouched");
        assert_eq!(set.add([edit()], MatchKind::Default), Err(RuleError::DefaultKind));
    }
}
