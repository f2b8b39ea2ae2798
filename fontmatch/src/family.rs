// Copyright 2024 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Case and blank insensitive family name tables.

use alloc::boxed::Box;
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::object::Object;
use crate::pattern::Pattern;
use crate::value::{Binding, ValueEntry};

/// Folds a string for comparison: lowercase, optionally without spaces.
pub(crate) fn fold(s: &str, ignore_blanks: bool) -> impl Iterator<Item = char> + '_ {
    s.chars()
        .filter(move |ch| !(ignore_blanks && *ch == ' '))
        .flat_map(char::to_lowercase)
}

/// Compares two strings ignoring case and, optionally, spaces.
pub(crate) fn eq_ignore_case(a: &str, b: &str, ignore_blanks: bool) -> bool {
    fold(a, ignore_blanks).eq(fold(b, ignore_blanks))
}

/// Returns true if `needle` occurs in `haystack`, ignoring case.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Key for case-insensitive lookup of family names.
#[derive(Default)]
pub(crate) struct NameKey {
    data: SmallVec<[u8; 128]>,
}

impl NameKey {
    pub(crate) fn new(s: &str, ignore_blanks: bool) -> Self {
        let mut res = Self::default();
        let mut buf = [0_u8; 4];
        for ch in fold(s, ignore_blanks) {
            res.data
                .extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        }
        res
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Counts of the family names currently held by a pattern, under both
/// normalizations.
///
/// Built once per substitution and kept in sync with every edit of the
/// family object so that family tests avoid scanning the value list.
#[derive(Default, Debug)]
pub(crate) struct FamilyTable {
    ignore_case: HashMap<Box<[u8]>, usize>,
    ignore_blanks: HashMap<Box<[u8]>, usize>,
}

impl FamilyTable {
    pub(crate) fn new(pattern: &Pattern) -> Self {
        let mut table = Self::default();
        if let Some(values) = pattern.values(Object::Family) {
            table.add(values);
        }
        table
    }

    fn map(&mut self, ignore_blanks: bool) -> &mut HashMap<Box<[u8]>, usize> {
        if ignore_blanks {
            &mut self.ignore_blanks
        } else {
            &mut self.ignore_case
        }
    }

    pub(crate) fn add(&mut self, values: &[ValueEntry]) {
        for name in values.iter().filter_map(|entry| entry.value.as_str()) {
            for ignore_blanks in [false, true] {
                let key = NameKey::new(name, ignore_blanks);
                *self
                    .map(ignore_blanks)
                    .entry(key.as_bytes().into())
                    .or_default() += 1;
            }
        }
    }

    pub(crate) fn remove(&mut self, values: &[ValueEntry]) {
        for name in values.iter().filter_map(|entry| entry.value.as_str()) {
            for ignore_blanks in [false, true] {
                let key = NameKey::new(name, ignore_blanks);
                let map = self.map(ignore_blanks);
                if let Some(count) = map.get_mut(key.as_bytes()) {
                    *count -= 1;
                    if *count == 0 {
                        map.remove(key.as_bytes());
                    }
                }
            }
        }
    }

    pub(crate) fn contains(&self, name: &str, ignore_blanks: bool) -> bool {
        let key = NameKey::new(name, ignore_blanks);
        let map = if ignore_blanks {
            &self.ignore_blanks
        } else {
            &self.ignore_case
        };
        map.contains_key(key.as_bytes())
    }
}

/// Best positions of each query family, for scoring candidate fonts.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FamilyScore {
    pub(crate) strong: f64,
    pub(crate) weak: f64,
}

impl Default for FamilyScore {
    fn default() -> Self {
        Self {
            strong: 1e99,
            weak: 1e99,
        }
    }
}

/// Smallest strong and weak index of every family in a query, keyed by
/// the blank and case folded name.
#[derive(Default, Debug)]
pub(crate) struct FamilyScores {
    map: HashMap<Box<[u8]>, FamilyScore>,
}

impl FamilyScores {
    pub(crate) fn new(query: &Pattern) -> Self {
        let mut map: HashMap<Box<[u8]>, FamilyScore> = HashMap::new();
        let values = query.values(Object::Family).unwrap_or_default();
        for (i, entry) in values.iter().enumerate() {
            let Some(name) = entry.value.as_str() else {
                continue;
            };
            let key = NameKey::new(name, true);
            let score = map.entry(key.as_bytes().into()).or_default();
            let i = i as f64;
            if entry.binding == Binding::Weak {
                score.weak = score.weak.min(i);
            } else {
                score.strong = score.strong.min(i);
            }
        }
        Self { map }
    }

    /// Returns the best strong and weak position among the font's
    /// families.
    pub(crate) fn score(&self, font_families: &[ValueEntry]) -> FamilyScore {
        let mut best = FamilyScore::default();
        for name in font_families.iter().filter_map(|entry| entry.value.as_str()) {
            let key = NameKey::new(name, true);
            if let Some(score) = self.map.get(key.as_bytes()) {
                best.strong = best.strong.min(score.strong);
                best.weak = best.weak.min(score.weak);
            }
        }
        best
    }
}
