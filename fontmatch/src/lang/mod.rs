// Copyright 2024 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sets of language tags.

mod table;

use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use table::{COUNTRY_GROUPS, LANGS, LANG_COUNT, LETTER_RANGES};

/// Outcome of comparing two language tags or sets.
///
/// Variants are ordered from best to worst.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum LangResult {
    /// Same language and territory.
    Equal,
    /// Same language, different (or missing) territory.
    DifferentTerritory,
    /// Different languages.
    DifferentLang,
}

impl LangResult {
    /// Returns the distance used when scoring: 0, 1 or 2.
    pub fn distance(self) -> f64 {
        match self {
            Self::Equal => 0.0,
            Self::DifferentTerritory => 1.0,
            Self::DifferentLang => 2.0,
        }
    }
}

fn lower_at(s: &[u8], i: usize) -> u8 {
    s.get(i).map_or(0, u8::to_ascii_lowercase)
}

fn is_lang_end(c: u8) -> bool {
    c == 0 || c == b'-'
}

/// Compares two language tags.
///
/// Tags that only differ after a `-` compare as
/// [`LangResult::DifferentTerritory`]. A bare `und` on the left never
/// compares equal.
pub fn compare_lang(s1: &str, s2: &str) -> LangResult {
    let (s1, s2) = (s1.as_bytes(), s2.as_bytes());
    let mut result = LangResult::DifferentLang;
    let mut is_und = lower_at(s1, 0) == b'u'
        && lower_at(s1, 1) == b'n'
        && lower_at(s1, 2) == b'd'
        && is_lang_end(lower_at(s1, 3));
    let mut i = 0;
    loop {
        let c1 = lower_at(s1, i);
        let c2 = lower_at(s2, i);
        if c1 != c2 {
            if !is_und && is_lang_end(c1) && is_lang_end(c2) {
                result = LangResult::DifferentTerritory;
            }
            return result;
        } else if c1 == 0 {
            return if is_und { result } else { LangResult::Equal };
        } else if c1 == b'-' && !is_und {
            result = LangResult::DifferentTerritory;
        }
        // Anything after "und-" makes the tag defined.
        if is_und && i == 3 {
            is_und = false;
        }
        i += 1;
    }
}

/// Returns true when `sup` covers `sub`: the same language with either the
/// same territory or one of them lacking a territory.
fn lang_contains(sup: &str, sub: &str) -> bool {
    let (sup, sub) = (sup.as_bytes(), sub.as_bytes());
    let mut i = 0;
    loop {
        let c1 = lower_at(sup, i);
        let c2 = lower_at(sub, i);
        if c1 != c2 {
            return (c1 == b'-' && c2 == 0) || (c1 == 0 && c2 == b'-');
        } else if c1 == 0 {
            return true;
        }
        i += 1;
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

/// Finds `lang` in the canonical table.
///
/// Returns `Ok(index)` on a hit or `Err(insertion_point)` on a miss.
fn lang_index(lang: &str) -> Result<usize, usize> {
    let first = lang.bytes().next().map(|c| c.to_ascii_lowercase());
    let (lo, hi) = match first {
        Some(c @ b'a'..=b'z') => LETTER_RANGES[usize::from(c - b'a')],
        _ => (0, LANG_COUNT - 1),
    };
    match LANGS[lo..=hi].binary_search_by(|probe| cmp_ignore_case(probe, lang)) {
        Ok(pos) => Ok(lo + pos),
        Err(pos) => Err(lo + pos),
    }
}

/// Normalizes a POSIX locale or language tag for use as a default language.
///
/// `C` and `POSIX` become `en`, codesets and modifiers are dropped and the
/// territory is kept only when the canonical table knows it. Returns `None`
/// for malformed tags.
pub fn normalize_lang(lang: &str) -> Option<String> {
    let lower = lang.to_ascii_lowercase();
    if matches!(lower.as_str(), "c" | "c.utf-8" | "c.utf8" | "posix") {
        return Some("en".into());
    }
    let base = lower.split('@').next().unwrap_or_default();
    let base = base.split('.').next().unwrap_or_default();
    let (language, territory) = match base.find(['_', '-']) {
        Some(pos) => (&base[..pos], &base[pos + 1..]),
        None => (base, ""),
    };
    if !(2..=3).contains(&language.len()) {
        log::warn!("ignoring {lang}: not a valid language tag");
        return None;
    }
    let tlen = territory.len();
    if tlen != 0 && !(2..=3).contains(&tlen) && !(territory.starts_with('z') && tlen < 5) {
        log::warn!("ignoring {lang}: not a valid region tag");
        return None;
    }
    if !territory.is_empty() {
        let full = alloc::format!("{language}-{territory}");
        if lang_index(&full).is_ok() {
            return Some(full);
        }
    }
    if lang_index(language).is_ok() || territory.is_empty() {
        Some(language.to_string())
    } else {
        Some(alloc::format!("{language}-{territory}"))
    }
}

/// Splits a colon separated list of locales, normalizing each entry and
/// dropping malformed ones and duplicates.
pub fn normalize_lang_list(langs: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for lang in langs.split(':').filter(|lang| !lang.is_empty()) {
        if let Some(lang) = normalize_lang(lang) {
            if !out.contains(&lang) {
                out.push(lang);
            }
        }
    }
    out
}

/// Set of language tags.
///
/// Tags from the canonical table are stored as bits; anything else is kept
/// verbatim in a side set.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct LangSet {
    map: [u32; 8],
    extra: BTreeSet<String>,
}

impl LangSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    fn bit(&self, id: usize) -> bool {
        self.map[id >> 5] & (1 << (id & 31)) != 0
    }

    fn set_bit(&mut self, id: usize) {
        self.map[id >> 5] |= 1 << (id & 31);
    }

    fn clear_bit(&mut self, id: usize) {
        self.map[id >> 5] &= !(1 << (id & 31));
    }

    /// Adds a tag.
    pub fn add(&mut self, lang: &str) {
        match lang_index(lang) {
            Ok(id) => self.set_bit(id),
            Err(_) => {
                self.extra.insert(lang.to_string());
            }
        }
    }

    /// Removes a tag.
    pub fn del(&mut self, lang: &str) {
        match lang_index(lang) {
            Ok(id) => self.clear_bit(id),
            Err(_) => {
                self.extra.remove(lang);
            }
        }
    }

    /// Returns true if the set holds no tags.
    pub fn is_empty(&self) -> bool {
        self.map.iter().all(|word| *word == 0) && self.extra.is_empty()
    }

    /// Returns every tag in the set, canonical tags first.
    pub fn langs(&self) -> impl Iterator<Item = &str> + '_ {
        (0..LANG_COUNT)
            .filter(|id| self.bit(*id))
            .map(|id| LANGS[id])
            .chain(self.extra.iter().map(String::as_str))
    }

    /// Returns the best [`LangResult`] between `lang` and any tag of the set.
    pub fn has_lang(&self, lang: &str) -> LangResult {
        let id = match lang_index(lang) {
            Ok(id) if self.bit(id) => return LangResult::Equal,
            Ok(id) | Err(id) => id,
        };
        let mut best = LangResult::DifferentLang;
        for i in (0..id).rev() {
            let r = compare_lang(lang, LANGS[i]);
            if r == LangResult::DifferentLang {
                break;
            }
            if self.bit(i) && r < best {
                best = r;
            }
        }
        for i in id..LANG_COUNT {
            let r = compare_lang(lang, LANGS[i]);
            if r == LangResult::DifferentLang {
                break;
            }
            if self.bit(i) && r < best {
                best = r;
            }
        }
        for extra in &self.extra {
            if best == LangResult::Equal {
                break;
            }
            best = best.min(compare_lang(lang, extra));
        }
        best
    }

    /// Returns true if the set covers `lang`, treating a missing territory
    /// on either side as a wildcard.
    pub fn contains_lang(&self, lang: &str) -> bool {
        let id = match lang_index(lang) {
            Ok(id) if self.bit(id) => return true,
            Ok(id) | Err(id) => id,
        };
        let covers = |i: usize| self.bit(i) && lang_contains(LANGS[i], lang);
        for i in (0..id).rev() {
            if compare_lang(LANGS[i], lang) == LangResult::DifferentLang {
                break;
            }
            if covers(i) {
                return true;
            }
        }
        for i in id..LANG_COUNT {
            if compare_lang(LANGS[i], lang) == LangResult::DifferentLang {
                break;
            }
            if covers(i) {
                return true;
            }
        }
        self.extra.iter().any(|extra| lang_contains(extra, lang))
    }

    /// Returns true if every tag of `other` is covered by this set.
    pub fn contains(&self, other: &Self) -> bool {
        for (word, (a, b)) in self.map.iter().zip(other.map.iter()).enumerate() {
            let missing = b & !a;
            if missing == 0 {
                continue;
            }
            for bit in 0..32 {
                let id = word * 32 + bit;
                if missing & (1 << bit) != 0 && !self.contains_lang(LANGS[id]) {
                    return false;
                }
            }
        }
        other.extra.iter().all(|extra| self.contains_lang(extra))
    }

    fn compare_extras(&self, extras: &BTreeSet<String>) -> LangResult {
        let mut best = LangResult::DifferentLang;
        for extra in extras {
            if best == LangResult::Equal {
                break;
            }
            best = best.min(self.has_lang(extra));
        }
        best
    }

    /// Compares two sets.
    ///
    /// Any shared canonical tag gives [`LangResult::Equal`]; tags of the
    /// same language with different territories give
    /// [`LangResult::DifferentTerritory`].
    pub fn compare(&self, other: &Self) -> LangResult {
        if self.map.iter().zip(other.map.iter()).any(|(a, b)| a & b != 0) {
            return LangResult::Equal;
        }
        let mut best = LangResult::DifferentLang;
        for group in COUNTRY_GROUPS {
            let in_self = group.iter().any(|id| self.bit(*id));
            let in_other = group.iter().any(|id| other.bit(*id));
            if in_self && in_other {
                best = LangResult::DifferentTerritory;
                break;
            }
        }
        if !self.extra.is_empty() {
            best = best.min(other.compare_extras(&self.extra));
        }
        if best > LangResult::Equal && !other.extra.is_empty() {
            best = best.min(self.compare_extras(&other.extra));
        }
        best
    }

    /// Returns the tags present in either set.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (dst, src) in out.map.iter_mut().zip(other.map.iter()) {
            *dst |= src;
        }
        out.extra.extend(other.extra.iter().cloned());
        out
    }

    /// Returns the tags of this set that are not in `other`.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (dst, src) in out.map.iter_mut().zip(other.map.iter()) {
            *dst &= !src;
        }
        out.extra.retain(|lang| !other.extra.contains(lang));
        out
    }
}

impl<'a> FromIterator<&'a str> for LangSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut set = Self::new();
        for lang in iter {
            set.add(lang);
        }
        set
    }
}

impl fmt::Debug for LangSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.langs()).finish()
    }
}

/// Formats the tags joined by `|`.
impl fmt::Display for LangSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, lang) in self.langs().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(lang)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::table::{COUNTRY_GROUPS, LANGS, LETTER_RANGES};
    use super::{compare_lang, lang_index, normalize_lang, LangResult, LangSet};

    #[test]
    fn table_is_sorted_and_bucketed() {
        assert!(LANGS.windows(2).all(|w| w[0] < w[1]), "table must be sorted");
        assert!(LANGS.len() <= 256, "table must fit the bitmap");
        for (letter, (lo, hi)) in (b'a'..=b'z').zip(LETTER_RANGES) {
            assert!(lo <= hi, "empty bucket for {}", letter as char);
            for lang in &LANGS[lo..=hi] {
                assert_eq!(lang.as_bytes()[0], letter, "{lang} in wrong bucket");
            }
        }
        for group in COUNTRY_GROUPS {
            let base = LANGS[group[0]].split('-').next().unwrap();
            for id in *group {
                assert!(LANGS[*id].starts_with(base), "{} not in {base}", LANGS[*id]);
            }
        }
    }

    #[test]
    fn index_lookup() {
        assert_eq!(lang_index("EN"), Ok(52));
        assert_eq!(LANGS[52], "en");
        assert_eq!(lang_index("en-gb"), Err(53));
        assert_eq!(lang_index("zz"), Err(LANGS.len()));
    }

    #[test]
    fn undefined_tag_never_equal() {
        assert_eq!(compare_lang("und", "und"), LangResult::DifferentLang);
        assert_eq!(compare_lang("und-zsye", "und-zsye"), LangResult::Equal);
        assert_eq!(compare_lang("en", "en-gb"), LangResult::DifferentTerritory);
        assert_eq!(compare_lang("en", "eo"), LangResult::DifferentLang);
    }

    #[test]
    fn extras_are_kept_verbatim() {
        let mut ls = LangSet::new();
        ls.add("tlh");
        ls.add("fr");
        assert_eq!(ls.langs().collect::<Vec<_>>(), ["fr", "tlh"]);
        assert!(ls.contains_lang("tlh"), "extra tag");
        ls.del("tlh");
        assert!(!ls.contains_lang("tlh"), "extra tag removed");
    }

    #[test]
    fn normalize_locales() {
        assert_eq!(normalize_lang("C").as_deref(), Some("en"));
        assert_eq!(normalize_lang("en_US.UTF-8").as_deref(), Some("en"));
        assert_eq!(normalize_lang("zh_TW.Big5").as_deref(), Some("zh-tw"));
        assert_eq!(normalize_lang("sr@latin").as_deref(), Some("sr"));
        assert_eq!(normalize_lang("x"), None);
    }
}
