// Copyright 2024 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sparse sets of Unicode codepoints.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

/// Largest valid Unicode scalar value.
const MAX_CODEPOINT: u32 = 0x10_FFFF;

/// Splits a codepoint into its page number, bitmap word and bit mask.
fn locate(ch: u32) -> Option<(u16, usize, u32)> {
    if ch > MAX_CODEPOINT {
        return None;
    }
    let page = u16::try_from(ch >> 8).ok()?;
    Some((page, ((ch & 0xff) >> 5) as usize, 1 << (ch & 31)))
}

/// Coverage bitmap for one page of 256 codepoints.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct Leaf([u32; 8]);

impl Leaf {
    /// Returns the raw bitmap words.
    pub fn words(&self) -> &[u32; 8] {
        &self.0
    }

    /// Returns true if the codepoint at `offset` within the page is set.
    pub fn contains(&self, offset: u8) -> bool {
        self.0[usize::from(offset >> 5)] & (1 << (offset & 31)) != 0
    }

    /// Returns the number of codepoints set in the page.
    pub fn count(&self) -> u32 {
        self.0.iter().map(|word| word.count_ones()).sum()
    }

    /// Returns true if no codepoint in the page is set.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|word| *word == 0)
    }

    fn combine(&self, other: &Self, op: impl Fn(u32, u32) -> u32) -> Self {
        let mut out = [0; 8];
        for (dst, (a, b)) in out.iter_mut().zip(self.0.iter().zip(other.0.iter())) {
            *dst = op(*a, *b);
        }
        Self(out)
    }
}

/// Set of Unicode codepoints stored as sorted pages of 256-bit leaves.
///
/// Leaves are created on demand and are never removed; deleting the last
/// codepoint of a page leaves an empty leaf behind. Empty leaves are
/// ignored by every comparison.
#[derive(Clone, Default)]
pub struct CharSet {
    pages: Vec<u16>,
    leaves: Vec<Leaf>,
}

impl CharSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set from an iterator of codepoints. Invalid codepoints are
    /// skipped.
    pub fn from_chars(chars: impl IntoIterator<Item = u32>) -> Self {
        let mut set = Self::new();
        for ch in chars {
            set.add_char(ch);
        }
        set
    }

    /// Finds the leaf for `page`.
    ///
    /// Returns `Ok(index)` on a hit and `Err(insertion_point)` on a miss so
    /// that membership tests and insertion share one search.
    pub fn find_leaf_pos(&self, page: u16) -> Result<usize, usize> {
        self.pages.binary_search(&page)
    }

    /// Like [`Self::find_leaf_pos`] but only searches leaves at or after
    /// `start`.
    fn find_leaf_forward(&self, start: usize, page: u16) -> Result<usize, usize> {
        let start = start.min(self.pages.len());
        match self.pages[start..].binary_search(&page) {
            Ok(pos) => Ok(start + pos),
            Err(pos) => Err(start + pos),
        }
    }

    /// Returns the leaf covering `ch`, if one exists.
    pub fn leaf(&self, ch: u32) -> Option<&Leaf> {
        let page = u16::try_from(ch >> 8).ok()?;
        self.find_leaf_pos(page).ok().map(|pos| &self.leaves[pos])
    }

    fn leaf_mut_or_insert(&mut self, page: u16) -> &mut Leaf {
        let pos = match self.find_leaf_pos(page) {
            Ok(pos) => pos,
            Err(pos) => {
                self.pages.insert(pos, page);
                self.leaves.insert(pos, Leaf::default());
                pos
            }
        };
        &mut self.leaves[pos]
    }

    /// Adds a codepoint. Returns false if `ch` is not a valid codepoint.
    pub fn add_char(&mut self, ch: u32) -> bool {
        let Some((page, word, bit)) = locate(ch) else {
            return false;
        };
        self.leaf_mut_or_insert(page).0[word] |= bit;
        true
    }

    /// Removes a codepoint. Returns false if `ch` is not a valid codepoint.
    pub fn del_char(&mut self, ch: u32) -> bool {
        let Some((page, word, bit)) = locate(ch) else {
            return false;
        };
        if let Ok(pos) = self.find_leaf_pos(page) {
            self.leaves[pos].0[word] &= !bit;
        }
        true
    }

    /// Returns true if the set contains `ch`.
    pub fn has_char(&self, ch: u32) -> bool {
        locate(ch).is_some_and(|(page, word, bit)| {
            self.find_leaf_pos(page)
                .is_ok_and(|pos| self.leaves[pos].0[word] & bit != 0)
        })
    }

    /// Returns the number of codepoints in the set.
    pub fn count(&self) -> u32 {
        self.leaves.iter().map(Leaf::count).sum()
    }

    /// Returns true if the set holds no codepoints.
    pub fn is_empty(&self) -> bool {
        self.leaves.iter().all(Leaf::is_empty)
    }

    /// Returns the (page base, leaf) pairs in ascending order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { set: self, pos: 0 }
    }

    /// Returns the codepoints of the set in ascending order.
    pub fn chars(&self) -> impl Iterator<Item = u32> + '_ {
        self.leaves().flat_map(|(base, leaf)| {
            (0..=255_u8)
                .filter(move |offset| leaf.contains(*offset))
                .map(move |offset| base + u32::from(offset))
        })
    }

    /// Adds every codepoint of `other` to this set.
    ///
    /// Returns true if at least one codepoint was not already present.
    pub fn merge(&mut self, other: &Self) -> bool {
        let mut changed = false;
        for (page, leaf) in other.pages.iter().zip(&other.leaves) {
            if leaf.is_empty() {
                continue;
            }
            let dst = self.leaf_mut_or_insert(*page);
            for (d, s) in dst.0.iter_mut().zip(leaf.0.iter()) {
                if s & !*d != 0 {
                    changed = true;
                }
                *d |= *s;
            }
        }
        changed
    }

    /// Returns the union of both sets.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        self.operate(other, |a, b| a | b, true, true)
    }

    /// Returns the intersection of both sets.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        self.operate(other, |a, b| a & b, false, false)
    }

    /// Returns the codepoints of this set that are not in `other`.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        self.operate(other, |a, b| a & !b, true, false)
    }

    /// Walks both leaf arrays in lock-step, combining leaves on shared pages
    /// with `op` and copying unshared leaves when asked to.
    fn operate(
        &self,
        other: &Self,
        op: impl Fn(u32, u32) -> u32,
        keep_self: bool,
        keep_other: bool,
    ) -> Self {
        let mut out = Self::new();
        let mut push = |page: u16, leaf: Leaf| {
            if !leaf.is_empty() {
                out.pages.push(page);
                out.leaves.push(leaf);
            }
        };
        let (mut i, mut j) = (0, 0);
        loop {
            let order = match (self.pages.get(i), other.pages.get(j)) {
                (None, None) => break,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
            };
            match order {
                Ordering::Equal => {
                    push(self.pages[i], self.leaves[i].combine(&other.leaves[j], &op));
                    i += 1;
                    j += 1;
                }
                Ordering::Less => {
                    if keep_self {
                        push(self.pages[i], self.leaves[i]);
                    }
                    i += 1;
                }
                Ordering::Greater => {
                    if keep_other {
                        push(other.pages[j], other.leaves[j]);
                    }
                    j += 1;
                }
            }
        }
        out
    }

    /// Returns the number of codepoints in this set that are not in
    /// `other`.
    pub fn subtract_count(&self, other: &Self) -> u32 {
        let mut count = 0;
        let mut j = 0;
        for (page, leaf) in self.pages.iter().zip(&self.leaves) {
            match other.find_leaf_forward(j, *page) {
                Ok(pos) => {
                    count += leaf
                        .combine(&other.leaves[pos], |a, b| a & !b)
                        .count();
                    j = pos + 1;
                }
                Err(pos) => {
                    count += leaf.count();
                    j = pos;
                }
            }
        }
        count
    }

    /// Returns the number of codepoints present in both sets.
    pub fn intersect_count(&self, other: &Self) -> u32 {
        let mut count = 0;
        let mut j = 0;
        for (page, leaf) in self.pages.iter().zip(&self.leaves) {
            match other.find_leaf_forward(j, *page) {
                Ok(pos) => {
                    count += leaf.combine(&other.leaves[pos], |a, b| a & b).count();
                    j = pos + 1;
                }
                Err(pos) => j = pos,
            }
        }
        count
    }

    /// Returns true if every codepoint of this set is also in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.pages.len() && j < other.pages.len() {
            let (a, b) = (self.pages[i], other.pages[j]);
            if a == b {
                let extra = self.leaves[i].combine(&other.leaves[j], |a, b| a & !b);
                if !extra.is_empty() {
                    return false;
                }
                i += 1;
                j += 1;
            } else if a < b {
                if !self.leaves[i].is_empty() {
                    return false;
                }
                i += 1;
            } else {
                j = match other.find_leaf_forward(j + 1, a) {
                    Ok(pos) | Err(pos) => pos,
                };
            }
        }
        self.leaves[i..].iter().all(Leaf::is_empty)
    }
}

impl PartialEq for CharSet {
    fn eq(&self, other: &Self) -> bool {
        let lhs = self.leaves().filter(|(_, leaf)| !leaf.is_empty());
        let rhs = other.leaves().filter(|(_, leaf)| !leaf.is_empty());
        lhs.eq(rhs)
    }
}

impl fmt::Debug for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharSet({self})")
    }
}

/// Formats the set as space separated hexadecimal ranges, e.g. `20-7e a0`.
impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut run: Option<(u32, u32)> = None;
        let mut emit = |f: &mut fmt::Formatter<'_>, (lo, hi): (u32, u32)| {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            if lo == hi {
                write!(f, "{lo:x}")
            } else {
                write!(f, "{lo:x}-{hi:x}")
            }
        };
        for ch in self.chars() {
            run = match run {
                Some((lo, hi)) if hi + 1 == ch => Some((lo, ch)),
                Some(done) => {
                    emit(f, done)?;
                    Some((ch, ch))
                }
                None => Some((ch, ch)),
            };
        }
        if let Some(done) = run {
            emit(f, done)?;
        }
        Ok(())
    }
}

impl FromIterator<u32> for CharSet {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        Self::from_chars(iter)
    }
}

/// Parses the output of the `Display` impl.
pub(crate) fn parse_ranges(s: &str) -> Option<CharSet> {
    let mut set = CharSet::new();
    for token in s.split_ascii_whitespace() {
        let (lo, hi) = match token.split_once('-') {
            Some((lo, hi)) => (lo, hi),
            None => (token, token),
        };
        let lo = u32::from_str_radix(lo, 16).ok()?;
        let hi = u32::from_str_radix(hi, 16).ok()?;
        if lo > hi || hi > MAX_CODEPOINT {
            return None;
        }
        for ch in lo..=hi {
            set.add_char(ch);
        }
    }
    Some(set)
}

/// Forward cursor over the leaves of a [`CharSet`].
#[derive(Clone, Debug)]
pub struct Leaves<'a> {
    set: &'a CharSet,
    pos: usize,
}

impl Leaves<'_> {
    /// Moves the cursor to the first leaf covering `ch` or any later
    /// codepoint.
    pub fn seek(&mut self, ch: u32) {
        let page = u16::try_from(ch >> 8).unwrap_or(u16::MAX);
        self.pos = match self.set.find_leaf_forward(self.pos, page) {
            Ok(pos) | Err(pos) => pos,
        };
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = (u32, &'a Leaf);

    fn next(&mut self) -> Option<Self::Item> {
        let page = *self.set.pages.get(self.pos)?;
        let leaf = &self.set.leaves[self.pos];
        self.pos += 1;
        Some((u32::from(page) << 8, leaf))
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_ranges, CharSet};
    use alloc::string::ToString;

    fn set(chars: &[u32]) -> CharSet {
        chars.iter().copied().collect()
    }

    #[test]
    fn leaf_search_reports_insertion_point() {
        let cs = set(&[0x41, 0x4e00, 0x1f600]);
        assert_eq!(cs.find_leaf_pos(0), Ok(0));
        assert_eq!(cs.find_leaf_pos(0x4e), Ok(1));
        assert_eq!(cs.find_leaf_pos(0x10), Err(1));
        assert_eq!(cs.find_leaf_pos(0x1000), Err(3));
    }

    #[test]
    fn deleted_chars_keep_their_leaf() {
        let mut cs = set(&[0x263a]);
        assert!(cs.del_char(0x263a), "valid codepoint");
        assert!(!cs.has_char(0x263a), "char should be gone");
        assert_eq!(cs.leaves().count(), 1);
        assert!(cs.is_empty(), "empty leaf holds nothing");
        assert_eq!(cs, CharSet::new());
        assert!(cs.is_subset(&CharSet::new()), "empty leaf is a subset");
    }

    #[test]
    fn rejects_out_of_range() {
        let mut cs = CharSet::new();
        assert!(!cs.add_char(0x11_0000), "beyond the last plane");
        assert!(cs.add_char(0x10_ffff), "last codepoint");
        assert_eq!(cs.count(), 1);
    }

    #[test]
    fn leaves_seek() {
        let cs = set(&[0x20, 0x300, 0x4e00]);
        let mut leaves = cs.leaves();
        leaves.seek(0x301);
        assert_eq!(leaves.next().map(|(base, _)| base), Some(0x300));
        leaves.seek(0x500);
        assert_eq!(leaves.next().map(|(base, _)| base), Some(0x4e00));
        assert!(leaves.next().is_none(), "cursor should be exhausted");
    }

    #[test]
    fn display_and_parse_ranges() {
        let cs = set(&[0x20, 0x21, 0x22, 0x41, 0x4e00]);
        let text = cs.to_string();
        assert_eq!(text, "20-22 41 4e00");
        assert_eq!(parse_ranges(&text), Some(cs));
        assert_eq!(parse_ranges("zz"), None);
    }
}
