// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use fontmatch::CharSet;

/// Sets spanning several pages, with shared and disjoint leaves.
fn samples() -> [CharSet; 4] {
    [
        CharSet::new(),
        CharSet::from_chars(0x20..=0x7e),
        CharSet::from_chars((0x41..=0x5a).chain(0x400..=0x4ff).chain([0x1f600])),
        CharSet::from_chars((0..0x3000).step_by(7)),
    ]
}

const PROBES: &[u32] = &[0, 0x20, 0x41, 0x5b, 0x7e, 0x400, 0x4ff, 0x1f600, 0x2ff9, 0x10_ffff];

#[test]
fn charset_union_has_either() {
    for a in &samples() {
        for b in &samples() {
            let u = a.union(b);
            for &c in PROBES {
                assert_eq!(u.has_char(c), a.has_char(c) || b.has_char(c), "{c:#x}");
            }
            assert!(a.is_subset(&u), "a is a subset of the union");
            assert!(b.is_subset(&u), "b is a subset of the union");
        }
    }
}

#[test]
fn charset_subtract_self() {
    for a in &samples() {
        assert_eq!(a.subtract_count(a), 0);
        assert_eq!(&a.union(&a.subtract(a)), a);
    }
}

#[test]
fn charset_counts_agree() {
    for a in &samples() {
        for b in &samples() {
            assert_eq!(a.intersect_count(b), a.intersect(b).count());
            assert_eq!(a.subtract_count(b), a.subtract(b).count());
            assert_eq!(
                a.intersect_count(b) + a.subtract_count(b),
                a.count(),
                "partition of a"
            );
        }
    }
}

#[test]
fn charset_edit_chars() {
    let mut cs = CharSet::new();
    assert!(cs.add_char(0x263a), "valid codepoint");
    assert!(cs.add_char(0x41), "valid codepoint");
    assert_eq!(cs.chars().collect::<Vec<_>>(), [0x41, 0x263a]);
    assert!(cs.del_char(0x41), "valid codepoint");
    assert!(!cs.has_char(0x41), "deleted");
    assert_eq!(cs.count(), 1);
}

#[test]
fn charset_merge_reports_growth() {
    let mut acc = CharSet::from_chars(0x20..=0x7e);
    assert!(!acc.merge(&CharSet::from_chars(0x41..=0x5a)), "already covered");
    assert!(acc.merge(&CharSet::from_chars([0x400])), "new page");
    assert!(acc.has_char(0x400), "merged");
}
