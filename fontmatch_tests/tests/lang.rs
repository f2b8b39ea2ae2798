// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use fontmatch::{compare_lang, normalize_lang_list, LangResult, LangSet};

#[test]
fn lang_contains_territories() {
    let set: LangSet = ["en", "fr"].into_iter().collect();
    assert!(set.contains_lang("en-GB"), "territory of a contained language");
    assert!(set.contains_lang("EN"), "case insensitive");
    assert!(!set.contains_lang("de"), "other language");
}

#[test]
fn lang_compare_sets() {
    let set: LangSet = ["en", "zh-tw"].into_iter().collect();
    assert_eq!(set.compare(&set), LangResult::Equal);

    let us: LangSet = ["en-US"].into_iter().collect();
    let gb: LangSet = ["en-GB"].into_iter().collect();
    assert_eq!(us.compare(&gb), LangResult::DifferentTerritory);

    let de: LangSet = ["de"].into_iter().collect();
    assert_eq!(us.compare(&de), LangResult::DifferentLang);
}

#[test]
fn lang_has_lang() {
    let set: LangSet = ["en", "pt-br"].into_iter().collect();
    assert_eq!(set.has_lang("en"), LangResult::Equal);
    assert_eq!(set.has_lang("pt-pt"), LangResult::DifferentTerritory);
    assert_eq!(set.has_lang("ja"), LangResult::DifferentLang);
}

#[test]
fn lang_set_algebra() {
    let a: LangSet = ["en", "fr", "tlh"].into_iter().collect();
    let b: LangSet = ["fr", "de"].into_iter().collect();
    let union = a.union(&b);
    assert!(union.contains(&a) && union.contains(&b), "union covers both");
    let diff = a.subtract(&b);
    assert_eq!(diff.to_string(), "en|tlh");
}

#[test]
fn lang_compare_tags() {
    assert_eq!(compare_lang("en-US", "en-us"), LangResult::Equal);
    assert_eq!(compare_lang("en-US", "en"), LangResult::DifferentTerritory);
    assert_eq!(compare_lang("en", "de"), LangResult::DifferentLang);
}

#[test]
fn lang_normalize_locale_list() {
    assert_eq!(
        normalize_lang_list("de_DE.UTF-8:C:de:x"),
        ["de", "en"],
        "duplicates and malformed entries dropped"
    );
}
