// Copyright 2024 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canonical language table.

/// Canonical language tags, sorted.
pub(crate) const LANGS: &[&str] = &[
    "aa",
    "ab",
    "af",
    "ak",
    "am",
    "an",
    "ar",
    "as",
    "ast",
    "av",
    "ay",
    "az-az",
    "az-ir",
    "ba",
    "be",
    "ber-dz",
    "ber-ma",
    "bg",
    "bh",
    "bho",
    "bi",
    "bin",
    "bm",
    "bn",
    "bo",
    "br",
    "brx",
    "bs",
    "bua",
    "byn",
    "ca",
    "ce",
    "ch",
    "chm",
    "chr",
    "ckb",
    "cmn",
    "co",
    "cop",
    "crh",
    "cs",
    "csb",
    "cu",
    "cv",
    "cy",
    "da",
    "de",
    "doi",
    "dv",
    "dz",
    "ee",
    "el",
    "en",
    "eo",
    "es",
    "et",
    "eu",
    "fa",
    "fat",
    "ff",
    "fi",
    "fil",
    "fj",
    "fo",
    "fr",
    "fur",
    "fy",
    "ga",
    "gd",
    "gez",
    "gl",
    "gn",
    "gu",
    "gv",
    "ha",
    "haw",
    "he",
    "hi",
    "hne",
    "ho",
    "hr",
    "hsb",
    "ht",
    "hu",
    "hy",
    "hz",
    "ia",
    "id",
    "ie",
    "ig",
    "ii",
    "ik",
    "io",
    "is",
    "it",
    "iu",
    "ja",
    "jv",
    "ka",
    "kaa",
    "kab",
    "ki",
    "kj",
    "kk",
    "kl",
    "km",
    "kn",
    "ko",
    "kok",
    "kr",
    "ks",
    "ku-am",
    "ku-iq",
    "ku-ir",
    "ku-tr",
    "kum",
    "kv",
    "kw",
    "kwm",
    "ky",
    "la",
    "lah",
    "lb",
    "lez",
    "lg",
    "li",
    "ln",
    "lo",
    "lt",
    "lv",
    "mai",
    "mg",
    "mh",
    "mi",
    "mk",
    "ml",
    "mn-cn",
    "mn-mn",
    "mni",
    "mo",
    "mr",
    "ms",
    "mt",
    "my",
    "na",
    "nb",
    "nds",
    "ne",
    "ng",
    "nl",
    "nn",
    "no",
    "nqo",
    "nr",
    "nso",
    "nv",
    "ny",
    "oc",
    "om",
    "or",
    "os",
    "ota",
    "pa",
    "pa-pk",
    "pap-an",
    "pap-aw",
    "pl",
    "ps",
    "pt",
    "qu",
    "quz",
    "rm",
    "rn",
    "ro",
    "ru",
    "rw",
    "sa",
    "sah",
    "sat",
    "sc",
    "sco",
    "sd",
    "se",
    "sel",
    "sg",
    "sh",
    "shs",
    "si",
    "sid",
    "sk",
    "sl",
    "sm",
    "sma",
    "smj",
    "smn",
    "sms",
    "sn",
    "so",
    "sq",
    "sr",
    "ss",
    "st",
    "su",
    "sv",
    "sw",
    "syr",
    "szl",
    "ta",
    "te",
    "tg",
    "th",
    "ti-er",
    "ti-et",
    "tig",
    "tk",
    "tl",
    "tn",
    "to",
    "tr",
    "ts",
    "tt",
    "tw",
    "ty",
    "tyv",
    "ug",
    "uk",
    "und-zmth",
    "und-zsye",
    "ur",
    "uz",
    "ve",
    "vi",
    "vo",
    "vot",
    "wa",
    "wal",
    "wen",
    "wo",
    "xh",
    "yap",
    "yi",
    "yo",
    "za",
    "zh-cn",
    "zh-hk",
    "zh-mo",
    "zh-sg",
    "zh-tw",
    "zu",
];

/// Number of canonical languages.
pub(crate) const LANG_COUNT: usize = LANGS.len();

/// Inclusive index range of the tags starting with each letter `a..=z`.
pub(crate) const LETTER_RANGES: [(usize, usize); 26] = [
    (0, 12),
    (13, 29),
    (30, 44),
    (45, 49),
    (50, 56),
    (57, 66),
    (67, 73),
    (74, 85),
    (86, 95),
    (96, 97),
    (98, 119),
    (120, 129),
    (130, 143),
    (144, 156),
    (157, 161),
    (162, 168),
    (169, 170),
    (171, 175),
    (176, 206),
    (207, 223),
    (224, 229),
    (230, 233),
    (234, 237),
    (238, 238),
    (239, 241),
    (242, 248),
];

/// Tags sharing a base language that differ only by territory.
pub(crate) const COUNTRY_GROUPS: &[&[usize]] = &[
    &[11, 12], // az
    &[15, 16], // ber
    &[111, 112, 113, 114], // ku
    &[136, 137], // mn
    &[164, 165], // pap
    &[211, 212], // ti
    &[226, 227], // und
    &[243, 244, 245, 246, 247], // zh
];
