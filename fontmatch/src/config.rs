// Copyright 2024 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolver configuration: rules, font sets and filters.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::constant::{hint_style, slant, weight, width};
use crate::expr::{compare_values, CompareOp};
use crate::font_set::{FontSet, SetName};
use crate::glob::glob_match;
use crate::lang::normalize_lang_list;
use crate::object::Object;
use crate::pattern::Pattern;
use crate::rule::{MatchKind, RuleSet};
use crate::value::{Binding, Boolean, Value};

/// Booleans filled in by [`Config::default_substitute`] when absent.
const BOOL_DEFAULTS: &[(Object, Boolean)] = &[
    (Object::Hinting, Boolean::True),
    (Object::VerticalLayout, Boolean::False),
    (Object::AutoHint, Boolean::False),
    (Object::GlobalAdvance, Boolean::True),
    (Object::EmbeddedBitmap, Boolean::True),
    (Object::Decorative, Boolean::False),
    (Object::Symbol, Boolean::False),
    (Object::Variable, Boolean::DontCare),
];

const DEFAULT_SIZE: f64 = 12.0;
const DEFAULT_DPI: f64 = 75.0;

/// Everything the resolver needs besides the query.
///
/// Matching and substitution borrow the configuration immutably, so a
/// shared `Config` may serve many threads once it is built.
#[derive(Clone, Default, Debug)]
pub struct Config {
    rule_sets: Vec<RuleSet>,
    fonts: [FontSet; 2],
    accept_globs: Vec<String>,
    reject_globs: Vec<String>,
    accept_patterns: Vec<Pattern>,
    reject_patterns: Vec<Pattern>,
    default_langs: Vec<String>,
    prgname: Option<String>,
}

impl Config {
    /// Creates an empty configuration with no rules, fonts or default
    /// languages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration whose default languages and program name
    /// come from the process environment.
    ///
    /// Languages are read from the first non-empty of `FC_LANG`, `LC_ALL`,
    /// `LC_CTYPE` and `LANG`, falling back to `en`.
    #[cfg(feature = "std")]
    pub fn from_env() -> Self {
        let langs = ["FC_LANG", "LC_ALL", "LC_CTYPE", "LANG"]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.is_empty())
            .map(|value| normalize_lang_list(&value))
            .filter(|langs| !langs.is_empty())
            .unwrap_or_else(|| alloc::vec!["en".to_string()]);
        let prgname = std::env::args_os().next().and_then(|arg0| {
            std::path::Path::new(&arg0)
                .file_name()
                .and_then(|name| name.to_str())
                .map(ToString::to_string)
        });
        log::debug!("default languages {langs:?}, program {prgname:?}");
        Self {
            default_langs: langs,
            prgname,
            ..Self::default()
        }
    }

    /// Appends a rule set. Sets run in the order they were added.
    pub fn add_rule_set(&mut self, set: RuleSet) {
        self.rule_sets.push(set);
    }

    /// Returns the rule sets in order.
    pub fn rule_sets(&self) -> &[RuleSet] {
        &self.rule_sets
    }

    /// Returns the rule sets for editing, e.g. to toggle one.
    pub fn rule_sets_mut(&mut self) -> &mut [RuleSet] {
        &mut self.rule_sets
    }

    /// Replaces the default languages with a colon separated locale list.
    pub fn set_default_languages(&mut self, langs: &str) {
        self.default_langs = normalize_lang_list(langs);
    }

    /// Returns the default languages, most preferred first.
    pub fn default_languages(&self) -> &[String] {
        &self.default_langs
    }

    /// Sets the program name added to pattern-time queries.
    pub fn set_prgname(&mut self, prgname: Option<&str>) {
        self.prgname = prgname.map(ToString::to_string);
    }

    /// Returns the program name, if one is set.
    pub fn prgname(&self) -> Option<&str> {
        self.prgname.as_deref()
    }

    /// Returns one of the font sets.
    pub fn fonts(&self, set: SetName) -> &FontSet {
        &self.fonts[set.index()]
    }

    /// Replaces one of the font sets without filtering.
    pub fn set_fonts(&mut self, set: SetName, fonts: FontSet) {
        self.fonts[set.index()] = fonts;
    }

    /// Accepts fonts whose file matches `glob`, even if a reject glob
    /// also matches.
    pub fn add_accept_glob(&mut self, glob: impl Into<String>) {
        self.accept_globs.push(glob.into());
    }

    /// Rejects fonts whose file matches `glob`.
    pub fn add_reject_glob(&mut self, glob: impl Into<String>) {
        self.reject_globs.push(glob.into());
    }

    /// Accepts fonts matching `pattern`, even if a reject pattern also
    /// matches.
    pub fn add_accept_pattern(&mut self, pattern: Pattern) {
        self.accept_patterns.push(pattern);
    }

    /// Rejects fonts matching `pattern`.
    pub fn add_reject_pattern(&mut self, pattern: Pattern) {
        self.reject_patterns.push(pattern);
    }

    /// Returns true if a font stored in `file` passes the glob filters.
    pub fn accept_filename(&self, file: &str) -> bool {
        if self.accept_globs.iter().any(|glob| glob_match(glob, file)) {
            return true;
        }
        !self.reject_globs.iter().any(|glob| glob_match(glob, file))
    }

    /// Returns true if `font` passes the pattern filters.
    pub fn accept_font(&self, font: &Pattern) -> bool {
        if self
            .accept_patterns
            .iter()
            .any(|pattern| matches_any(pattern, font))
        {
            return true;
        }
        !self
            .reject_patterns
            .iter()
            .any(|pattern| matches_any(pattern, font))
    }

    /// Runs scan rules over `font` and appends it to `set` if it passes
    /// the filters. Returns whether it was added.
    pub fn add_font(&mut self, set: SetName, mut font: Pattern) -> bool {
        self.substitute(&mut font, MatchKind::Scan);
        if let Ok(file) = font.get_string(Object::File, 0) {
            if !self.accept_filename(file) {
                log::debug!("rejected font file {file}");
                return false;
            }
        }
        if !self.accept_font(&font) {
            log::debug!("rejected font {font}");
            return false;
        }
        self.fonts[set.index()].push(font);
        true
    }

    /// Fills in the properties a query needs before matching that the
    /// caller and the rules left unset.
    pub fn default_substitute(&self, pattern: &mut Pattern) {
        add_if_absent(pattern, Object::Weight, weight::REGULAR.into());
        add_if_absent(pattern, Object::Slant, slant::ROMAN.into());
        add_if_absent(pattern, Object::Width, width::NORMAL.into());
        for (object, value) in BOOL_DEFAULTS {
            add_if_absent(pattern, *object, (*value).into());
        }

        let size = match pattern.get(Object::Size, 0) {
            Ok(Value::Range(range)) => (range.begin + range.end) / 2.0,
            Ok(value) => value.as_f64().unwrap_or(DEFAULT_SIZE),
            Err(_) => DEFAULT_SIZE,
        };
        let scale = pattern.get_double(Object::Scale, 0).unwrap_or(1.0);
        let dpi = pattern.get_double(Object::Dpi, 0).unwrap_or(DEFAULT_DPI);
        let size = if let Ok(pixel_size) = pattern.get_double(Object::PixelSize, 0) {
            pixel_size / dpi * 72.0 / scale
        } else {
            replace(pattern, Object::Scale, scale.into());
            replace(pattern, Object::Dpi, dpi.into());
            let pixel_size = size * scale * dpi / 72.0;
            let _ = pattern.add(Object::PixelSize, pixel_size);
            size
        };
        replace(pattern, Object::Size, size.into());

        add_if_absent(pattern, Object::FontVersion, 0x7fff_ffff.into());
        add_if_absent(pattern, Object::HintStyle, hint_style::FULL.into());
        if !pattern.contains(Object::NameLang) {
            let lang = self.default_langs.first().map_or("en", String::as_str);
            let _ = pattern.add(Object::NameLang, lang);
        }
        if let Ok(namelang) = pattern.get(Object::NameLang, 0).cloned() {
            for object in [Object::FamilyLang, Object::StyleLang, Object::FullNameLang] {
                if pattern.contains(object) {
                    continue;
                }
                let _ = pattern.add(object, namelang.clone());
                // Keep English names reachable when the requested one is missing.
                let _ = pattern.add_with_binding(object, "en-us".into(), Binding::Weak, true);
            }
        }
        if let Some(prgname) = &self.prgname {
            add_if_absent(pattern, Object::PrgName, prgname.as_str().into());
        }
        add_if_absent(pattern, Object::Order, 0.into());
    }
}

fn add_if_absent(pattern: &mut Pattern, object: Object, value: Value) {
    if !pattern.contains(object) {
        let _ = pattern.add(object, value);
    }
}

fn replace(pattern: &mut Pattern, object: Object, value: Value) {
    pattern.remove(object);
    let _ = pattern.add(object, value);
}

/// Every object of `pattern` except `namelang` must be present in `font`
/// with at least one value listing-equal to one of the pattern's values.
fn matches_any(pattern: &Pattern, font: &Pattern) -> bool {
    pattern
        .iter()
        .filter(|(object, _)| *object != Object::NameLang)
        .all(|(object, wanted)| {
            let Some(have) = font.values(object) else {
                return false;
            };
            wanted.iter().any(|want| {
                have.iter().any(|entry| {
                    compare_values(
                        Some(&entry.value),
                        CompareOp::Listing,
                        true,
                        Some(&want.value),
                    )
                })
            })
        })
}
