// Copyright 2024 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoring candidate fonts against a query.
//!
//! Every object the query and a font both declare is compared with the
//! comparator of its [`Matcher`]. Distances land in a [`Score`] whose slots
//! are ordered by [`Priority`]; the font with the lexicographically
//! smallest score wins.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::ops::{Index, IndexMut};

use crate::charset::CharSet;
use crate::config::Config;
use crate::error::MatchError;
use crate::family::{eq_ignore_case, FamilyScores};
use crate::font_set::{FontSet, SetName};
use crate::glob::glob_match;
use crate::lang;
use crate::object::Object;
use crate::pattern::Pattern;
use crate::rule::MatchKind;
use crate::value::{Binding, Boolean, Value, ValueEntry};
use crate::weight;

/// Slots of the score vector, most significant first.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub(crate) enum Priority {
    File,
    FontFormat,
    Variable,
    Scalable,
    Color,
    Foundry,
    Charset,
    FamilyStrong,
    PostScriptNameStrong,
    Lang,
    FamilyWeak,
    PostScriptNameWeak,
    Symbol,
    Spacing,
    Size,
    PixelSize,
    Style,
    Slant,
    Weight,
    Width,
    FontHasHint,
    Decorative,
    Antialias,
    Rasterizer,
    Outline,
    Order,
    FontVersion,
}

const PRIORITY_COUNT: usize = Priority::FontVersion as usize + 1;

/// Per-criterion distances of one font from a query.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct Score([f64; PRIORITY_COUNT]);

impl Default for Score {
    fn default() -> Self {
        Self([0.0; PRIORITY_COUNT])
    }
}

impl Index<Priority> for Score {
    type Output = f64;

    fn index(&self, index: Priority) -> &f64 {
        &self.0[index as usize]
    }
}

impl IndexMut<Priority> for Score {
    fn index_mut(&mut self, index: Priority) -> &mut f64 {
        &mut self.0[index as usize]
    }
}

impl Score {
    /// Orders scores by their first differing slot.
    fn compare(&self, other: &Self) -> Ordering {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| a.total_cmp(b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// Returns the best representative of the font value and the distance
/// between the two values, or `None` if they cannot be compared.
type CompareFn = fn(&Value, &Value) -> Option<(Value, f64)>;

/// Comparator and score slots of one object.
#[derive(Copy, Clone)]
pub(crate) struct Matcher {
    compare: CompareFn,
    strong: Priority,
    weak: Priority,
}

impl core::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Matcher")
            .field("strong", &self.strong)
            .field("weak", &self.weak)
            .finish_non_exhaustive()
    }
}

/// Returns the matcher of `object`. With `include_lang`, the name language
/// objects are compared as languages.
pub(crate) fn matcher(object: Object, include_lang: bool) -> Option<Matcher> {
    use Priority as P;
    let object = match object {
        Object::FamilyLang | Object::StyleLang | Object::FullNameLang if include_lang => {
            Object::Lang
        }
        object => object,
    };
    let (compare, strong, weak): (CompareFn, _, _) = match object {
        Object::Family => (compare_family, P::FamilyStrong, P::FamilyWeak),
        Object::Style => (compare_string, P::Style, P::Style),
        Object::Slant => (compare_number, P::Slant, P::Slant),
        Object::Weight => (compare_range, P::Weight, P::Weight),
        Object::Width => (compare_range, P::Width, P::Width),
        Object::Size => (compare_size, P::Size, P::Size),
        Object::PixelSize => (compare_number, P::PixelSize, P::PixelSize),
        Object::Spacing => (compare_number, P::Spacing, P::Spacing),
        Object::Foundry => (compare_string, P::Foundry, P::Foundry),
        Object::Antialias => (compare_bool, P::Antialias, P::Antialias),
        Object::File => (compare_filename, P::File, P::File),
        Object::Rasterizer => (compare_string, P::Rasterizer, P::Rasterizer),
        Object::Outline => (compare_bool, P::Outline, P::Outline),
        Object::Scalable => (compare_bool, P::Scalable, P::Scalable),
        Object::CharSet => (compare_charset, P::Charset, P::Charset),
        Object::Lang => (compare_lang, P::Lang, P::Lang),
        Object::FontVersion => (compare_number, P::FontVersion, P::FontVersion),
        Object::FontFormat => (compare_string, P::FontFormat, P::FontFormat),
        Object::Decorative => (compare_bool, P::Decorative, P::Decorative),
        Object::PostScriptName => (
            compare_postscript,
            P::PostScriptNameStrong,
            P::PostScriptNameWeak,
        ),
        Object::Color => (compare_bool, P::Color, P::Color),
        Object::Symbol => (compare_bool, P::Symbol, P::Symbol),
        Object::Variable => (compare_bool, P::Variable, P::Variable),
        Object::FontHasHint => (compare_bool, P::FontHasHint, P::FontHasHint),
        Object::Order => (compare_number, P::Order, P::Order),
        _ => return None,
    };
    Some(Matcher {
        compare,
        strong,
        weak,
    })
}

fn compare_number(v1: &Value, v2: &Value) -> Option<(Value, f64)> {
    let (a, b) = (v1.as_f64()?, v2.as_f64()?);
    Some((v2.clone(), (b - a).abs()))
}

fn compare_string(v1: &Value, v2: &Value) -> Option<(Value, f64)> {
    let (a, b) = (v1.as_str()?, v2.as_str()?);
    let distance = if eq_ignore_case(a, b, false) { 0.0 } else { 1.0 };
    Some((v2.clone(), distance))
}

/// Returns true if the first characters already rule out equality.
fn differ_at_start(a: &str, b: &str) -> bool {
    let (Some(ca), Some(cb)) = (a.chars().next(), b.chars().next()) else {
        return a.is_empty() != b.is_empty();
    };
    ca.to_ascii_lowercase() != cb.to_ascii_lowercase() && ca != ' ' && cb != ' '
}

fn compare_family(v1: &Value, v2: &Value) -> Option<(Value, f64)> {
    let (a, b) = (v1.as_str()?, v2.as_str()?);
    let distance = if !differ_at_start(a, b) && eq_ignore_case(a, b, true) {
        0.0
    } else {
        1.0
    };
    Some((v2.clone(), distance))
}

fn compare_postscript(v1: &Value, v2: &Value) -> Option<(Value, f64)> {
    let (a, b) = (v1.as_str()?, v2.as_str()?);
    if differ_at_start(a, b) {
        return Some((v2.clone(), 1.0));
    }
    if a.is_empty() {
        return Some((v2.clone(), 0.0));
    }
    let strip = |s: &str| -> Vec<u8> {
        s.bytes()
            .filter(|c| *c != b' ' && *c != b'-')
            .map(|c| c.to_ascii_lowercase())
            .collect()
    };
    let (sa, sb) = (strip(a), strip(b));
    let common = sa.iter().zip(sb.iter()).take_while(|(x, y)| x == y).count();
    let distance = (a.len() - common.min(a.len())) as f64 / a.len() as f64;
    Some((v2.clone(), distance))
}

fn compare_lang(v1: &Value, v2: &Value) -> Option<(Value, f64)> {
    let result = match (v1, v2) {
        (Value::LangSet(a), Value::LangSet(b)) => a.compare(b),
        (Value::LangSet(a), Value::String(b)) => a.has_lang(b),
        (Value::String(a), Value::LangSet(b)) => b.has_lang(a),
        (Value::String(a), Value::String(b)) => lang::compare_lang(a, b),
        _ => return None,
    };
    Some((v2.clone(), result.distance()))
}

fn compare_bool(v1: &Value, v2: &Value) -> Option<(Value, f64)> {
    let (Value::Bool(a), Value::Bool(b)) = (v1, v2) else {
        return None;
    };
    let best = if *b == Boolean::DontCare { *a } else { *b };
    let distance = match (a, b) {
        (Boolean::True, Boolean::False) | (Boolean::False, Boolean::True) => 1.0,
        _ => 0.0,
    };
    Some((Value::Bool(best), distance))
}

fn compare_charset(v1: &Value, v2: &Value) -> Option<(Value, f64)> {
    let (Value::CharSet(a), Value::CharSet(b)) = (v1, v2) else {
        return None;
    };
    Some((v2.clone(), f64::from(a.subtract_count(b))))
}

fn compare_range(v1: &Value, v2: &Value) -> Option<(Value, f64)> {
    let (r1, r2) = (v1.as_range()?, v2.as_range()?);
    let (b1, e1, b2, e2) = (r1.begin, r1.end, r2.begin, r2.end);
    let best = if e1 < b2 {
        b2
    } else if e2 < b1 {
        e2
    } else {
        (b1.max(b2) + e1.min(e2)) * 0.5
    };
    let distance = if e1 < b2 || e2 < b1 {
        (b2 - e1).abs().min((b1 - e2).abs())
    } else {
        0.0
    };
    Some((Value::Double(best), distance))
}

fn compare_size(v1: &Value, v2: &Value) -> Option<(Value, f64)> {
    let (r1, r2) = (v1.as_range()?, v2.as_range()?);
    let (b1, e1, b2, e2) = (r1.begin, r1.end, r2.begin, r2.end);
    let best = Value::Double((b1 + e1) * 0.5);
    let distance = if e1 < b2 || e2 < b1 {
        (b2 - e1).abs().min((b1 - e2).abs())
    } else if b2 != e2 && b1 == e2 {
        // Semi-closed interval.
        1e-15
    } else {
        0.0
    };
    Some((best, distance))
}

fn compare_filename(v1: &Value, v2: &Value) -> Option<(Value, f64)> {
    let (a, b) = (v1.as_str()?, v2.as_str()?);
    let distance = if a == b {
        0.0
    } else if eq_ignore_case(a, b, false) {
        1.0
    } else if glob_match(a, b) {
        2.0
    } else {
        3.0
    };
    Some((v2.clone(), distance))
}

/// Compares every query value with every font value.
///
/// Returns the font value closest to the most specific query value along
/// with its position in `font`. When `score` is given, the smallest
/// distance of strong and weak query values is added to the matcher's
/// slots.
fn compare_value_list(
    matcher: Option<&Matcher>,
    query: &[ValueEntry],
    font: &[ValueEntry],
    score: Option<&mut Score>,
) -> Result<(Value, usize), MatchError> {
    let first = font.first().ok_or(MatchError::NoMatch)?;
    let Some(matcher) = matcher else {
        return Ok((first.value.clone(), 0));
    };
    let mut best_value = first.value.clone();
    let mut best = 1e99;
    let mut best_strong = 1e99;
    let mut best_weak = 1e99;
    let mut pos = 0;
    let shared = matcher.strong == matcher.weak;
    'outer: for (j, q) in query.iter().enumerate() {
        for (k, f) in font.iter().enumerate() {
            let (value, distance) =
                (matcher.compare)(&q.value, &f.value).ok_or(MatchError::TypeMismatch)?;
            let v = distance * 1000.0 + j as f64;
            if v < best {
                best_value = value;
                best = v;
                pos = k;
            }
            if shared {
                if best < 1000.0 {
                    break 'outer;
                }
            } else if q.binding == Binding::Strong {
                best_strong = v.min(best_strong);
            } else {
                best_weak = v.min(best_weak);
            }
        }
    }
    if let Some(score) = score {
        if shared {
            score[matcher.strong] += best;
        } else {
            score[matcher.strong] += best_strong;
            score[matcher.weak] += best_weak;
        }
    }
    Ok((best_value, pos))
}

/// Scores `font` against `query`.
fn compare(
    query: &Pattern,
    font: &Pattern,
    families: &FamilyScores,
) -> Result<Score, MatchError> {
    let mut score = Score::default();
    for (object, query_values) in query.iter() {
        let Some(font_values) = font.values(object) else {
            continue;
        };
        if object == Object::Family {
            let family = families.score(font_values);
            score[Priority::FamilyStrong] = family.strong;
            score[Priority::FamilyWeak] = family.weak;
        } else {
            compare_value_list(
                matcher(object, false).as_ref(),
                query_values,
                font_values,
                Some(&mut score),
            )?;
        }
    }
    Ok(score)
}

/// Returns the font of `sets` closest to `query`.
///
/// On ties the font encountered first wins.
pub fn font_set_match<'a>(
    sets: &[&'a FontSet],
    query: &Pattern,
) -> Result<&'a Pattern, MatchError> {
    let families = FamilyScores::new(query);
    let mut best: Option<(&'a Pattern, Score)> = None;
    for font in sets.iter().copied().flat_map(FontSet::fonts) {
        let score = compare(query, font, &families)?;
        log::trace!("score {score:?}");
        let better = match &best {
            Some((_, best_score)) => score.compare(best_score) == Ordering::Less,
            None => true,
        };
        if better {
            best = Some((font, score));
        }
    }
    let (font, score) = best.ok_or(MatchError::NoMatch)?;
    log::debug!("best score {score:?}");
    Ok(font)
}

/// Fonts ordered by closeness to a query.
#[derive(Clone, Debug)]
pub struct SortedFonts<'a> {
    /// Fonts, best first.
    pub fonts: Vec<&'a Pattern>,
    /// Union of the coverage of the returned fonts.
    pub charset: CharSet,
}

impl Config {
    fn font_sets(&self) -> [&FontSet; 2] {
        [self.fonts(SetName::System), self.fonts(SetName::Application)]
    }

    /// Finds the font closest to `query` and prepares it for rendering.
    ///
    /// `query` should already have been through pattern substitution and
    /// [`Config::default_substitute`].
    pub fn font_match(&self, query: &Pattern) -> Result<Pattern, MatchError> {
        let best = font_set_match(&self.font_sets(), query)?;
        self.render_prepare(query, best)
    }

    /// Returns every candidate font ordered by closeness to `query`.
    ///
    /// Fonts supporting none of the query languages sink below the ones that
    /// support one. With `trim`, fonts adding no coverage over the fonts
    /// before them are dropped, as are fonts without a charset. Without
    /// `trim` every font is kept, and fonts without a charset contribute
    /// nothing to the returned [`SortedFonts::charset`].
    pub fn font_sort(
        &self,
        query: &Pattern,
        trim: bool,
    ) -> Result<SortedFonts<'_>, MatchError> {
        let families = FamilyScores::new(query);
        let mut nodes: Vec<(&Pattern, Score)> = Vec::new();
        for font in self.font_sets().into_iter().flat_map(FontSet::fonts) {
            nodes.push((font, compare(query, font, &families)?));
        }
        if nodes.is_empty() {
            return Err(MatchError::NoMatch);
        }
        nodes.sort_by(|a, b| a.1.compare(&b.1));

        let query_langs = query.values(Object::Lang).unwrap_or_default();
        let mut satisfied: Vec<bool> = alloc::vec![false; query_langs.len()];
        for (font, score) in &mut nodes {
            let mut satisfies = false;
            if score[Priority::Lang] < 2000.0 {
                if let Some(font_lang) = font.values(Object::Lang).and_then(<[_]>::first) {
                    for (i, query_lang) in query_langs.iter().enumerate() {
                        if satisfied[i] {
                            continue;
                        }
                        let distance = compare_lang(&query_lang.value, &font_lang.value)
                            .map_or(-1.0, |(_, distance)| distance);
                        if (0.0..2.0).contains(&distance) {
                            satisfied[i] = true;
                            satisfies = true;
                            break;
                        }
                    }
                }
            }
            if !satisfies {
                score[Priority::Lang] = 10000.0;
            }
        }
        nodes.sort_by(|a, b| a.1.compare(&b.1));

        let mut charset = CharSet::new();
        let mut fonts = Vec::new();
        for (i, (font, _)) in nodes.into_iter().enumerate() {
            let adds_chars = match font.get_charset(Object::CharSet, 0) {
                Ok(cs) => charset.merge(cs),
                Err(_) if trim => continue,
                Err(_) => false,
            };
            if i == 0 || !trim || adds_chars {
                fonts.push(font);
            }
        }
        Ok(SortedFonts { fonts, charset })
    }

    /// Builds the pattern describing `font` as selected for `query`.
    ///
    /// Objects both patterns declare keep only the font value closest to
    /// the query. Names stay paired with their languages. Objects only the
    /// font declares are copied with a weak binding, and objects only the
    /// query declares are copied as they are. Font rules run on the result.
    pub fn render_prepare(
        &self,
        query: &Pattern,
        font: &Pattern,
    ) -> Result<Pattern, MatchError> {
        let variable = font.get_bool(Object::Variable, 0) == Ok(Boolean::True);
        let mut variations = String::new();
        let mut out = Pattern::new();
        for (object, font_values) in font.iter() {
            if object.is_name_lang() {
                continue;
            }
            if let Some(lang_object) = object.lang_object() {
                if let Some(font_langs) = font.values(lang_object) {
                    let chosen = if let Some(query_langs) = query.values(lang_object) {
                        let m = matcher(lang_object, true);
                        Some(compare_value_list(m.as_ref(), query_langs, font_langs, None)?.1)
                    } else if let Some(query_names) = query.values(object) {
                        let m = matcher(object, false);
                        Some(compare_value_list(m.as_ref(), query_names, font_values, None)?.1)
                    } else {
                        None
                    };
                    match chosen {
                        Some(n) => {
                            let pairs = [(object, font_values), (lang_object, font_langs)];
                            for (object, values) in pairs {
                                if let Some(entry) = values.get(n) {
                                    add(&mut out, object, entry.value.clone(), Binding::Strong)?;
                                }
                            }
                        }
                        None => {
                            copy_weak(&mut out, object, font_values)?;
                            copy_weak(&mut out, lang_object, font_langs)?;
                        }
                    }
                    continue;
                }
            }
            let Some(query_values) = query.values(object) else {
                copy_weak(&mut out, object, font_values)?;
                continue;
            };
            let m = matcher(object, false);
            let (best, _) = compare_value_list(m.as_ref(), query_values, font_values, None)?;
            let ranged = matches!(
                font_values.first().map(|entry| &entry.value),
                Some(Value::Range(_))
            );
            if variable && ranged {
                if let Some(axis) = axis_setting(object, &best) {
                    if !variations.is_empty() {
                        variations.push(',');
                    }
                    variations.push_str(&axis);
                }
            }
            add(&mut out, object, best, Binding::Strong)?;
        }
        for (object, values) in query.iter() {
            if !font.contains(object) && !object.is_name_lang() {
                out.add_list(object, values.iter().cloned(), true)
                    .map_err(|_| MatchError::TypeMismatch)?;
            }
        }
        if !variations.is_empty() {
            if let Ok(existing) = out.get_string(Object::FontVariations, 0) {
                variations.push(',');
                variations.push_str(existing);
                out.remove(Object::FontVariations);
            }
            let variations = Value::from(variations.as_str());
            add(&mut out, Object::FontVariations, variations, Binding::Strong)?;
        }
        self.substitute_with_pat(&mut out, Some(query), MatchKind::Font);
        Ok(out)
    }
}

fn add(
    out: &mut Pattern,
    object: Object,
    value: Value,
    binding: Binding,
) -> Result<(), MatchError> {
    out.add_with_binding(object, value, binding, true)
        .map_err(|_| MatchError::TypeMismatch)
}

fn copy_weak(
    out: &mut Pattern,
    object: Object,
    values: &[ValueEntry],
) -> Result<(), MatchError> {
    let entries = values
        .iter()
        .map(|entry| ValueEntry::new(entry.value.clone(), Binding::Weak));
    out.add_list(object, entries, true)
        .map_err(|_| MatchError::TypeMismatch)
}

/// Returns the variation setting selecting `value` on the standard axis of
/// `object`.
fn axis_setting(object: Object, value: &Value) -> Option<String> {
    let num = value.as_f64()?;
    match object {
        Object::Weight => Some(format!("wght={}", weight::to_opentype(num)?)),
        Object::Width => Some(format!("wdth={num}")),
        Object::Size => Some(format!("opsz={num}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        compare, compare_bool, compare_family, compare_postscript, compare_range, compare_size,
        compare_value_list, matcher, Priority,
    };
    use crate::family::FamilyScores;
    use crate::object::Object;
    use crate::pattern::Pattern;
    use crate::value::{Binding, Boolean, Range, Value, ValueEntry};

    #[test]
    fn priorities_are_ordered() {
        assert!(Priority::File < Priority::FamilyStrong, "file first");
        assert!(Priority::FamilyStrong < Priority::Lang, "strong family before lang");
        assert!(Priority::Lang < Priority::FamilyWeak, "lang before weak family");
        assert_eq!(Priority::FontVersion as usize, 26);
    }

    #[test]
    fn family_distance_ignores_case_and_blanks() {
        let d = |a: &str, b: &str| compare_family(&a.into(), &b.into()).unwrap().1;
        assert_eq!(d("DejaVu Sans", "dejavusans"), 0.0);
        assert_eq!(d("DejaVu Sans", "Liberation Sans"), 1.0);
        assert_eq!(d("Sans", "Serif"), 1.0);
    }

    #[test]
    fn postscript_distance_is_unmatched_fraction() {
        let d = |a: &str, b: &str| compare_postscript(&a.into(), &b.into()).unwrap().1;
        assert_eq!(d("Abcd", "ab-cd"), 0.0);
        assert_eq!(d("Abcd", "abxx"), 0.5);
        assert_eq!(d("Abcd", "Zbcd"), 1.0);
    }

    #[test]
    fn ranges_overlap_or_measure_gap() {
        let weight = Value::Range(Range::new(100.0, 200.0));
        let (best, d) = compare_range(&Value::Integer(150), &weight).unwrap();
        assert_eq!((best, d), (Value::Double(150.0), 0.0));
        let (best, d) = compare_range(&Value::Integer(80), &weight).unwrap();
        assert_eq!((best, d), (Value::Double(100.0), 20.0));
        assert!(compare_range(&"x".into(), &weight).is_none(), "strings are incomparable");
        let (_, d) = compare_size(&Value::Double(12.0), &Value::Range(Range::new(8.0, 12.0)))
            .unwrap();
        assert_eq!(d, 1e-15);
    }

    #[test]
    fn dont_care_matches_any_bool() {
        let d = |a, b| compare_bool(&Value::Bool(a), &Value::Bool(b)).unwrap();
        assert_eq!(d(Boolean::True, Boolean::False).1, 1.0);
        assert_eq!(d(Boolean::DontCare, Boolean::False).1, 0.0);
        assert_eq!(d(Boolean::True, Boolean::DontCare), (Value::Bool(Boolean::True), 0.0));
    }

    #[test]
    fn earlier_query_values_win_ties() {
        let query = [
            ValueEntry::new(Value::Integer(100), Binding::Strong),
            ValueEntry::new(Value::Integer(0), Binding::Strong),
        ];
        let font = [
            ValueEntry::new(Value::Integer(0), Binding::Strong),
            ValueEntry::new(Value::Integer(100), Binding::Strong),
        ];
        let matcher = matcher(Object::Slant, false);
        let (best, pos) = compare_value_list(matcher.as_ref(), &query, &font, None).unwrap();
        assert_eq!((best, pos), (Value::Integer(100), 1));
    }

    #[test]
    fn family_score_uses_query_positions() {
        let mut query = Pattern::new();
        query.add(Object::Family, "A").unwrap();
        query
            .add_with_binding(Object::Family, "B".into(), Binding::Weak, true)
            .unwrap();
        let mut font = Pattern::new();
        font.add(Object::Family, "b").unwrap();
        let families = FamilyScores::new(&query);
        let score = compare(&query, &font, &families).unwrap();
        assert_eq!(score[Priority::FamilyStrong], 1e99);
        assert_eq!(score[Priority::FamilyWeak], 1.0);
    }
}
