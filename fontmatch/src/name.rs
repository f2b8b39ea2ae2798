// Copyright 2024 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Textual pattern names such as `DejaVu Sans,Sans-12:weight=bold:italic`.

use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;
use core::str::FromStr;

use crate::charset::parse_ranges;
use crate::constant;
use crate::error::{ParseNameError, ParseNameErrorKind};
use crate::lang::LangSet;
use crate::object::Object;
use crate::pattern::Pattern;
use crate::value::{Boolean, Matrix, Range, Value, ValueType};

const FAMILY_ESCAPES: &str = "\\-:,";
const VALUE_ESCAPES: &str = "\\=_:,";

/// Reads up to the first unescaped delimiter. Returns the unescaped text and
/// the position of the delimiter, or the end of `s`.
fn token(s: &str, start: usize, delims: &[char]) -> (String, usize) {
    let mut out = String::new();
    let mut chars = s[start..].char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            if let Some((_, escaped)) = chars.next() {
                out.push(escaped);
            }
            continue;
        }
        if delims.contains(&c) {
            return (out, start + i);
        }
        out.push(c);
    }
    (out, s.len())
}

fn parse_bool(s: &str) -> Option<Boolean> {
    let lower = s.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next()? {
        't' | 'y' | '1' => Some(Boolean::True),
        'f' | 'n' | '0' => Some(Boolean::False),
        'd' | 'x' | '2' => Some(Boolean::DontCare),
        'o' => match chars.next()? {
            'n' => Some(Boolean::True),
            'f' => Some(Boolean::False),
            _ => None,
        },
        _ => None,
    }
}

fn parse_number(object: Object, s: &str) -> Option<f64> {
    match constant::lookup_for(object, s).or_else(|| constant::lookup(s)) {
        Some(c) => Some(f64::from(c.value)),
        None => s.trim().parse().ok(),
    }
}

/// Converts the text of one value to the type `object` declares.
fn parse_value(object: Object, s: &str) -> Option<Value> {
    Some(match object.value_type() {
        ValueType::Integer => {
            if let Some(c) = constant::lookup_for(object, s).or_else(|| constant::lookup(s)) {
                Value::Integer(c.value)
            } else if let Ok(i) = s.trim().parse() {
                Value::Integer(i)
            } else {
                Value::Double(s.trim().parse().ok()?)
            }
        }
        ValueType::Double => Value::Double(s.trim().parse().ok()?),
        ValueType::String => Value::String(Arc::from(s)),
        ValueType::Bool => Value::Bool(parse_bool(s)?),
        ValueType::Matrix => {
            let mut cells = s.split_ascii_whitespace().map(str::parse::<f64>);
            let mut next = || cells.next()?.ok();
            let m = Matrix::new(next()?, next()?, next()?, next()?);
            if cells.next().is_some() {
                return None;
            }
            Value::Matrix(m)
        }
        ValueType::Range => match s.trim().strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            Some(inner) => {
                let mut bounds = inner.split_ascii_whitespace();
                let begin = parse_number(object, bounds.next()?)?;
                let end = parse_number(object, bounds.next()?)?;
                Value::Range(Range::new(begin, end))
            }
            None => Value::Double(parse_number(object, s)?),
        },
        ValueType::CharSet => parse_ranges(s)?.into(),
        ValueType::LangSet => s
            .split('|')
            .filter(|tag| !tag.is_empty())
            .collect::<LangSet>()
            .into(),
        ValueType::Face => return None,
    })
}

impl FromStr for Pattern {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut pattern = Self::new();
        let mut pos = 0;
        loop {
            let (family, end) = token(s, pos, &['-', ':', ',']);
            if !family.is_empty() {
                let _ = pattern.add(Object::Family, family.as_str());
            }
            pos = end;
            match s[pos..].chars().next() {
                Some(',') => pos += 1,
                _ => break,
            }
        }
        if s[pos..].starts_with('-') {
            pos += 1;
            loop {
                let (size, end) = token(s, pos, &[':', ',']);
                let value = size.trim().parse::<f64>().map_err(|_| {
                    ParseNameError::new(ParseNameErrorKind::InvalidValue(Object::Size), pos)
                })?;
                let _ = pattern.add(Object::Size, value);
                pos = end;
                match s[pos..].chars().next() {
                    Some(',') => pos += 1,
                    _ => break,
                }
            }
        }
        while s[pos..].starts_with(':') {
            pos += 1;
            let start = pos;
            let (name, end) = token(s, pos, &['=', ':']);
            pos = end;
            if !s[pos..].starts_with('=') {
                if name.is_empty() {
                    continue;
                }
                let c = constant::lookup(&name).ok_or_else(|| {
                    ParseNameError::new(ParseNameErrorKind::UnknownConstant(name.clone()), start)
                })?;
                let _ = pattern.add(c.object, c.to_value());
                continue;
            }
            let object = Object::from_name(&name).ok_or_else(|| {
                ParseNameError::new(ParseNameErrorKind::UnknownObject(name.clone()), start)
            })?;
            pos += 1;
            loop {
                let value_start = pos;
                let (text, end) = token(s, pos, &[':', ',']);
                let value = parse_value(object, &text).ok_or_else(|| {
                    ParseNameError::new(ParseNameErrorKind::InvalidValue(object), value_start)
                })?;
                pattern.add(object, value).map_err(|_| {
                    ParseNameError::new(ParseNameErrorKind::InvalidValue(object), value_start)
                })?;
                pos = end;
                match s[pos..].chars().next() {
                    Some(',') => pos += 1,
                    _ => break,
                }
            }
        }
        Ok(pattern)
    }
}

struct Escaped<'a>(&'a str, &'static str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            if self.1.contains(c) {
                f.write_str("\\")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Formats a value the way pattern names spell it.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Double(d) => write!(f, "{d}"),
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Matrix(m) => write!(f, "{} {} {} {}", m.xx, m.xy, m.yx, m.yy),
            Self::Range(r) => write!(f, "[{} {}]", r.begin, r.end),
            Self::CharSet(cs) => write!(f, "{cs}"),
            Self::LangSet(ls) => write!(f, "{ls}"),
            Self::Face(_) => Ok(()),
        }
    }
}

/// Formats the pattern as a name that [`Pattern::from_str`] reads back.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = |f: &mut fmt::Formatter<'_>,
                    object: Object,
                    escapes: &'static str|
         -> fmt::Result {
            for (i, entry) in self.values(object).unwrap_or_default().iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                let text = alloc::format!("{}", entry.value);
                write!(f, "{}", Escaped(&text, escapes))?;
            }
            Ok(())
        };
        list(f, Object::Family, FAMILY_ESCAPES)?;
        if self.contains(Object::Size) {
            f.write_str("-")?;
            list(f, Object::Size, FAMILY_ESCAPES)?;
        }
        for (object, _) in self.iter() {
            if matches!(object, Object::Family | Object::Size | Object::FtFace) {
                continue;
            }
            write!(f, ":{object}=")?;
            list(f, object, VALUE_ESCAPES)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_bool, token};
    use crate::value::Boolean;

    #[test]
    fn tokens_honor_escapes() {
        assert_eq!(token("a\\-b-c", 0, &['-']), ("a-b".into(), 4));
        assert_eq!(token("abc", 1, &[':']), ("bc".into(), 3));
    }

    #[test]
    fn booleans() {
        assert_eq!(parse_bool("True"), Some(Boolean::True));
        assert_eq!(parse_bool("off"), Some(Boolean::False));
        assert_eq!(parse_bool("on"), Some(Boolean::True));
        assert_eq!(parse_bool("x"), Some(Boolean::DontCare));
        assert_eq!(parse_bool("maybe"), None);
    }
}
