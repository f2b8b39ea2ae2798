// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

use crate::object::Object;
use crate::value::ValueType;

/// Errors raised while building a pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum PatternError {
    /// The object name is not in the registry.
    UnknownObject(String),
    /// The object does not accept values of this type.
    InvalidType {
        /// The object being assigned.
        object: Object,
        /// The type of the rejected value.
        found: ValueType,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownObject(name) => write!(f, "unsupported object \"{name}\""),
            Self::InvalidType { object, found } => write!(
                f,
                "object \"{object}\" expects {} values, found {found}",
                object.value_type()
            ),
        }
    }
}

impl core::error::Error for PatternError {}

/// Reasons a lookup or match did not produce a value.
///
/// The successful outcome is the `Ok` arm of the surrounding `Result`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchError {
    /// The object is absent, or no candidate font was available.
    NoMatch,
    /// A value had an unexpected type, or two values could not be compared.
    TypeMismatch,
    /// The object is present but has no value at the requested index.
    NoId,
    /// Allocation failed.
    OutOfMemory,
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoMatch => "no match",
            Self::TypeMismatch => "type mismatch",
            Self::NoId => "no value at index",
            Self::OutOfMemory => "out of memory",
        })
    }
}

impl core::error::Error for MatchError {}

/// Errors raised while compiling substitution rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleError {
    /// A test follows an edit within one rule-list.
    TestAfterEdit {
        /// Position of the offending test in the rule-list.
        index: usize,
    },
    /// Rule-lists must target a concrete match kind.
    DefaultKind,
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TestAfterEdit { index } => {
                write!(f, "test at position {index} follows an edit")
            }
            Self::DefaultKind => f.write_str("rule-list has no concrete match kind"),
        }
    }
}

impl core::error::Error for RuleError {}

/// Error returned when parsing a textual pattern name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseNameError {
    kind: ParseNameErrorKind,
    at: usize,
}

/// Kinds of errors that can occur when parsing pattern names.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseNameErrorKind {
    /// The object name is not in the registry.
    UnknownObject(String),
    /// A value could not be converted to its object's type.
    InvalidValue(Object),
    /// A bare constant name was not recognized.
    UnknownConstant(String),
}

impl ParseNameError {
    pub(crate) fn new(kind: ParseNameErrorKind, at: usize) -> Self {
        Self { kind, at }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &ParseNameErrorKind {
        &self.kind
    }

    /// Returns the byte offset of the offending element.
    pub fn byte_offset(&self) -> usize {
        self.at
    }
}

impl fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseNameErrorKind::UnknownObject(name) => {
                write!(f, "unsupported object \"{name}\"")?;
            }
            ParseNameErrorKind::InvalidValue(object) => {
                write!(f, "invalid value for \"{object}\"")?;
            }
            ParseNameErrorKind::UnknownConstant(name) => {
                write!(f, "unknown constant \"{name}\"")?;
            }
        }
        write!(f, " at byte {}", self.at)
    }
}

impl core::error::Error for ParseNameError {}
