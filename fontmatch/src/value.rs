// Copyright 2024 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed property values.

use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

use crate::charset::CharSet;
use crate::lang::LangSet;

/// Discriminant of a [`Value`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ValueType {
    /// Signed integer.
    Integer,
    /// Floating point number.
    Double,
    /// String.
    String,
    /// Tri-state boolean.
    Bool,
    /// 2x2 transformation matrix.
    Matrix,
    /// Closed numeric interval.
    Range,
    /// Unicode coverage set.
    CharSet,
    /// Language set.
    LangSet,
    /// Opaque face handle.
    Face,
}

impl ValueType {
    /// Returns a short lowercase name for the type.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Double => "double",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Matrix => "matrix",
            Self::Range => "range",
            Self::CharSet => "charset",
            Self::LangSet => "langset",
            Self::Face => "face",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tri-state boolean.
///
/// `DontCare` satisfies equality-style tests against either truth value.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Boolean {
    /// False.
    False,
    /// True.
    True,
    /// Either value is acceptable.
    DontCare,
}

impl Boolean {
    /// Returns true for anything other than [`Boolean::False`].
    pub const fn is_truthy(self) -> bool {
        !matches!(self, Self::False)
    }
}

impl From<bool> for Boolean {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

impl fmt::Display for Boolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::False => "False",
            Self::True => "True",
            Self::DontCare => "DontCare",
        })
    }
}

/// 2x2 transformation matrix.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Matrix {
    /// Row 0, column 0.
    pub xx: f64,
    /// Row 0, column 1.
    pub xy: f64,
    /// Row 1, column 0.
    pub yx: f64,
    /// Row 1, column 1.
    pub yy: f64,
}

impl Matrix {
    /// The identity transform.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    /// Creates a new matrix from its four cells.
    pub const fn new(xx: f64, xy: f64, yx: f64, yy: f64) -> Self {
        Self { xx, xy, yx, yy }
    }

    /// Returns the product `self * other`.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            xx: self.xx * other.xx + self.xy * other.yx,
            xy: self.xx * other.xy + self.xy * other.yy,
            yx: self.yx * other.xx + self.yy * other.yx,
            yy: self.yx * other.xy + self.yy * other.yy,
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Closed numeric interval.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Range {
    /// Lower bound.
    pub begin: f64,
    /// Upper bound.
    pub end: f64,
}

impl Range {
    /// Creates a new range.
    pub const fn new(begin: f64, end: f64) -> Self {
        Self { begin, end }
    }

    /// Creates a range covering a single point.
    pub const fn point(value: f64) -> Self {
        Self {
            begin: value,
            end: value,
        }
    }
}

/// Shared handle to a loaded face.
///
/// Handles compare equal only when they refer to the same allocation.
#[derive(Clone)]
pub struct FaceHandle(Arc<dyn Any + Send + Sync>);

impl FaceHandle {
    /// Wraps an arbitrary face object.
    pub fn new<T: Any + Send + Sync>(face: T) -> Self {
        Self(Arc::new(face))
    }

    /// Returns the wrapped face if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl PartialEq for FaceHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FaceHandle")
            .field(&Arc::as_ptr(&self.0))
            .finish()
    }
}

/// A typed property value.
///
/// An absent value is expressed as `Option::<Value>::None` by the
/// operations that can produce one.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    /// Signed integer.
    Integer(i32),
    /// Floating point number.
    Double(f64),
    /// String.
    String(Arc<str>),
    /// Tri-state boolean.
    Bool(Boolean),
    /// Transformation matrix.
    Matrix(Matrix),
    /// Numeric interval.
    Range(Range),
    /// Unicode coverage.
    CharSet(Arc<CharSet>),
    /// Language coverage.
    LangSet(Arc<LangSet>),
    /// Loaded face.
    Face(FaceHandle),
}

impl Value {
    /// Returns the type of the value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Integer(_) => ValueType::Integer,
            Self::Double(_) => ValueType::Double,
            Self::String(_) => ValueType::String,
            Self::Bool(_) => ValueType::Bool,
            Self::Matrix(_) => ValueType::Matrix,
            Self::Range(_) => ValueType::Range,
            Self::CharSet(_) => ValueType::CharSet,
            Self::LangSet(_) => ValueType::LangSet,
            Self::Face(_) => ValueType::Face,
        }
    }

    /// Returns the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric payload of an integer or double.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(f64::from(*i)),
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the value as an interval; numbers become single points.
    pub fn as_range(&self) -> Option<Range> {
        match self {
            Self::Range(r) => Some(*r),
            _ => self.as_f64().map(Range::point),
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value.into())
    }
}

impl From<Boolean> for Value {
    fn from(value: Boolean) -> Self {
        Self::Bool(value)
    }
}

impl From<Matrix> for Value {
    fn from(value: Matrix) -> Self {
        Self::Matrix(value)
    }
}

impl From<Range> for Value {
    fn from(value: Range) -> Self {
        Self::Range(value)
    }
}

impl From<CharSet> for Value {
    fn from(value: CharSet) -> Self {
        Self::CharSet(Arc::new(value))
    }
}

impl From<LangSet> for Value {
    fn from(value: LangSet) -> Self {
        Self::LangSet(Arc::new(value))
    }
}

impl From<FaceHandle> for Value {
    fn from(value: FaceHandle) -> Self {
        Self::Face(value)
    }
}

/// How strongly a value in a list should stick during matching.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Binding {
    /// The value scores in the weak slot of its object.
    Weak,
    /// The value scores in the strong slot of its object.
    #[default]
    Strong,
    /// Inherit the binding of the value being edited.
    Same,
}

/// A value together with its binding.
#[derive(Clone, PartialEq, Debug)]
pub struct ValueEntry {
    /// The value.
    pub value: Value,
    /// The binding.
    pub binding: Binding,
}

impl ValueEntry {
    /// Creates a new entry.
    pub fn new(value: Value, binding: Binding) -> Self {
        Self { value, binding }
    }
}
