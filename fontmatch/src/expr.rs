// Copyright 2024 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule expressions: evaluation, type promotion and value comparison.

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "unused when std is also enabled")]
use core_maths::CoreFloat;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::charset::CharSet;
use crate::constant;
use crate::family::{contains_ignore_case, eq_ignore_case};
use crate::lang::LangSet;
use crate::object::Object;
use crate::pattern::Pattern;
use crate::rule::MatchKind;
use crate::value::{Boolean, Matrix, Range, Value};

/// Comparison operators usable in tests and expressions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum CompareOp {
    /// Equal.
    Equal,
    /// Not equal.
    NotEqual,
    /// Left contains right.
    Contains,
    /// Left does not contain right.
    NotContains,
    /// Like `Contains`, as used when listing fonts.
    Listing,
    /// Less than.
    Less,
    /// Less than or equal.
    LessEqual,
    /// Greater than.
    More,
    /// Greater than or equal.
    MoreEqual,
}

/// Binary operators.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BinaryOp {
    /// Logical or.
    Or,
    /// Logical and.
    And,
    /// Addition, concatenation or union.
    Plus,
    /// Subtraction or set difference.
    Minus,
    /// Multiplication.
    Times,
    /// Division.
    Divide,
}

/// Rounding operators that turn doubles into integers.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundOp {
    /// Round towards negative infinity.
    Floor,
    /// Round towards positive infinity.
    Ceil,
    /// Round half up.
    Round,
    /// Round towards zero.
    Trunc,
}

/// Expression tree.
#[derive(Clone, Debug)]
pub enum Expr {
    /// Literal value.
    Value(Value),
    /// Matrix built from four numeric cells.
    Matrix(Box<[Self; 4]>),
    /// First value of an object in the pattern selected by `kind`.
    Field {
        /// Object read.
        object: Object,
        /// Pattern read; `Default` reads the pattern being edited.
        kind: MatchKind,
    },
    /// Named constant.
    Const(Arc<str>),
    /// `cond ? then : else`.
    If(Box<Self>, Box<Self>, Box<Self>),
    /// Comparison yielding a boolean.
    Compare {
        /// Operator.
        op: CompareOp,
        /// Ignore spaces in string comparisons.
        ignore_blanks: bool,
        /// Left operand.
        left: Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },
    /// Arithmetic or logic.
    Binary(BinaryOp, Box<Self>, Box<Self>),
    /// Logical negation.
    Not(Box<Self>),
    /// Rounding.
    Round(RoundOp, Box<Self>),
    /// Value list; only meaningful at the top of a test or edit.
    Comma(Box<Self>, Box<Self>),
}

impl Expr {
    /// Reads `object` from the pattern being edited.
    pub fn field(object: Object) -> Self {
        Self::Field {
            object,
            kind: MatchKind::Default,
        }
    }

    /// Reads `object` from the pattern selected by `kind`.
    pub fn field_of(object: Object, kind: MatchKind) -> Self {
        Self::Field { object, kind }
    }

    /// Refers to a named constant.
    pub fn constant(name: &str) -> Self {
        Self::Const(name.into())
    }

    /// Builds a matrix from four cells.
    pub fn matrix(xx: Self, xy: Self, yx: Self, yy: Self) -> Self {
        Self::Matrix(Box::new([xx, xy, yx, yy]))
    }

    /// Builds a comparison.
    pub fn compare(op: CompareOp, left: Self, right: Self) -> Self {
        Self::Compare {
            op,
            ignore_blanks: false,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Builds a binary operation.
    pub fn binary(op: BinaryOp, left: Self, right: Self) -> Self {
        Self::Binary(op, Box::new(left), Box::new(right))
    }

    /// Builds a conditional.
    pub fn if_else(cond: Self, then: Self, otherwise: Self) -> Self {
        Self::If(Box::new(cond), Box::new(then), Box::new(otherwise))
    }

    /// Builds a comma list from `items`.
    ///
    /// Returns `None` when `items` is empty.
    pub fn list(items: impl IntoIterator<Item = Self>) -> Option<Self> {
        let items: Vec<Self> = items.into_iter().collect();
        items
            .into_iter()
            .rev()
            .reduce(|tail, head| Self::Comma(Box::new(head), Box::new(tail)))
    }

    /// Returns the elements of a top level comma list.
    pub(crate) fn items(&self) -> Vec<&Self> {
        let mut items = Vec::new();
        let mut expr = self;
        while let Self::Comma(head, tail) = expr {
            items.push(&**head);
            expr = tail;
        }
        items.push(expr);
        items
    }

    /// Evaluates the expression. `None` means the value is absent.
    pub fn evaluate(&self, ctx: &EvalContext<'_>) -> Option<Value> {
        match self {
            Self::Value(v) => Some(v.clone()),
            Self::Matrix(cells) => {
                let mut m = [0.0; 4];
                for (dst, cell) in m.iter_mut().zip(cells.iter()) {
                    *dst = cell.evaluate(ctx)?.as_f64()?;
                }
                Some(Value::Matrix(Matrix::new(m[0], m[1], m[2], m[3])))
            }
            Self::Field { object, kind } => {
                let source = match (ctx.kind, *kind) {
                    (MatchKind::Font, MatchKind::Pattern) => ctx.test_pattern?,
                    (MatchKind::Pattern, MatchKind::Font) => {
                        log::warn!("font field \"{object}\" referenced in a pattern rule");
                        return None;
                    }
                    _ => ctx.pattern,
                };
                source
                    .values(*object)?
                    .first()
                    .map(|entry| entry.value.clone())
            }
            Self::Const(name) => match constant::lookup(name) {
                Some(constant) => Some(constant.to_value()),
                None => {
                    log::warn!("unknown constant \"{name}\"");
                    None
                }
            },
            Self::If(cond, then, otherwise) => match cond.evaluate(ctx)? {
                Value::Bool(b) if b.is_truthy() => then.evaluate(ctx),
                Value::Bool(_) => otherwise.evaluate(ctx),
                _ => None,
            },
            Self::Compare {
                op,
                ignore_blanks,
                left,
                right,
            } => {
                let l = left.evaluate(ctx);
                let r = right.evaluate(ctx);
                let result = compare_values(l.as_ref(), *op, *ignore_blanks, r.as_ref());
                Some(Value::Bool(result.into()))
            }
            Self::Binary(op, left, right) => {
                let l = left.evaluate(ctx);
                let r = right.evaluate(ctx);
                let l = promote(l, r.as_ref());
                let r = promote(r, l.as_ref());
                binary(*op, l?, r?)
            }
            Self::Not(expr) => match expr.evaluate(ctx)? {
                Value::Bool(b) => Some(Value::Bool((!b.is_truthy()).into())),
                _ => None,
            },
            Self::Round(op, expr) => match expr.evaluate(ctx)? {
                Value::Integer(i) => Some(Value::Integer(i)),
                Value::Double(d) => {
                    let d = match op {
                        RoundOp::Floor => d.floor(),
                        RoundOp::Ceil => d.ceil(),
                        RoundOp::Round => (d + 0.5).floor(),
                        RoundOp::Trunc => d.trunc(),
                    };
                    #[expect(
                        clippy::cast_possible_truncation,
                        reason = "rounded values saturate to the integer range"
                    )]
                    let i = d as i32;
                    Some(Value::Integer(i))
                }
                _ => None,
            },
            Self::Comma(..) => None,
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Self::Value(Value::String(value.into()))
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Self::Value(value.into())
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::Value(value.into())
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Value(value.into())
    }
}

/// Patterns visible to an expression.
#[derive(Copy, Clone, Debug)]
pub struct EvalContext<'a> {
    /// Kind of the rule being run.
    pub kind: MatchKind,
    /// Pattern being edited.
    pub pattern: &'a Pattern,
    /// Query pattern, when running font rules.
    pub test_pattern: Option<&'a Pattern>,
}

fn binary(op: BinaryOp, l: Value, r: Value) -> Option<Value> {
    match (l, r) {
        (Value::Double(a), Value::Double(b)) => {
            let d = match op {
                BinaryOp::Plus => a + b,
                BinaryOp::Minus => a - b,
                BinaryOp::Times => a * b,
                BinaryOp::Divide => a / b,
                BinaryOp::Or | BinaryOp::And => return None,
            };
            #[expect(
                clippy::cast_possible_truncation,
                reason = "only integral results are narrowed"
            )]
            let i = d as i32;
            Some(if f64::from(i) == d {
                Value::Integer(i)
            } else {
                Value::Double(d)
            })
        }
        (Value::Bool(a), Value::Bool(b)) => match op {
            BinaryOp::Or => Some(Value::Bool((a.is_truthy() || b.is_truthy()).into())),
            BinaryOp::And => Some(Value::Bool((a.is_truthy() && b.is_truthy()).into())),
            _ => None,
        },
        (Value::String(a), Value::String(b)) => match op {
            BinaryOp::Plus => {
                let mut s = String::with_capacity(a.len() + b.len());
                s.push_str(&a);
                s.push_str(&b);
                Some(Value::String(s.into()))
            }
            _ => None,
        },
        (Value::Matrix(a), Value::Matrix(b)) => match op {
            BinaryOp::Times => Some(Value::Matrix(a.multiply(&b))),
            _ => None,
        },
        (Value::CharSet(a), Value::CharSet(b)) => match op {
            BinaryOp::Plus => Some(a.union(&b).into()),
            BinaryOp::Minus => Some(a.subtract(&b).into()),
            _ => None,
        },
        (Value::LangSet(a), Value::LangSet(b)) => match op {
            BinaryOp::Plus => Some(a.union(&b).into()),
            BinaryOp::Minus => Some(a.subtract(&b).into()),
            _ => None,
        },
        _ => None,
    }
}

/// Coerces `value` towards the type of `reference`.
///
/// Integers always become doubles, and doubles become single point ranges
/// next to a range. An absent value becomes the neutral element of a
/// matrix, charset or langset reference, and a string becomes a langset
/// next to a langset.
pub fn promote(value: Option<Value>, reference: Option<&Value>) -> Option<Value> {
    match value {
        Some(Value::Integer(i)) => promote(Some(Value::Double(f64::from(i))), reference),
        Some(Value::Double(d)) if matches!(reference, Some(Value::Range(_))) => {
            Some(Value::Range(Range::point(d)))
        }
        Some(Value::String(s)) if matches!(reference, Some(Value::LangSet(_))) => {
            let mut ls = LangSet::new();
            ls.add(&s);
            Some(ls.into())
        }
        None => match reference? {
            Value::Matrix(_) => Some(Value::Matrix(Matrix::IDENTITY)),
            Value::LangSet(_) => Some(LangSet::new().into()),
            Value::CharSet(_) => Some(CharSet::new().into()),
            _ => None,
        },
        other => other,
    }
}

/// Compares two ranges.
pub fn compare_ranges(a: &Range, op: CompareOp, b: &Range) -> bool {
    match op {
        CompareOp::Equal => a.begin == b.begin && a.end == b.end,
        CompareOp::Contains | CompareOp::Listing => a.begin <= b.begin && a.end >= b.end,
        CompareOp::NotEqual => a.begin != b.begin || a.end != b.end,
        CompareOp::NotContains => a.begin > b.begin || a.end < b.end,
        CompareOp::Less => a.end < b.begin,
        CompareOp::LessEqual => a.end <= b.begin,
        CompareOp::More => a.begin > b.end,
        CompareOp::MoreEqual => a.begin >= b.end,
    }
}

fn compare_bools(l: Boolean, op: CompareOp, r: Boolean) -> bool {
    let dont_care = Boolean::DontCare;
    match op {
        CompareOp::Equal => l == r,
        CompareOp::Contains | CompareOp::Listing => l == r || l == dont_care,
        CompareOp::NotEqual => l != r,
        CompareOp::NotContains => !(l == r || l == dont_care),
        CompareOp::Less => l != r && r == dont_care,
        CompareOp::LessEqual => l == r || r == dont_care,
        CompareOp::More => l != r && l == dont_care,
        CompareOp::MoreEqual => l == r || l == dont_care,
    }
}

fn compare_strings(l: &str, op: CompareOp, ignore_blanks: bool, r: &str) -> bool {
    match op {
        CompareOp::Equal | CompareOp::Listing => eq_ignore_case(l, r, ignore_blanks),
        CompareOp::Contains => contains_ignore_case(l, r),
        CompareOp::NotEqual => !eq_ignore_case(l, r, ignore_blanks),
        CompareOp::NotContains => !contains_ignore_case(l, r),
        _ => false,
    }
}

/// Equality-only comparison for types without an ordering.
fn compare_eq(equal: bool, op: CompareOp) -> bool {
    match op {
        CompareOp::Equal | CompareOp::Contains | CompareOp::Listing => equal,
        CompareOp::NotEqual | CompareOp::NotContains => !equal,
        _ => false,
    }
}

/// Compares `left op right` after promoting both operands.
///
/// Operands that still differ in type only satisfy `NotEqual` and
/// `NotContains`.
pub fn compare_values(
    left: Option<&Value>,
    op: CompareOp,
    ignore_blanks: bool,
    right: Option<&Value>,
) -> bool {
    let l = promote(left.cloned(), right);
    let r = promote(right.cloned(), l.as_ref());
    match (&l, &r) {
        (None, None) => matches!(
            op,
            CompareOp::Equal | CompareOp::Contains | CompareOp::Listing
        ),
        (Some(Value::Double(a)), Some(Value::Double(b))) => match op {
            CompareOp::Equal | CompareOp::Contains | CompareOp::Listing => a == b,
            CompareOp::NotEqual | CompareOp::NotContains => a != b,
            CompareOp::Less => a < b,
            CompareOp::LessEqual => a <= b,
            CompareOp::More => a > b,
            CompareOp::MoreEqual => a >= b,
        },
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => compare_bools(*a, op, *b),
        (Some(Value::String(a)), Some(Value::String(b))) => {
            compare_strings(a, op, ignore_blanks, b)
        }
        (Some(Value::Matrix(a)), Some(Value::Matrix(b))) => compare_eq(a == b, op),
        (Some(Value::CharSet(a)), Some(Value::CharSet(b))) => match op {
            CompareOp::Contains | CompareOp::Listing => b.is_subset(a),
            CompareOp::NotContains => !b.is_subset(a),
            CompareOp::Equal => a == b,
            CompareOp::NotEqual => a != b,
            _ => false,
        },
        (Some(Value::LangSet(a)), Some(Value::LangSet(b))) => match op {
            CompareOp::Contains | CompareOp::Listing => a.contains(b),
            CompareOp::NotContains => !a.contains(b),
            CompareOp::Equal => a == b,
            CompareOp::NotEqual => a != b,
            _ => false,
        },
        (Some(Value::Range(a)), Some(Value::Range(b))) => compare_ranges(a, op, b),
        (Some(Value::Face(a)), Some(Value::Face(b))) => compare_eq(a == b, op),
        _ => matches!(op, CompareOp::NotEqual | CompareOp::NotContains),
    }
}
