// Copyright 2024 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule-based font substitution and multi-criteria font matching.
//!
//! A query is a [`Pattern`]: a map from [`Object`]s such as `family`,
//! `weight` or `lang` to prioritized lists of [`Value`]s. Resolving a query
//! against the fonts held by a [`Config`] takes three steps:
//!
//! 1. [`Config::substitute`] rewrites the query with the configured
//!    [`RuleSet`]s and [`Config::default_substitute`] fills in defaults.
//! 2. [`Config::font_match`] scores every candidate and picks the best one,
//!    or [`Config::font_sort`] orders all of them.
//! 3. [`Config::render_prepare`] merges the query into the chosen font.
//!
//! ```
//! use fontmatch::{Config, MatchKind, Object, Pattern, SetName};
//!
//! let mut config = Config::new();
//! for name in ["DejaVu Sans:weight=80", "DejaVu Sans:weight=200"] {
//!     config.add_font(SetName::System, name.parse().unwrap());
//! }
//!
//! let mut query: Pattern = "DejaVu Sans:bold".parse().unwrap();
//! config.substitute(&mut query, MatchKind::Pattern);
//! config.default_substitute(&mut query);
//! let font = config.font_match(&query).unwrap();
//! assert_eq!(font.get_double(Object::Weight, 0), Ok(200.0));
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): reads default languages from the
//!   environment with [`Config::from_env`].
//! - `libm`: float rounding for `no_std` builds.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("fontmatch requires either the `std` or `libm` feature to be enabled");

extern crate alloc;

mod charset;
mod config;
mod error;
mod expr;
mod family;
mod font_set;
mod glob;
mod lang;
mod matching;
mod name;
mod object;
mod pattern;
mod rule;
mod substitute;
mod value;

pub mod constant;
pub mod weight;

pub use charset::{CharSet, Leaf, Leaves};
pub use config::Config;
pub use error::{MatchError, ParseNameError, ParseNameErrorKind, PatternError, RuleError};
pub use expr::{
    compare_ranges, compare_values, promote, BinaryOp, CompareOp, EvalContext, Expr, RoundOp,
};
pub use font_set::{FontSet, SetName};
pub use lang::{compare_lang, normalize_lang, normalize_lang_list, LangResult, LangSet};
pub use matching::{font_set_match, SortedFonts};
pub use object::{Object, OBJECT_COUNT};
pub use pattern::{Pattern, ValueList};
pub use rule::{Edit, EditOp, MatchKind, Qualifier, Rule, RuleList, RuleSet, Test};
pub use value::{Binding, Boolean, FaceHandle, Matrix, Range, Value, ValueEntry, ValueType};
