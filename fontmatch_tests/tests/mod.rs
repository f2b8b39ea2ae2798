// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `fontmatch`.
//!
//! - The `util` module contains shared helpers for building patterns, font
//!   sets and rule sets.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so that the helpers are shared.
//! - Put new tests into the module of their topic (substitution, matching, ...). Tests for
//!   bugs and preserved legacy behavior go into `issues.rs`.
//! - Start test names with the topic, e.g. `matching_weight_nearest` rather than
//!   `nearest_weight_matching`.

#![allow(missing_docs, reason = "we don't need docs for testing")]

mod charset;
mod config;
mod issues;
mod lang;
mod name;
mod util;
