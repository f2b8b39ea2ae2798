// Copyright 2024 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collections of candidate fonts.

use alloc::vec::Vec;

use crate::pattern::Pattern;

/// Which of the configuration's font sets a font belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum SetName {
    /// Fonts installed on the system.
    System,
    /// Fonts registered by the application.
    Application,
}

impl SetName {
    pub(crate) fn index(self) -> usize {
        match self {
            Self::System => 0,
            Self::Application => 1,
        }
    }
}

/// Ordered collection of font patterns.
#[derive(Clone, Default, Debug)]
pub struct FontSet {
    fonts: Vec<Pattern>,
}

impl FontSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a font.
    pub fn push(&mut self, font: Pattern) {
        self.fonts.push(font);
    }

    /// Returns the number of fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Returns true if the set holds no fonts.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Returns the fonts in order.
    pub fn fonts(&self) -> &[Pattern] {
        &self.fonts
    }

    /// Removes every font.
    pub fn clear(&mut self) {
        self.fonts.clear();
    }
}

impl FromIterator<Pattern> for FontSet {
    fn from_iter<T: IntoIterator<Item = Pattern>>(iter: T) -> Self {
        Self {
            fonts: iter.into_iter().collect(),
        }
    }
}

impl Extend<Pattern> for FontSet {
    fn extend<T: IntoIterator<Item = Pattern>>(&mut self, iter: T) {
        self.fonts.extend(iter);
    }
}
