// Copyright 2024 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filename globs for accepting and rejecting fonts.

/// Matches `s` against `glob`, where `*` matches any run of characters
/// and `?` matches one character.
pub(crate) fn glob_match(glob: &str, s: &str) -> bool {
    let glob: alloc::vec::Vec<char> = glob.chars().collect();
    let s: alloc::vec::Vec<char> = s.chars().collect();
    let (mut g, mut i) = (0, 0);
    // Position after the last star, and the input position it resumed at.
    let mut backtrack: Option<(usize, usize)> = None;
    while i < s.len() {
        match glob.get(g) {
            Some('*') => {
                g += 1;
                backtrack = Some((g, i));
            }
            Some('?') => {
                g += 1;
                i += 1;
            }
            Some(c) if *c == s[i] => {
                g += 1;
                i += 1;
            }
            _ => match backtrack {
                Some((star_g, star_i)) => {
                    g = star_g;
                    i = star_i + 1;
                    backtrack = Some((star_g, star_i + 1));
                }
                None => return false,
            },
        }
    }
    glob[g..].iter().all(|c| *c == '*')
}
