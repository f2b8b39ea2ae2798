// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between OpenType weights and the internal weight scale.
//!
//! The internal scale is the one used by the `weight` object and the weight
//! constants: regular is 80, bold is 200.

/// Selected OpenType weights (first) and their internal value (second).
///
/// Invariant: both columns are sorted.
const MAP: &[(f64, f64)] = &[
    (0.0, 0.0),
    (100.0, 0.0),
    (200.0, 40.0),
    (300.0, 50.0),
    (350.0, 55.0),
    (380.0, 75.0),
    (400.0, 80.0),
    (500.0, 100.0),
    (600.0, 180.0),
    (700.0, 200.0),
    (800.0, 205.0),
    (900.0, 210.0),
    (1000.0, 215.0),
];

fn lerp(x: f64, x1: f64, x2: f64, y1: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    if dx == 0.0 {
        return y1;
    }
    y1 + (x - x1) * dy / dx
}

/// Converts an OpenType weight (1 to 1000) to the internal scale.
///
/// Weights outside the table are clamped.
pub fn from_opentype(ot_weight: f64) -> f64 {
    let ot_weight = ot_weight.clamp(1.0, 1000.0);
    let mut i = 1;
    while ot_weight > MAP[i].0 {
        i += 1;
    }
    if ot_weight == MAP[i].0 {
        return MAP[i].1;
    }
    lerp(ot_weight, MAP[i - 1].0, MAP[i].0, MAP[i - 1].1, MAP[i].1)
}

/// Converts an internal weight to the OpenType scale.
///
/// Returns `None` for weights outside `0..=215`.
pub fn to_opentype(weight: f64) -> Option<f64> {
    if !(0.0..=MAP[MAP.len() - 1].1).contains(&weight) {
        return None;
    }
    let mut i = 1;
    while weight > MAP[i].1 {
        i += 1;
    }
    if weight == MAP[i].1 {
        return Some(MAP[i].0);
    }
    Some(lerp(weight, MAP[i - 1].1, MAP[i].1, MAP[i - 1].0, MAP[i].0))
}

#[cfg(test)]
mod tests {
    use super::{from_opentype, to_opentype};
    use crate::constant::weight;

    #[test]
    fn table_points_round_trip() {
        assert_eq!(from_opentype(400.0), f64::from(weight::REGULAR));
        assert_eq!(from_opentype(700.0), f64::from(weight::BOLD));
        assert_eq!(to_opentype(f64::from(weight::BOLD)), Some(700.0));
        assert_eq!(to_opentype(f64::from(weight::MEDIUM)), Some(500.0));
    }

    #[test]
    fn interpolates_between_points() {
        assert_eq!(from_opentype(450.0), 90.0);
        assert_eq!(to_opentype(90.0), Some(450.0));
        assert_eq!(to_opentype(0.0), Some(100.0));
        assert_eq!(to_opentype(300.0), None);
    }

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(from_opentype(5000.0), 215.0);
        assert_eq!(from_opentype(-4.0), 0.0);
    }
}
