// Copyright 2024 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Symbolic names for well-known property values.

use crate::object::Object;
use crate::value::{Boolean, Value, ValueType};

/// Weight values on the internal scale.
#[allow(missing_docs, reason = "the names are self-describing")]
pub mod weight {
    pub const THIN: i32 = 0;
    pub const EXTRALIGHT: i32 = 40;
    pub const LIGHT: i32 = 50;
    pub const DEMILIGHT: i32 = 55;
    pub const BOOK: i32 = 75;
    pub const REGULAR: i32 = 80;
    pub const MEDIUM: i32 = 100;
    pub const DEMIBOLD: i32 = 180;
    pub const BOLD: i32 = 200;
    pub const EXTRABOLD: i32 = 205;
    pub const BLACK: i32 = 210;
    pub const EXTRABLACK: i32 = 215;
}

/// Slant values.
#[allow(missing_docs, reason = "the names are self-describing")]
pub mod slant {
    pub const ROMAN: i32 = 0;
    pub const ITALIC: i32 = 100;
    pub const OBLIQUE: i32 = 110;
}

/// Width values, in percent of normal.
#[allow(missing_docs, reason = "the names are self-describing")]
pub mod width {
    pub const ULTRACONDENSED: i32 = 50;
    pub const EXTRACONDENSED: i32 = 63;
    pub const CONDENSED: i32 = 75;
    pub const SEMICONDENSED: i32 = 87;
    pub const NORMAL: i32 = 100;
    pub const SEMIEXPANDED: i32 = 113;
    pub const EXPANDED: i32 = 125;
    pub const EXTRAEXPANDED: i32 = 150;
    pub const ULTRAEXPANDED: i32 = 200;
}

/// Spacing values.
#[allow(missing_docs, reason = "the names are self-describing")]
pub mod spacing {
    pub const PROPORTIONAL: i32 = 0;
    pub const DUAL: i32 = 90;
    pub const MONO: i32 = 100;
    pub const CHARCELL: i32 = 110;
}

/// Hint style values.
#[allow(missing_docs, reason = "the names are self-describing")]
pub mod hint_style {
    pub const NONE: i32 = 0;
    pub const SLIGHT: i32 = 1;
    pub const MEDIUM: i32 = 2;
    pub const FULL: i32 = 3;
}

/// A named constant.
#[derive(Copy, Clone, Debug)]
pub struct Constant {
    /// Name, matched without regard to ASCII case.
    pub name: &'static str,
    /// Object the constant belongs to.
    pub object: Object,
    /// Numeric value.
    pub value: i32,
}

macro_rules! constants {
    ($($name:literal => $object:ident = $value:expr,)*) => {
        const CONSTANTS: &[Constant] = &[
            $(Constant { name: $name, object: Object::$object, value: $value },)*
        ];
    };
}

constants! {
    "thin" => Weight = weight::THIN,
    "extralight" => Weight = weight::EXTRALIGHT,
    "ultralight" => Weight = weight::EXTRALIGHT,
    "demilight" => Weight = weight::DEMILIGHT,
    "semilight" => Weight = weight::DEMILIGHT,
    "light" => Weight = weight::LIGHT,
    "book" => Weight = weight::BOOK,
    "regular" => Weight = weight::REGULAR,
    "normal" => Weight = weight::REGULAR,
    "medium" => Weight = weight::MEDIUM,
    "demibold" => Weight = weight::DEMIBOLD,
    "semibold" => Weight = weight::DEMIBOLD,
    "bold" => Weight = weight::BOLD,
    "extrabold" => Weight = weight::EXTRABOLD,
    "ultrabold" => Weight = weight::EXTRABOLD,
    "black" => Weight = weight::BLACK,
    "heavy" => Weight = weight::BLACK,
    "extrablack" => Weight = weight::EXTRABLACK,
    "ultrablack" => Weight = weight::EXTRABLACK,

    "roman" => Slant = slant::ROMAN,
    "italic" => Slant = slant::ITALIC,
    "oblique" => Slant = slant::OBLIQUE,

    "ultracondensed" => Width = width::ULTRACONDENSED,
    "extracondensed" => Width = width::EXTRACONDENSED,
    "condensed" => Width = width::CONDENSED,
    "semicondensed" => Width = width::SEMICONDENSED,
    "normal" => Width = width::NORMAL,
    "semiexpanded" => Width = width::SEMIEXPANDED,
    "expanded" => Width = width::EXPANDED,
    "extraexpanded" => Width = width::EXTRAEXPANDED,
    "ultraexpanded" => Width = width::ULTRAEXPANDED,

    "proportional" => Spacing = spacing::PROPORTIONAL,
    "dual" => Spacing = spacing::DUAL,
    "mono" => Spacing = spacing::MONO,
    "charcell" => Spacing = spacing::CHARCELL,

    "unknown" => Rgba = 0,
    "rgb" => Rgba = 1,
    "bgr" => Rgba = 2,
    "vrgb" => Rgba = 3,
    "vbgr" => Rgba = 4,
    "none" => Rgba = 5,

    "hintnone" => HintStyle = hint_style::NONE,
    "hintslight" => HintStyle = hint_style::SLIGHT,
    "hintmedium" => HintStyle = hint_style::MEDIUM,
    "hintfull" => HintStyle = hint_style::FULL,

    "antialias" => Antialias = 1,
    "hinting" => Hinting = 1,
    "verticallayout" => VerticalLayout = 1,
    "autohint" => AutoHint = 1,
    "globaladvance" => GlobalAdvance = 1,
    "outline" => Outline = 1,
    "scalable" => Scalable = 1,
    "minspace" => MinSpace = 1,
    "embolden" => Embolden = 1,
    "embeddedbitmap" => EmbeddedBitmap = 1,
    "decorative" => Decorative = 1,

    "lcdnone" => LcdFilter = 0,
    "lcddefault" => LcdFilter = 1,
    "lcdlight" => LcdFilter = 2,
    "lcdlegacy" => LcdFilter = 3,
}

/// Looks up a constant by name, ignoring ASCII case.
///
/// `normal` names both a weight and a width; the weight is returned.
pub fn lookup(name: &str) -> Option<&'static Constant> {
    CONSTANTS
        .iter()
        .find(|constant| constant.name.eq_ignore_ascii_case(name))
}

/// Looks up a constant that belongs to `object`.
pub fn lookup_for(object: Object, name: &str) -> Option<&'static Constant> {
    CONSTANTS
        .iter()
        .find(|constant| constant.object == object && constant.name.eq_ignore_ascii_case(name))
}

impl Constant {
    /// Returns the constant as a value: booleans for boolean objects,
    /// integers otherwise.
    pub fn to_value(&self) -> Value {
        if self.object.value_type() == ValueType::Bool {
            Value::Bool(if self.value == 0 {
                Boolean::False
            } else {
                Boolean::True
            })
        } else {
            Value::Integer(self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{lookup, lookup_for};
    use crate::object::Object;
    use crate::value::{Boolean, Value};

    #[test]
    fn lookup_ignores_case() {
        let bold = lookup("Bold").unwrap();
        assert_eq!(bold.object, Object::Weight);
        assert_eq!(bold.to_value(), Value::Integer(200));
        assert!(lookup("bolder").is_none(), "unknown name");
    }

    #[test]
    fn object_specific_lookup() {
        assert_eq!(lookup("normal").unwrap().object, Object::Weight);
        assert_eq!(lookup_for(Object::Width, "normal").unwrap().value, 100);
        assert_eq!(lookup("UltraBlack").unwrap().value, 215);
        assert_eq!(
            lookup("embolden").unwrap().to_value(),
            Value::Bool(Boolean::True)
        );
    }
}
