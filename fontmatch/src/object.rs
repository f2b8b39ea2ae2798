// Copyright 2024 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of pattern objects.

use crate::value::ValueType;

macro_rules! objects {
    ($($(#[$meta:meta])* $variant:ident = $name:literal : $ty:ident,)*) => {
        /// Canonical property key of a pattern.
        ///
        /// The declaration order is the canonical order in which pattern
        /// elements are stored and printed.
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[repr(u8)]
        pub enum Object {
            $($(#[$meta])* $variant,)*
        }

        impl Object {
            /// Every object in canonical order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Returns the canonical name of the object.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// Returns the value type declared for the object.
            pub const fn value_type(self) -> ValueType {
                match self {
                    $(Self::$variant => ValueType::$ty,)*
                }
            }
        }
    };
}

objects! {
    /// Family name.
    Family = "family": String,
    /// Language of each family name.
    FamilyLang = "familylang": String,
    /// Style name.
    Style = "style": String,
    /// Language of each style name.
    StyleLang = "stylelang": String,
    /// Full font name.
    FullName = "fullname": String,
    /// Language of each full name.
    FullNameLang = "fullnamelang": String,
    /// Slant (roman, italic, oblique).
    Slant = "slant": Integer,
    /// Weight.
    Weight = "weight": Range,
    /// Width.
    Width = "width": Range,
    /// Point size.
    Size = "size": Range,
    /// Stretch glyphs horizontally before hinting.
    Aspect = "aspect": Double,
    /// Pixel size.
    PixelSize = "pixelsize": Double,
    /// Proportional, dual, mono or charcell.
    Spacing = "spacing": Integer,
    /// Font foundry.
    Foundry = "foundry": String,
    /// Whether glyphs can be antialiased.
    Antialias = "antialias": Bool,
    /// Automatic hinting style.
    HintStyle = "hintstyle": Integer,
    /// Whether the rasterizer should hint.
    Hinting = "hinting": Bool,
    /// Use vertical layout.
    VerticalLayout = "verticallayout": Bool,
    /// Use the autohinter instead of the normal hinter.
    AutoHint = "autohint": Bool,
    /// Use font global advance data.
    GlobalAdvance = "globaladvance": Bool,
    /// Font file path.
    File = "file": String,
    /// Face index within the file.
    Index = "index": Integer,
    /// Rasterizer in use.
    Rasterizer = "rasterizer": String,
    /// Whether glyphs are outlines.
    Outline = "outline": Bool,
    /// Whether glyphs are scalable.
    Scalable = "scalable": Bool,
    /// Target dots per inch.
    Dpi = "dpi": Double,
    /// Subpixel order.
    Rgba = "rgba": Integer,
    /// Scale factor for point to pixel conversions.
    Scale = "scale": Double,
    /// Eliminate leading from line spacing.
    MinSpace = "minspace": Bool,
    /// Character cell width.
    CharWidth = "charwidth": Integer,
    /// Character cell height.
    CharHeight = "charheight": Integer,
    /// Transformation matrix.
    Matrix = "matrix": Matrix,
    /// Unicode coverage.
    CharSet = "charset": CharSet,
    /// Supported languages.
    Lang = "lang": LangSet,
    /// Version number of the font.
    FontVersion = "fontversion": Integer,
    /// Layout capabilities.
    Capability = "capability": String,
    /// Container format of the font.
    FontFormat = "fontformat": String,
    /// Rasterizer should synthetically embolden.
    Embolden = "embolden": Bool,
    /// Use embedded bitmaps in preference to outlines.
    EmbeddedBitmap = "embeddedbitmap": Bool,
    /// Whether the style is a decorative variant.
    Decorative = "decorative": Bool,
    /// LCD filter type.
    LcdFilter = "lcdfilter": Integer,
    /// Language used to select names.
    NameLang = "namelang": String,
    /// OpenType features to enable.
    FontFeatures = "fontfeatures": String,
    /// Name of the running program.
    PrgName = "prgname": String,
    /// Hash of the font data.
    Hash = "hash": String,
    /// PostScript name.
    PostScriptName = "postscriptname": String,
    /// Whether the font has color glyphs.
    Color = "color": Bool,
    /// Whether the font uses a symbol encoding.
    Symbol = "symbol": Bool,
    /// Variation axis settings.
    FontVariations = "fontvariations": String,
    /// Whether the face is a variable font.
    Variable = "variable": Bool,
    /// Whether the font carries hinting instructions.
    FontHasHint = "fonthashint": Bool,
    /// Order number of the font in its set.
    Order = "order": Integer,
    /// Loaded face handle.
    FtFace = "ftface": Face,
}

/// Number of known objects.
pub const OBJECT_COUNT: usize = Object::ALL.len();

impl Object {
    /// Looks up an object by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|object| object.name() == name)
    }

    /// Returns the position of the object in canonical order.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns true if a value of type `ty` may be stored under this
    /// object.
    pub fn accepts(self, ty: ValueType) -> bool {
        match self.value_type() {
            ValueType::Integer | ValueType::Double => {
                matches!(ty, ValueType::Integer | ValueType::Double)
            }
            ValueType::LangSet => matches!(ty, ValueType::LangSet | ValueType::String),
            ValueType::Range => matches!(
                ty,
                ValueType::Range | ValueType::Double | ValueType::Integer
            ),
            declared => declared == ty,
        }
    }

    /// Returns the object holding the language of each value of this name
    /// object, if any.
    pub(crate) fn lang_object(self) -> Option<Self> {
        match self {
            Self::Family => Some(Self::FamilyLang),
            Self::Style => Some(Self::StyleLang),
            Self::FullName => Some(Self::FullNameLang),
            _ => None,
        }
    }

    pub(crate) fn is_name_lang(self) -> bool {
        matches!(
            self,
            Self::FamilyLang | Self::StyleLang | Self::FullNameLang
        )
    }
}

impl core::fmt::Display for Object {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::{Object, OBJECT_COUNT};
    use crate::value::ValueType;

    #[test]
    fn names_round_trip() {
        for (i, object) in Object::ALL.iter().enumerate() {
            assert_eq!(object.index(), i, "{object} out of order");
            assert_eq!(Object::from_name(object.name()), Some(*object));
        }
        assert_eq!(OBJECT_COUNT, 53);
        assert_eq!(Object::from_name("nonsense"), None);
    }

    #[test]
    fn loose_type_acceptance() {
        assert!(Object::PixelSize.accepts(ValueType::Integer));
        assert!(Object::Slant.accepts(ValueType::Double));
        assert!(Object::Weight.accepts(ValueType::Integer));
        assert!(Object::Lang.accepts(ValueType::String));
        assert!(!Object::Family.accepts(ValueType::Integer));
        assert!(!Object::Antialias.accepts(ValueType::Integer));
    }
}
