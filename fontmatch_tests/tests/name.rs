// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use fontmatch::{
    Boolean, CharSet, LangSet, Matrix, Object, ParseNameErrorKind, Pattern, Range, Value,
};

use crate::util::{families, pattern};

#[test]
fn name_parse_families_sizes_and_constants() {
    let pat = pattern("DejaVu Sans,Sans-12,14.5:weight=bold:italic");
    assert_eq!(families(&pat), ["DejaVu Sans", "Sans"]);
    assert_eq!(pat.get_double(Object::Size, 0), Ok(12.0));
    assert_eq!(pat.get_double(Object::Size, 1), Ok(14.5));
    assert_eq!(pat.get_integer(Object::Weight, 0), Ok(200));
    assert_eq!(pat.get_integer(Object::Slant, 0), Ok(100));

    let pat = pattern("Sans:extrablack");
    assert_eq!(pat.get_integer(Object::Weight, 0), Ok(215));
}

#[test]
fn name_parse_typed_values() {
    let pat = pattern(
        ":antialias=off:matrix=1 0.5 0 1:weight=[80 200]:lang=en|fr:charset=41-43 263a:hinting",
    );
    assert_eq!(pat.get_bool(Object::Antialias, 0), Ok(Boolean::False));
    assert_eq!(pat.get_bool(Object::Hinting, 0), Ok(Boolean::True));
    assert_eq!(
        pat.get_matrix(Object::Matrix, 0),
        Ok(Matrix::new(1.0, 0.5, 0.0, 1.0))
    );
    assert_eq!(
        pat.get_range(Object::Weight, 0),
        Ok(Range::new(80.0, 200.0))
    );
    let langs = pat.get_langset(Object::Lang, 0).unwrap();
    assert!(langs.contains_lang("fr"), "second tag parsed");
    let chars: Vec<u32> = pat.get_charset(Object::CharSet, 0).unwrap().chars().collect();
    assert_eq!(chars, [0x41, 0x42, 0x43, 0x263a]);
}

#[test]
fn name_parse_escapes() {
    let pat = pattern("Foo\\-Bar\\,Baz:style=Bold\\:Italic");
    assert_eq!(families(&pat), ["Foo-Bar,Baz"]);
    assert_eq!(pat.get_string(Object::Style, 0), Ok("Bold:Italic"));
}

#[test]
fn name_parse_errors() {
    let err = "Sans:nonsense=1".parse::<Pattern>().unwrap_err();
    assert_eq!(err.kind(), &ParseNameErrorKind::UnknownObject("nonsense".into()));
    assert_eq!(err.byte_offset(), 5);

    let err = "Sans:weight=heavyish".parse::<Pattern>().unwrap_err();
    assert_eq!(err.kind(), &ParseNameErrorKind::InvalidValue(Object::Weight));

    let err = "Sans:fancy".parse::<Pattern>().unwrap_err();
    assert_eq!(err.kind(), &ParseNameErrorKind::UnknownConstant("fancy".into()));

    let err = "Sans-big".parse::<Pattern>().unwrap_err();
    assert_eq!(err.kind(), &ParseNameErrorKind::InvalidValue(Object::Size));
}

#[test]
fn name_round_trip() {
    let mut pat = Pattern::new();
    pat.add(Object::Family, "Noto-Sans").unwrap();
    pat.add(Object::Family, "Serif").unwrap();
    pat.add(Object::Size, 10.5).unwrap();
    pat.add(Object::Style, "Bold:Italic").unwrap();
    pat.add(Object::Slant, 100).unwrap();
    pat.add(Object::Weight, Range::new(80.0, 200.0)).unwrap();
    pat.add(Object::Width, 87.5).unwrap();
    pat.add(Object::Embolden, Boolean::DontCare).unwrap();
    pat.add(Object::Matrix, Matrix::new(1.0, 0.25, 0.0, 1.0))
        .unwrap();
    pat.add(Object::CharSet, CharSet::from_chars((0x20..=0x7e).chain([0x4e00])))
        .unwrap();
    let langs: LangSet = ["en", "tlh"].into_iter().collect();
    pat.add(Object::Lang, langs).unwrap();
    pat.add(Object::File, "/usr/share/fonts/noto_sans.ttf")
        .unwrap();

    let text = pat.to_string();
    let parsed: Pattern = text
        .parse()
        .unwrap_or_else(|err| panic!("{text:?} does not parse: {err}"));
    assert_eq!(parsed, pat, "{text}");
}

#[test]
fn name_display_order() {
    let mut pat = Pattern::new();
    pat.add(Object::Weight, 200.0).unwrap();
    pat.add(Object::Slant, 0).unwrap();
    pat.add(Object::Size, 12.0).unwrap();
    pat.add(Object::Family, "Sans").unwrap();
    assert_eq!(pat.to_string(), "Sans-12:slant=0:weight=200");
    assert_eq!(Value::from("a:b").to_string(), "a:b");
}
