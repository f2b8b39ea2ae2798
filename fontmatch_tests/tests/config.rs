// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use fontmatch::{
    Binding, Boolean, CompareOp, Config, Edit, EditOp, FontSet, MatchKind, Object, Qualifier, Rule,
    RuleSet, SetName, Test, Value,
};

use crate::util::{families, pattern, strings};

#[test]
fn config_reject_globs() {
    let mut config = Config::new();
    config.add_reject_glob("*.pcf");
    assert!(
        !config.add_font(SetName::System, pattern("Fixed:file=/fonts/fixed.pcf")),
        "bitmap font rejected"
    );
    assert!(
        config.add_font(SetName::System, pattern("DejaVu:file=/fonts/dejavu.ttf")),
        "outline font kept"
    );
    assert!(
        config.add_font(SetName::System, pattern("Memory")),
        "fonts without a file skip the glob filters"
    );
    assert_eq!(config.fonts(SetName::System).len(), 2);

    config.add_accept_glob("/fonts/terminus*");
    assert!(
        config.add_font(SetName::Application, pattern("Terminus:file=/fonts/terminus.pcf")),
        "accept beats reject"
    );
    assert_eq!(config.fonts(SetName::Application).len(), 1);
}

#[test]
fn config_reject_patterns() {
    let mut config = Config::new();
    config.add_reject_pattern(pattern(":scalable=false"));
    config.add_accept_pattern(pattern("Ter Minus"));
    for name in [
        "Fixed:scalable=false",
        "TerMinus:scalable=false",
        "DejaVu:scalable=true",
        "Unknown",
    ] {
        config.add_font(SetName::System, pattern(name));
    }
    let kept: Vec<&str> = config
        .fonts(SetName::System)
        .fonts()
        .iter()
        .flat_map(families)
        .collect();
    assert_eq!(kept, ["TerMinus", "DejaVu", "Unknown"]);
}

#[test]
fn config_scan_rules_run_before_filters() {
    let mut set = RuleSet::new("scan");
    set.add(
        [
            Rule::from(Test::new(Object::Family, Qualifier::Any, CompareOp::Equal, "Legacy")),
            Rule::from(Edit::new(Object::Scalable, EditOp::Assign, false)),
        ],
        MatchKind::Scan,
    )
    .unwrap();
    let mut config = Config::new();
    config.add_rule_set(set);
    config.add_reject_pattern(pattern(":scalable=false"));
    assert!(!config.add_font(SetName::System, pattern("Legacy")), "scanned then rejected");
    assert!(config.add_font(SetName::System, pattern("Modern")), "kept");
}

#[test]
fn config_set_fonts_replaces_set() {
    let mut config = Config::new();
    config.add_font(SetName::System, pattern("Old"));
    let fonts: FontSet = [pattern("New")].into_iter().collect();
    config.set_fonts(SetName::System, fonts);
    let names: Vec<&str> = config
        .fonts(SetName::System)
        .fonts()
        .iter()
        .flat_map(families)
        .collect();
    assert_eq!(names, ["New"]);
}

#[test]
fn config_default_substitute() {
    let config = Config::new();
    let mut pat = pattern("Sans");
    config.default_substitute(&mut pat);
    assert_eq!(pat.get_double(Object::Weight, 0), Ok(80.0));
    assert_eq!(pat.get_integer(Object::Slant, 0), Ok(0));
    assert_eq!(pat.get_double(Object::Width, 0), Ok(100.0));
    assert_eq!(pat.get_double(Object::Size, 0), Ok(12.0));
    assert_eq!(pat.get_double(Object::Scale, 0), Ok(1.0));
    assert_eq!(pat.get_double(Object::Dpi, 0), Ok(75.0));
    assert_eq!(pat.get_double(Object::PixelSize, 0), Ok(12.5));
    assert_eq!(pat.get_bool(Object::Hinting, 0), Ok(Boolean::True));
    assert_eq!(pat.get_bool(Object::EmbeddedBitmap, 0), Ok(Boolean::True));
    assert_eq!(pat.get_bool(Object::AutoHint, 0), Ok(Boolean::False));
    assert_eq!(pat.get_bool(Object::VerticalLayout, 0), Ok(Boolean::False));
    assert_eq!(pat.get_bool(Object::GlobalAdvance, 0), Ok(Boolean::True));
    assert_eq!(pat.get_bool(Object::Decorative, 0), Ok(Boolean::False));
    assert_eq!(pat.get_bool(Object::Symbol, 0), Ok(Boolean::False));
    assert_eq!(pat.get_bool(Object::Variable, 0), Ok(Boolean::DontCare));
    assert_eq!(pat.get_integer(Object::HintStyle, 0), Ok(3));
    assert_eq!(pat.get_integer(Object::FontVersion, 0), Ok(0x7fff_ffff));
    assert_eq!(pat.get_integer(Object::Order, 0), Ok(0));
    assert_eq!(strings(&pat, Object::NameLang), ["en"]);
    for object in [Object::FamilyLang, Object::StyleLang, Object::FullNameLang] {
        let langs = pat.values(object).unwrap();
        assert_eq!(langs[0].value, Value::from("en"));
        assert_eq!(langs[1].value, Value::from("en-us"));
        assert_eq!(langs[1].binding, Binding::Weak);
    }
    assert!(!pat.contains(Object::PrgName), "no program name configured");
}

#[test]
fn config_default_substitute_keeps_explicit_values() {
    let mut config = Config::new();
    config.set_default_languages("ja_JP.UTF-8");
    config.set_prgname(Some("viewer"));
    let mut pat = pattern("Sans:pixelsize=36:dpi=144:weight=200:familylang=de");
    config.default_substitute(&mut pat);
    assert_eq!(pat.get_double(Object::Weight, 0), Ok(200.0));
    assert_eq!(pat.get_double(Object::Size, 0), Ok(18.0));
    assert_eq!(pat.get_double(Object::PixelSize, 0), Ok(36.0));
    assert_eq!(strings(&pat, Object::NameLang), ["ja"]);
    assert_eq!(strings(&pat, Object::FamilyLang), ["de"]);
    assert_eq!(strings(&pat, Object::StyleLang), ["ja", "en-us"]);
    assert_eq!(strings(&pat, Object::PrgName), ["viewer"]);
}

#[test]
fn config_default_substitute_range_size() {
    let config = Config::new();
    let mut pat = pattern("Sans:size=[10 14]");
    config.default_substitute(&mut pat);
    assert_eq!(pat.get_double(Object::Size, 0), Ok(12.0));
}

#[test]
fn config_default_languages() {
    let mut config = Config::new();
    assert!(config.default_languages().is_empty(), "none until configured");
    config.set_default_languages("C:zh_TW.Big5");
    assert_eq!(config.default_languages(), ["en", "zh-tw"]);
    assert!(
        !Config::from_env().default_languages().is_empty(),
        "the environment always yields a language"
    );
}
