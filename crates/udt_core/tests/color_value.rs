use udt_core::{ColorValue, DomainError, ParseError, Rgba};

fn color(text: &str) -> ColorValue {
    ColorValue::parse(text).unwrap()
}

#[test]
fn hex_and_bracket_forms_parse_to_same_color() {
    assert_eq!(color("#0A141E"), color("[10, 20, 30]"));
    assert_eq!(color("#0a141e80"), color("[10,20,30,128]"));
    assert_eq!(color("#FF0000").get(), Some(&Rgba::new(255, 0, 0, 255)));
}

#[test]
fn rendering_omits_opaque_alpha() {
    assert_eq!(color("#FF8000").render(), "[255,128,0]");
    assert_eq!(color("#FF800040").render(), "[255,128,0,64]");
    assert_eq!(color("[1,2,3]").to_hex(), "#010203");
    assert_eq!(color("[1,2,3,4]").to_hex(), "#01020304");
    assert_eq!(color("[1,2,3,255]").render(), "[1,2,3]");
    assert_eq!(ColorValue::null().to_hex(), "NULL");
}

#[test]
fn both_renderings_parse_back() {
    for input in ["#11223344", "[0,0,0]", "#ABCDEF", "[9, 8, 7, 6]"] {
        let parsed = color(input);
        assert_eq!(color(&parsed.render()), parsed);
        assert_eq!(color(&parsed.to_hex()), parsed);
    }
}

#[test]
fn blend_red_and_blue_rounds_each_channel() {
    let purple = color("#FF0000").blend(&color("#0000FF"), 0.5).unwrap();
    assert_eq!(purple.render(), "[128,0,128]");
}

#[test]
fn blend_midpoint_channels_round_half_to_even() {
    let mixed = color("[1,0,0]").blend(&color("[4,1,0]"), 0.5).unwrap();
    assert_eq!(mixed.render(), "[2,0,0]");

    let mixed = color("[2,3,0]").blend(&color("[5,4,0]"), 0.5).unwrap();
    assert_eq!(mixed.render(), "[4,4,0]");
}

#[test]
fn blend_endpoints_return_the_operands() {
    let a = color("[10,20,30,40]");
    let b = color("[200,100,50]");
    assert_eq!(a.blend(&b, 0.0).unwrap(), a);
    assert_eq!(a.blend(&b, 1.0).unwrap(), b);
}

#[test]
fn blend_ratio_outside_unit_interval_is_a_domain_error() {
    let a = color("#000000");
    assert_eq!(
        a.blend(&a, 1.5).unwrap_err(),
        DomainError::RatioOutOfRange(1.5)
    );
    assert!(a.blend(&a, -0.1).is_err());
    assert!(a.blend(&a, f64::NAN).is_err());
}

#[test]
fn blend_validates_ratio_before_null_operands() {
    let a = color("#000000");
    assert_eq!(
        ColorValue::null().blend(&a, 2.0).unwrap_err(),
        DomainError::RatioOutOfRange(2.0)
    );
    assert!(a.blend(&ColorValue::null(), -1.0).is_err());
}

#[test]
fn blend_with_null_is_null() {
    let a = color("#123456");
    assert!(a.blend(&ColorValue::null(), 0.3).unwrap().is_null());
    assert!(ColorValue::null().blend(&a, 0.3).unwrap().is_null());
}

#[test]
fn negate_inverts_rgb_and_keeps_alpha() {
    assert_eq!(color("[10,20,30,40]").negate(), color("[245,235,225,40]"));
    assert_eq!(color("#FFFFFF").negate().render(), "[0,0,0]");
    assert!(ColorValue::null().negate().is_null());
}

#[test]
fn malformed_input_reports_the_rule() {
    assert!(matches!(
        ColorValue::parse("#FFF"),
        Err(ParseError::InvalidHex(_))
    ));
    assert!(matches!(
        ColorValue::parse("#GG0000"),
        Err(ParseError::InvalidHex(_))
    ));
    assert!(matches!(
        ColorValue::parse("red"),
        Err(ParseError::Format { .. })
    ));
    assert!(matches!(
        ColorValue::parse("[1,2]"),
        Err(ParseError::ComponentCount { found: 2, .. })
    ));
    assert!(matches!(
        ColorValue::parse("[256,0,0]"),
        Err(ParseError::InvalidNumber {
            component: "red",
            ..
        })
    ));
    assert!(matches!(
        ColorValue::parse("[1,2,3"),
        Err(ParseError::Format { .. })
    ));
}

#[test]
fn encoding_is_flag_then_four_bytes() {
    assert_eq!(color("[1,2,3,4]").encode(), vec![0, 1, 2, 3, 4]);
    assert_eq!(color("[1,2,3]").encode(), vec![0, 1, 2, 3, 255]);
    assert_eq!(ColorValue::decode(&[0, 9, 8, 7, 6]).unwrap(), color("[9,8,7,6]"));
    assert!(ColorValue::decode(&[1]).unwrap().is_null());
}
