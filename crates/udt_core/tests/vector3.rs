use udt_core::{DecodeError, DomainError, ParseError, Vec3, Vector3};

fn vector(text: &str) -> Vector3 {
    Vector3::parse(text).unwrap()
}

#[test]
fn cross_product_of_unit_axes() {
    let z = vector("[1,0,0]").cross_product(&vector("[0,1,0]")).unwrap();
    assert_eq!(z, vector("[0,0,1]"));
    assert_eq!(z.render(), "[0,0,1]");
}

#[test]
fn component_wise_arithmetic() {
    let a = vector("[1, 2, 3]");
    let b = vector("[4,5,6]");
    assert_eq!(a.add(&b).unwrap().render(), "[5,7,9]");
    assert_eq!(a.subtract(&b).unwrap().render(), "[-3,-3,-3]");
    assert_eq!(a.multiply_by_scalar(0.5).unwrap().render(), "[0.5,1,1.5]");
    assert_eq!(a.dot_product(&b), Some(32.0));
}

#[test]
fn null_operands_propagate() {
    let a = vector("[1,2,3]");
    let null = Vector3::null();
    assert!(a.add(&null).unwrap().is_null());
    assert!(null.subtract(&a).unwrap().is_null());
    assert!(null.multiply_by_scalar(f32::INFINITY).unwrap().is_null());
    assert!(a.cross_product(&null).unwrap().is_null());
    assert_eq!(a.dot_product(&null), None);
}

#[test]
fn parse_accepts_signed_and_exponent_components() {
    assert_eq!(
        vector("[1.5, -2, 3e2]").get(),
        Some(&Vec3::new(1.5, -2.0, 300.0).unwrap())
    );
    let parsed = vector("[0.1,-0.25,7]");
    assert_eq!(vector(&parsed.render()), parsed);
}

#[test]
fn malformed_input_reports_the_rule() {
    assert!(matches!(
        Vector3::parse("[1,2]"),
        Err(ParseError::ComponentCount { found: 2, .. })
    ));
    assert!(matches!(
        Vector3::parse("1,2,3"),
        Err(ParseError::Format { .. })
    ));
    assert!(matches!(
        Vector3::parse("[a,2,3]"),
        Err(ParseError::InvalidNumber { component: "x", .. })
    ));
    assert!(matches!(
        Vector3::parse("[1,2,inf]"),
        Err(ParseError::NonFinite { component: "z", .. })
    ));
}

#[test]
fn equality_is_exact() {
    let a = Vector3::new(Vec3::new(0.1, 0.0, 0.0).unwrap());
    let b = Vector3::parse("[0.1,0,0]").unwrap();
    let c = Vector3::new(Vec3::new(0.100_001, 0.0, 0.0).unwrap());
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn flagged_encoding_round_trips() {
    let value = vector("[1,-2,0.5]");
    let bytes = value.encode();
    assert_eq!(bytes.len(), 13);
    assert_eq!(bytes[0], 0);
    assert_eq!(&bytes[1..5], &1.0f32.to_le_bytes());
    assert_eq!(Vector3::decode(&bytes).unwrap(), value);
    assert_eq!(Vector3::decode_legacy(&bytes).unwrap(), value);
}

#[test]
fn legacy_layout_without_null_flag_is_readable() {
    let mut legacy = Vec::new();
    for component in [3.0f32, 4.0, 5.0] {
        legacy.extend_from_slice(&component.to_le_bytes());
    }
    assert_eq!(Vector3::decode_legacy(&legacy).unwrap(), vector("[3,4,5]"));
    assert!(Vector3::decode_legacy(&[]).unwrap().is_null());
    assert!(Vector3::decode_legacy(&[1]).unwrap().is_null());
    assert!(Vector3::decode_legacy(&[0, 1, 2]).is_err());
}

#[test]
fn overflowing_operations_are_rejected() {
    let huge = vector("[3e38,0,0]");
    let expected = DomainError::NonFinite {
        type_name: "Vector3D",
    };
    assert_eq!(huge.multiply_by_scalar(10.0).unwrap_err(), expected);
    assert_eq!(huge.add(&huge).unwrap_err(), expected);
    assert_eq!(huge.subtract(&vector("[-3e38,0,0]")).unwrap_err(), expected);
    assert_eq!(
        vector("[0,3e38,0]")
            .cross_product(&vector("[0,0,3e38]"))
            .unwrap_err(),
        expected
    );
    assert_eq!(huge.multiply_by_scalar(f32::NAN).unwrap_err(), expected);
    assert!(Vec3::new(0.0, f32::NEG_INFINITY, 0.0).is_err());
}

#[test]
fn every_successful_result_renders_parseable_text() {
    let huge = vector("[3e38,-3e38,1]");
    let scaled = huge.multiply_by_scalar(1.1).unwrap();
    assert_eq!(vector(&scaled.render()), scaled);
    assert_eq!(Vector3::decode(&scaled.encode()).unwrap(), scaled);
}

#[test]
fn decoding_non_finite_components_fails() {
    let mut bytes = vec![0u8];
    for component in [1.0f32, f32::NAN, 0.0] {
        bytes.extend_from_slice(&component.to_le_bytes());
    }
    assert!(matches!(
        Vector3::decode(&bytes),
        Err(DecodeError::InvalidPayload { .. })
    ));
    assert!(matches!(
        Vector3::decode_legacy(&bytes[1..]),
        Err(DecodeError::InvalidPayload { .. })
    ));
}
