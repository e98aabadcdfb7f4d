use udt_core::{AnyValue, DecodeError, EmailValue, MoneyValue, UdtKind, Vector3};

const SAMPLES: [(UdtKind, &str); 6] = [
    (UdtKind::GeoLocation, "(52.2297, -21.0122)"),
    (UdtKind::UnitSi, "9.81 [m]"),
    (UdtKind::Vector3D, "[1.5,-2,0.25]"),
    (UdtKind::Email, "Jan.Kowalski@Example.PL"),
    (UdtKind::ColorRgb, "#0A141E80"),
    (UdtKind::MoneyType, "1234.5 [EUR]"),
];

#[test]
fn every_kind_round_trips_through_bytes() {
    for (kind, text) in SAMPLES {
        let value = AnyValue::parse(kind, text).unwrap();
        assert_eq!(value.kind(), kind);
        let decoded = AnyValue::decode(kind, &value.encode()).unwrap();
        assert_eq!(decoded, value, "{kind}");
    }
}

#[test]
fn every_kind_round_trips_through_text() {
    for (kind, text) in SAMPLES {
        let value = AnyValue::parse(kind, text).unwrap();
        let reparsed = AnyValue::parse(kind, &value.render()).unwrap();
        assert_eq!(reparsed, value, "{kind}");
        assert_eq!(reparsed.render(), value.render(), "{kind}");
    }
}

#[test]
fn null_is_a_single_flag_byte() {
    for kind in UdtKind::ALL {
        let null = AnyValue::null(kind);
        assert!(null.is_null());
        assert_eq!(null.render(), "NULL");
        assert_eq!(null.encode(), vec![1], "{kind}");
        assert!(AnyValue::decode(kind, &[1]).unwrap().is_null());
        assert!(AnyValue::parse(kind, " null ").unwrap().is_null());
    }
}

#[test]
fn email_layout_is_two_length_prefixed_strings() {
    let bytes = EmailValue::parse("ab@cd.pl").unwrap().encode();
    assert_eq!(bytes, b"\x00\x02ab\x05cd.pl".to_vec());
}

#[test]
fn money_layout_is_decimal_then_currency() {
    let bytes = MoneyValue::parse("-1.50 [USD]").unwrap().encode();
    assert_eq!(bytes.len(), 1 + 16 + 1 + 3);
    assert_eq!(bytes[0], 0);
    assert_eq!(&bytes[1..5], &150u32.to_le_bytes());
    assert_eq!(&bytes[13..17], &0x8002_0000u32.to_le_bytes());
    assert_eq!(&bytes[17..], b"\x03USD");
}

#[test]
fn decode_rejects_malformed_input() {
    assert_eq!(
        EmailValue::decode(&[]).unwrap_err(),
        DecodeError::Truncated {
            needed: 1,
            remaining: 0,
        }
    );
    assert_eq!(
        EmailValue::decode(&[2]).unwrap_err(),
        DecodeError::InvalidNullFlag(2)
    );
    assert_eq!(
        EmailValue::decode(&[1, 0]).unwrap_err(),
        DecodeError::TrailingBytes(1)
    );
    assert!(matches!(
        EmailValue::decode(b"\x00\x02a@\x05cd.pl"),
        Err(DecodeError::InvalidPayload { .. })
    ));
    assert!(matches!(
        Vector3::decode(&[0, 0, 0]),
        Err(DecodeError::Truncated { .. })
    ));
}

#[test]
fn kind_names_match_storage_type_names() {
    let names: Vec<&str> = UdtKind::ALL.iter().map(|kind| kind.name()).collect();
    assert_eq!(
        names,
        ["GeoLocation", "UnitSI", "Vector3D", "Email", "ColorRGB", "MoneyType"]
    );
    for kind in UdtKind::ALL {
        assert_eq!(kind.name().parse::<UdtKind>().unwrap(), kind);
    }
    assert!("Point".parse::<UdtKind>().is_err());
}

#[test]
fn json_uses_canonical_text_and_null() {
    let values = vec![
        AnyValue::parse(UdtKind::ColorRgb, "[1,2,3]").unwrap(),
        AnyValue::null(UdtKind::MoneyType),
    ];
    assert_eq!(
        serde_json::to_string(&values).unwrap(),
        r#"["[1,2,3]",null]"#
    );
    assert_eq!(serde_json::to_string(&UdtKind::UnitSi).unwrap(), r#""UnitSI""#);

    let money: MoneyValue = serde_json::from_str(r#""10 [pln]""#).unwrap();
    assert_eq!(money.render(), "10.00 [PLN]");
    let null: MoneyValue = serde_json::from_str("null").unwrap();
    assert!(null.is_null());
    assert!(serde_json::from_str::<MoneyValue>(r#""10 [XXX]""#).is_err());
}
