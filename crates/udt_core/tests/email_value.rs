use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use udt_core::{EmailValue, ParseError};

fn hash_of(value: &EmailValue) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn parse_lowercases_both_halves() {
    let email = EmailValue::parse("  John.Doe@Example.COM ").unwrap();
    let address = email.get().unwrap();
    assert_eq!(address.local(), "john.doe");
    assert_eq!(address.domain(), "example.com");
    assert_eq!(email.render(), "john.doe@example.com");
}

#[test]
fn special_characters_are_allowed_in_local_part() {
    let email = EmailValue::parse("a!#$%&'*+/=?^_`{|}~-b@sub.example.org").unwrap();
    assert_eq!(email.render(), "a!#$%&'*+/=?^_`{|}~-b@sub.example.org");
}

#[test]
fn at_sign_position_maps_to_the_failing_half() {
    assert!(matches!(
        EmailValue::parse("@example.com"),
        Err(ParseError::InvalidLocal { .. })
    ));
    assert!(matches!(
        EmailValue::parse("john@"),
        Err(ParseError::InvalidDomain { .. })
    ));
    assert!(matches!(
        EmailValue::parse("john.example.com"),
        Err(ParseError::Format { .. })
    ));
    assert!(matches!(
        EmailValue::parse("a@b@example.com"),
        Err(ParseError::Format { .. })
    ));
}

#[test]
fn local_part_rules_are_enforced() {
    let rejected = [
        ".john@example.com",
        "john.@example.com",
        "jo..hn@example.com",
        "jo\"hn@example.com",
        "jo hn@example.com",
        "jóhn@example.com",
    ];
    for input in rejected {
        assert!(
            matches!(EmailValue::parse(input), Err(ParseError::InvalidLocal { .. })),
            "expected local-part failure for {input}"
        );
    }

    let too_long = format!("{}@example.com", "a".repeat(65));
    assert_eq!(
        EmailValue::parse(&too_long).unwrap_err(),
        ParseError::InvalidLocal {
            reason: "local part is longer than 64 characters"
        }
    );
    let longest = format!("{}@example.com", "a".repeat(64));
    assert!(EmailValue::parse(&longest).is_ok());
}

#[test]
fn domain_rules_are_enforced() {
    let rejected = [
        "john@localhost",
        "john@-example.com",
        "john@example-.com",
        "john@example..com",
        "john@exa_mple.com",
        "john@.example.com",
    ];
    for input in rejected {
        assert!(
            matches!(EmailValue::parse(input), Err(ParseError::InvalidDomain { .. })),
            "expected domain failure for {input}"
        );
    }

    let long_label = format!("john@{}.com", "a".repeat(64));
    assert!(matches!(
        EmailValue::parse(&long_label),
        Err(ParseError::InvalidDomain { .. })
    ));
    assert!(EmailValue::parse("john@my-host.example.co").is_ok());
}

#[test]
fn equality_and_hash_ignore_case() {
    let upper = EmailValue::parse("ANNA@EXAMPLE.COM").unwrap();
    let lower = EmailValue::parse("anna@example.com").unwrap();
    assert_eq!(upper, lower);
    assert_eq!(hash_of(&upper), hash_of(&lower));
    assert_ne!(upper, EmailValue::parse("anne@example.com").unwrap());
}

#[test]
fn null_cell_behaviour() {
    let null = EmailValue::parse("NULL").unwrap();
    assert!(null.is_null());
    assert_eq!(null.render(), "NULL");
    assert_eq!(null, EmailValue::null());
    assert_ne!(null, EmailValue::parse("a@b.cd").unwrap());
}

#[test]
fn encoding_writes_flag_then_length_prefixed_strings() {
    let email = EmailValue::parse("ab@c.de").unwrap();
    assert_eq!(
        email.encode(),
        vec![0, 2, b'a', b'b', 4, b'c', b'.', b'd', b'e']
    );
    assert_eq!(EmailValue::null().encode(), vec![1]);
    assert_eq!(EmailValue::decode(&email.encode()).unwrap(), email);
}

#[test]
fn decode_rejects_stored_address_that_breaks_rules() {
    let bytes = vec![0, 1, b'a', 9, b'l', b'o', b'c', b'a', b'l', b'h', b'o', b's', b't'];
    let err = EmailValue::decode(&bytes).unwrap_err();
    assert!(err.to_string().contains("Email"), "unexpected error: {err}");
}
