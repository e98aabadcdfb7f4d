//! Email address value (`Email` UDT).
//!
//! # Invariants
//! - Local part: 1..=64 chars, no leading/trailing/double dot, no quote,
//!   ASCII alphanumerics plus ``!#$%&'*+/=?^_`{|}~.-``.
//! - Domain: 1..=255 chars, at least two dot-separated labels, each label
//!   1..=63 ASCII alphanumerics or hyphens, no leading/trailing hyphen.
//! - Both halves are stored lower-cased.

use crate::codec::{ByteReader, ByteWriter};
use crate::error::{DecodeError, ParseError};
use crate::model::cell::{Cell, UdtPayload};
use once_cell::sync::Lazy;
use regex::Regex;
use std::hash::{Hash, Hasher};

const MAX_LOCAL_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 255;
const MAX_LABEL_LEN: usize = 63;

static LOCAL_CHARSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.\-]+$").expect("valid local-part regex")
});
static LABEL_CHARSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9\-]+$").expect("valid domain label regex"));

/// Nullable email cell.
pub type EmailValue = Cell<EmailAddress>;

/// Validated `local@domain` address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress {
    local: String,
    domain: String,
}

impl EmailAddress {
    /// Validates both halves and stores them lower-cased.
    pub fn new(local: &str, domain: &str) -> Result<Self, ParseError> {
        validate_local(local)?;
        validate_domain(domain)?;
        Ok(Self {
            local: local.to_ascii_lowercase(),
            domain: domain.to_ascii_lowercase(),
        })
    }

    pub fn local(&self) -> &str {
        &self.local
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

fn validate_local(local: &str) -> Result<(), ParseError> {
    let fail = |reason| Err(ParseError::InvalidLocal { reason });
    if local.is_empty() {
        return fail("local part is empty");
    }
    if local.len() > MAX_LOCAL_LEN {
        return fail("local part is longer than 64 characters");
    }
    if local.starts_with('.') || local.ends_with('.') {
        return fail("local part must not start or end with a dot");
    }
    if local.contains("..") {
        return fail("local part must not contain consecutive dots");
    }
    if local.contains('"') {
        return fail("local part must not contain quotes");
    }
    if !LOCAL_CHARSET_RE.is_match(local) {
        return fail("local part contains a forbidden character");
    }
    Ok(())
}

fn validate_domain(domain: &str) -> Result<(), ParseError> {
    let fail = |reason| Err(ParseError::InvalidDomain { reason });
    if domain.is_empty() {
        return fail("domain is empty");
    }
    if domain.len() > MAX_DOMAIN_LEN {
        return fail("domain is longer than 255 characters");
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return fail("domain needs at least two labels");
    }
    for label in labels {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return fail("domain label must be 1 to 63 characters");
        }
        if label.starts_with('-') || label.ends_with('-') {
            return fail("domain label must not start or end with a hyphen");
        }
        if !LABEL_CHARSET_RE.is_match(label) {
            return fail("domain label contains a forbidden character");
        }
    }
    Ok(())
}

impl UdtPayload for EmailAddress {
    const TYPE_NAME: &'static str = "Email";

    fn parse_payload(text: &str) -> Result<Self, ParseError> {
        let Some((local, domain)) = text.split_once('@') else {
            return Err(ParseError::Format {
                type_name: Self::TYPE_NAME,
                expected: "exactly one '@' separating local part and domain",
            });
        };
        if domain.contains('@') {
            return Err(ParseError::Format {
                type_name: Self::TYPE_NAME,
                expected: "exactly one '@' separating local part and domain",
            });
        }
        Self::new(local, domain)
    }

    fn render_payload(&self) -> String {
        format!("{}@{}", self.local, self.domain)
    }

    fn write_payload(&self, writer: &mut ByteWriter) {
        writer.write_string(&self.local);
        writer.write_string(&self.domain);
    }

    fn read_payload(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let local = reader.read_string()?;
        let domain = reader.read_string()?;
        Self::new(&local, &domain).map_err(|err| DecodeError::InvalidPayload {
            type_name: Self::TYPE_NAME,
            reason: err.to_string(),
        })
    }

    fn payload_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn hash_payload<H: Hasher>(&self, state: &mut H) {
        self.hash(state);
    }
}
