//! Monetary amount value (`MoneyType` UDT).
//!
//! # Invariants
//! - Currency is one of the supported ISO codes, stored upper-cased.
//! - Arithmetic between two amounts requires the same currency.
//! - Conversion pivots through PLN using a fixed rate table and rounds to
//!   two decimal places (banker's rounding).

use crate::codec::{ByteReader, ByteWriter};
use crate::error::{DecodeError, DomainError, ParseError};
use crate::model::cell::{Cell, UdtPayload};
use rust_decimal::Decimal;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

const SUPPORTED_CURRENCIES: &[&str] = &["PLN", "EUR", "USD", "GBP", "CHF", "JPY", "CNY"];
const CONVERSION_DECIMALS: u32 = 2;
const RENDER_MIN_SCALE: u32 = 2;

/// Returns the fixed set of accepted ISO currency codes.
pub fn supported_currencies() -> &'static [&'static str] {
    SUPPORTED_CURRENCIES
}

/// Value of one unit of `code` in PLN.
pub fn rate_to_pln(code: &str) -> Option<Decimal> {
    let rate = match code.to_ascii_uppercase().as_str() {
        "PLN" => Decimal::ONE,
        "EUR" => Decimal::new(45, 1),
        "USD" => Decimal::new(40, 1),
        "GBP" => Decimal::new(50, 1),
        "CHF" => Decimal::new(47, 1),
        "JPY" => Decimal::new(3, 2),
        "CNY" => Decimal::new(6, 1),
        _ => return None,
    };
    Some(rate)
}

fn normalize_currency(code: &str) -> Option<String> {
    let upper = code.trim().to_ascii_uppercase();
    SUPPORTED_CURRENCIES
        .contains(&upper.as_str())
        .then_some(upper)
}

/// Nullable money cell.
pub type MoneyValue = Cell<Money>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Money {
    amount: Decimal,
    currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Result<Self, ParseError> {
        let currency = normalize_currency(currency)
            .ok_or_else(|| ParseError::UnknownCurrency(currency.to_string()))?;
        Ok(Self { amount, currency })
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    fn same_currency(&self, other: &Self) -> Result<(), DomainError> {
        if self.currency.eq_ignore_ascii_case(&other.currency) {
            Ok(())
        } else {
            Err(DomainError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            })
        }
    }

    fn with_amount(&self, amount: Option<Decimal>) -> Result<Self, DomainError> {
        let amount = amount.ok_or(DomainError::Overflow {
            type_name: Self::TYPE_NAME,
        })?;
        Ok(Self {
            amount,
            currency: self.currency.clone(),
        })
    }

    pub fn add(&self, other: &Self) -> Result<Self, DomainError> {
        self.same_currency(other)?;
        self.with_amount(self.amount.checked_add(other.amount))
    }

    pub fn subtract(&self, other: &Self) -> Result<Self, DomainError> {
        self.same_currency(other)?;
        self.with_amount(self.amount.checked_sub(other.amount))
    }

    pub fn multiply_by_scalar(&self, scalar: Decimal) -> Result<Self, DomainError> {
        self.with_amount(self.amount.checked_mul(scalar))
    }

    pub fn convert_to(&self, target: &str) -> Result<Self, DomainError> {
        let target_code = normalize_currency(target)
            .ok_or_else(|| DomainError::UnsupportedCurrency(target.to_string()))?;
        let source_rate = rate_to_pln(&self.currency)
            .ok_or_else(|| DomainError::UnsupportedCurrency(self.currency.clone()))?;
        let target_rate = rate_to_pln(&target_code)
            .ok_or_else(|| DomainError::UnsupportedCurrency(target_code.clone()))?;

        let converted = self
            .amount
            .checked_mul(source_rate)
            .and_then(|pln| pln.checked_div(target_rate))
            .ok_or(DomainError::Overflow {
                type_name: Self::TYPE_NAME,
            })?;
        Ok(Self {
            amount: converted.round_dp(CONVERSION_DECIMALS),
            currency: target_code,
        })
    }

    /// At least two decimals, more when the amount carries them.
    fn render_amount(&self) -> String {
        let mut amount = self.amount.normalize();
        if amount.scale() < RENDER_MIN_SCALE {
            amount.rescale(RENDER_MIN_SCALE);
        }
        amount.to_string()
    }
}

impl UdtPayload for Money {
    const TYPE_NAME: &'static str = "MoneyType";

    fn parse_payload(text: &str) -> Result<Self, ParseError> {
        let format_error = ParseError::Format {
            type_name: Self::TYPE_NAME,
            expected: "'amount [CURRENCY]'",
        };
        let (Some(open), Some(close)) = (text.find('['), text.find(']')) else {
            return Err(format_error);
        };
        if close <= open || !text[close + 1..].trim().is_empty() {
            return Err(format_error);
        }

        let number = text[..open].trim();
        let code = text[open + 1..close].trim();
        let amount = Decimal::from_str(number)
            .or_else(|_| Decimal::from_scientific(number))
            .map_err(|_| ParseError::InvalidNumber {
                type_name: Self::TYPE_NAME,
                component: "amount",
                input: number.to_string(),
            })?;
        Self::new(amount, code)
    }

    fn render_payload(&self) -> String {
        format!("{} [{}]", self.render_amount(), self.currency)
    }

    fn write_payload(&self, writer: &mut ByteWriter) {
        writer.write_decimal(self.amount);
        writer.write_string(&self.currency);
    }

    fn read_payload(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let amount = reader.read_decimal()?;
        let currency = reader.read_string()?;
        Self::new(amount, &currency).map_err(|err| DecodeError::InvalidPayload {
            type_name: Self::TYPE_NAME,
            reason: err.to_string(),
        })
    }

    fn payload_eq(&self, other: &Self) -> bool {
        self.amount == other.amount && self.currency.eq_ignore_ascii_case(&other.currency)
    }

    fn hash_payload<H: Hasher>(&self, state: &mut H) {
        self.amount.hash(state);
        self.currency.to_ascii_uppercase().hash(state);
    }
}

impl Cell<Money> {
    pub fn add(&self, other: &Self) -> Result<Self, DomainError> {
        self.try_zip(other, Money::add)
    }

    pub fn subtract(&self, other: &Self) -> Result<Self, DomainError> {
        self.try_zip(other, Money::subtract)
    }

    pub fn multiply_by_scalar(&self, scalar: Decimal) -> Result<Self, DomainError> {
        self.try_map(|money| money.multiply_by_scalar(scalar))
    }

    pub fn convert_to(&self, target: &str) -> Result<Self, DomainError> {
        self.try_map(|money| money.convert_to(target))
    }
}
