//! Numeral conversion between arbitrary radices.
//!
//! A base is either a numeric radix (2..=62, drawing symbols from
//! [`CANONICAL_ALPHABET`]) or an explicit alphabet string whose length is the
//! radix. Values pass through an arbitrary-precision integer, so numerals far
//! beyond 64 bits convert exactly.

use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use tracing::trace;

use crate::domain::error::{DomainError, DomainResult};

/// Digits, lowercase then uppercase Latin letters.
pub const CANONICAL_ALPHABET: &str =
    "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const DECIMAL_DIGITS: &str = "0123456789";

/// Requested base of a numeral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Base {
    /// First `n` symbols of the canonical alphabet.
    Radix(u32),
    /// The string itself is the digit alphabet.
    Alphabet(String),
}

impl Base {
    /// Decimal, the default source base.
    pub const DECIMAL: Base = Base::Radix(10);

    fn is_empty(&self) -> bool {
        match self {
            Base::Radix(n) => *n == 0,
            Base::Alphabet(s) => s.is_empty(),
        }
    }
}

impl Default for Base {
    fn default() -> Self {
        Self::DECIMAL
    }
}

impl From<u32> for Base {
    fn from(radix: u32) -> Self {
        Base::Radix(radix)
    }
}

impl From<&str> for Base {
    fn from(alphabet: &str) -> Self {
        Base::Alphabet(alphabet.to_string())
    }
}

impl From<String> for Base {
    fn from(alphabet: String) -> Self {
        Base::Alphabet(alphabet)
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Base::Radix(n) => write!(f, "base {}", n),
            Base::Alphabet(s) => write!(f, "alphabet `{}`", s),
        }
    }
}

/// Resolved, validated digit alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Resolve a base into its symbol sequence.
    pub fn resolve(base: &Base) -> DomainResult<Self> {
        let symbols: Vec<char> = match base {
            Base::Radix(n) if *n > 62 => return Err(DomainError::RadixTooLarge(*n)),
            Base::Radix(n) => CANONICAL_ALPHABET.chars().take(*n as usize).collect(),
            Base::Alphabet(s) => s.chars().collect(),
        };

        if symbols.len() < 2 {
            return Err(DomainError::RadixTooSmall(symbols.len()));
        }
        for (i, c) in symbols.iter().enumerate() {
            if symbols[..i].contains(c) {
                return Err(DomainError::DuplicateSymbol {
                    symbol: *c,
                    alphabet: symbols.iter().collect(),
                });
            }
        }

        Ok(Self { symbols })
    }

    pub fn radix(&self) -> u32 {
        self.symbols.len() as u32
    }

    /// Symbol used for zero, and for padding.
    pub fn zero(&self) -> char {
        self.symbols[0]
    }

    pub fn value_of(&self, symbol: char) -> Option<u32> {
        self.symbols
            .iter()
            .position(|&c| c == symbol)
            .map(|p| p as u32)
    }

    fn is_decimal(&self) -> bool {
        self.symbols.iter().copied().eq(DECIMAL_DIGITS.chars())
    }

    /// Decode a numeral written in this alphabet (Horner's method).
    pub fn decode(&self, number: &str) -> DomainResult<BigUint> {
        let radix = self.radix();
        let mut value = BigUint::zero();
        for (index, symbol) in number.chars().enumerate() {
            let digit = self
                .value_of(symbol)
                .ok_or_else(|| DomainError::UnknownSymbol {
                    symbol,
                    index,
                    alphabet: self.to_string(),
                })?;
            value *= radix;
            value += digit;
        }
        Ok(value)
    }

    /// Encode a value in this alphabet, most significant symbol first.
    pub fn encode(&self, value: &BigUint) -> String {
        if value.is_zero() {
            return self.zero().to_string();
        }

        let radix = self.radix();
        let mut rest = value.clone();
        let mut digits = Vec::new();
        while !rest.is_zero() {
            let rem = &rest % radix;
            let digit = rem.to_u32_digits().first().copied().unwrap_or(0);
            digits.push(self.symbols[digit as usize]);
            rest /= radix;
        }
        digits.iter().rev().collect()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.symbols {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Convert `number` from base `from` into base `to`.
///
/// An empty `from` (radix 0 or empty alphabet) means decimal. When `pad` is
/// set, the result is left-padded with the first symbol of the target alphabet
/// to exactly `pad` symbols; longer results are never truncated.
///
/// # Errors
///
/// * [`DomainError::EmptyBase`] when `to` is empty.
/// * [`DomainError::RadixTooLarge`] for a bare radix above 62.
/// * [`DomainError::UnknownSymbol`] when `number` uses a symbol outside `from`.
/// * [`DomainError::NotDecimal`] when a decimal `number` contains anything but `0-9`.
///
/// # Example
/// ```
/// use vvkit::domain::base::{convert, Base};
///
/// assert_eq!(convert("ff", Base::Radix(10), Base::Radix(16), None).unwrap(), "255");
/// assert_eq!(convert("5", 2u32, 10u32, Some(8)).unwrap(), "00000101");
/// assert_eq!(convert("7", "ab", Base::DECIMAL, None).unwrap(), "bbb");
/// ```
pub fn convert(
    number: &str,
    to: impl Into<Base>,
    from: impl Into<Base>,
    pad: Option<usize>,
) -> DomainResult<String> {
    let to = to.into();
    let from = from.into();
    if to.is_empty() {
        return Err(DomainError::EmptyBase);
    }
    let from = if from.is_empty() { Base::DECIMAL } else { from };
    trace!("convert: number={} from={} to={}", number, from, to);

    let source = Alphabet::resolve(&from)?;
    let target = Alphabet::resolve(&to)?;

    let mut result = if source.is_decimal() {
        if let Some(bad) = number.chars().find(|c| !c.is_ascii_digit()) {
            trace!("convert: rejected non-decimal symbol {:?}", bad);
            return Err(DomainError::NotDecimal(number.to_string()));
        }
        if target.is_decimal() && !number.is_empty() {
            number.to_string()
        } else {
            target.encode(&parse_decimal(number))
        }
    } else {
        let value = source.decode(number)?;
        if target.is_decimal() {
            value.to_str_radix(10)
        } else {
            target.encode(&value)
        }
    };

    if let Some(len) = pad {
        let missing = len.saturating_sub(result.chars().count());
        if missing > 0 {
            let mut padded: String = std::iter::repeat(target.zero()).take(missing).collect();
            padded.push_str(&result);
            result = padded;
        }
    }

    Ok(result)
}

// empty input reads as zero
fn parse_decimal(digits: &str) -> BigUint {
    BigUint::parse_bytes(digits.as_bytes(), 10).unwrap_or_default()
}
