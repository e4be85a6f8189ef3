//! Asset amounts in base units (stroops).
//!
//! Amounts are fixed-point integers: one display unit is 10^7 base units.
//! Conversion from user input uses integer arithmetic only, so a decimal string
//! with at most 7 fractional digits maps to an exact base-unit count.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AmountError;

/// Number of fractional decimal digits of a display unit.
pub const DECIMALS: usize = 7;

/// Base units per display unit (10^7).
pub const STROOPS_PER_UNIT: i128 = 10_000_000;

/// An amount expressed in base units.
///
/// Stored as `i128` to match the ledger's signed 128-bit integer type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(i128);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub fn from_stroops(stroops: i128) -> Self {
        Self(stroops)
    }

    pub fn stroops(&self) -> i128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse a decimal string in display units (e.g. `"10.5"`).
    ///
    /// Digits past the seventh fractional place must all be zero; anything
    /// else is rejected with [`AmountError::ExcessPrecision`] instead of being
    /// truncated. Signs and exponents are not accepted.
    pub fn from_decimal_str(input: &str) -> Result<Self, AmountError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(AmountError::Empty);
        }

        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(AmountError::Empty);
        }
        if let Some(c) = whole.chars().chain(frac.chars()).find(|c| !c.is_ascii_digit()) {
            return Err(AmountError::InvalidCharacter(c));
        }

        let significant = frac.trim_end_matches('0');
        let frac = if frac.len() > DECIMALS {
            if significant.len() > DECIMALS {
                return Err(AmountError::ExcessPrecision { digits: frac.len() });
            }
            &frac[..DECIMALS]
        } else {
            frac
        };

        let mut stroops: i128 = 0;
        for c in whole.chars().chain(frac.chars()).chain(
            std::iter::repeat('0').take(DECIMALS - frac.len()),
        ) {
            let digit = i128::from(c as u8 - b'0');
            stroops = stroops
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or(AmountError::Overflow)?;
        }
        Ok(Self(stroops))
    }

    /// Like [`Amount::from_decimal_str`] but also rejects zero.
    pub fn positive_from_decimal_str(input: &str) -> Result<Self, AmountError> {
        let amount = Self::from_decimal_str(input)?;
        if amount.0 <= 0 {
            return Err(AmountError::NotPositive);
        }
        Ok(amount)
    }

    /// Render in display units with trailing zeros removed (`100000000` -> `"10"`).
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let unit = STROOPS_PER_UNIT as u128;
        let whole = abs / unit;
        let frac = abs % unit;
        if frac == 0 {
            return format!("{sign}{whole}");
        }
        let frac = format!("{frac:07}");
        format!("{sign}{whole}.{}", frac.trim_end_matches('0'))
    }

    /// Split into the high and low 64-bit halves used by the ledger's `i128` encoding.
    pub fn hi_lo(&self) -> (i64, u64) {
        ((self.0 >> 64) as i64, self.0 as u64)
    }

    /// Reassemble from high and low halves.
    pub fn from_hi_lo(hi: i64, lo: u64) -> Self {
        Self((i128::from(hi) << 64) | i128::from(lo))
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal_str(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}
