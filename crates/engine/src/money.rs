use std::{fmt, str::FromStr};

use crate::EngineError;

/// Money amount represented as **integer cents**.
///
/// Expense sums are decimal values with at most two fractional digits; keeping
/// them as cents avoids floating-point drift in storage and comparisons.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing accepts `.` or `,` as decimal separator and rejects more than two
/// decimals:
///
/// ```rust
/// use engine::MoneyCents;
///
/// assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<MoneyCents>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<MoneyCents>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is strictly greater than zero.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Decimal text without trailing fractional zeros (`12.50` becomes
    /// `12.5`, `900.00` becomes `900`).
    #[must_use]
    pub fn to_compact_string(self) -> String {
        let full = self.to_string();
        full.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

impl FromStr for MoneyCents {
    type Err = EngineError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    /// Rejects empty input, non digits and more than 2 fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| EngineError::Validation(reason.to_string());

        let trimmed = s.trim();
        let (negative, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let rest = rest.trim();
        if rest.is_empty() {
            return Err(invalid("empty amount"));
        }

        let rest = rest.replace(',', ".");
        let (units_str, frac_str) = match rest.split_once('.') {
            Some((units, frac)) => (units, frac),
            None => (rest.as_str(), ""),
        };

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if units_str.is_empty() || !all_digits(units_str) || !all_digits(frac_str) {
            return Err(invalid("invalid amount"));
        }

        let units: i64 = units_str.parse().map_err(|_| invalid("amount too large"))?;
        let cents: i64 = match frac_str.len() {
            0 => 0,
            1 => frac_str.parse::<i64>().map_err(|_| invalid("invalid amount"))? * 10,
            2 => frac_str.parse::<i64>().map_err(|_| invalid("invalid amount"))?,
            _ => return Err(invalid("too many decimals")),
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(|| invalid("amount too large"))?;

        Ok(MoneyCents(if negative { -total } else { total }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(MoneyCents::new(0).to_string(), "0.00");
        assert_eq!(MoneyCents::new(7).to_string(), "0.07");
        assert_eq!(MoneyCents::new(1050).to_string(), "10.50");
        assert_eq!(MoneyCents::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn compact_form_drops_trailing_zeros() {
        assert_eq!(MoneyCents::new(4250).to_compact_string(), "42.5");
        assert_eq!(MoneyCents::new(1005).to_compact_string(), "10.05");
        assert_eq!(MoneyCents::new(90000).to_compact_string(), "900");
        assert_eq!(MoneyCents::new(10000).to_compact_string(), "100");
        assert_eq!(MoneyCents::new(-250).to_compact_string(), "-2.5");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("10,50".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("-0.01".parse::<MoneyCents>().unwrap().cents(), -1);
        assert_eq!("+1.00".parse::<MoneyCents>().unwrap().cents(), 100);
        assert_eq!("3.".parse::<MoneyCents>().unwrap().cents(), 300);
        assert_eq!(
            "12345678901234567.89".parse::<MoneyCents>().unwrap().cents(),
            1_234_567_890_123_456_789
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<MoneyCents>().is_err());
        assert!("-".parse::<MoneyCents>().is_err());
        assert!("1.2.3".parse::<MoneyCents>().is_err());
        assert!("abc".parse::<MoneyCents>().is_err());
        assert!("12.345".parse::<MoneyCents>().is_err());
        assert!("99999999999999999999".parse::<MoneyCents>().is_err());
    }
}
