use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use thiserror::Error;

/// A non-negative amount of money, kept in whole cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("not an amount of money")]
pub struct ParseMoneyError;

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Money {
        Money(cents)
    }

    pub const fn from_dollars(dollars: u64) -> Money {
        Money(dollars * 100)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    pub fn times(self, multiplier: u64) -> Money {
        Money(self.0.saturating_mul(multiplier))
    }

    /// Dollars without the sign, dropping the cents when there are none:
    /// `20` or `20.50`.
    pub fn compact(&self) -> String {
        if self.0 % 100 == 0 {
            format!("{}", self.0 / 100)
        } else {
            format!("{}.{:02}", self.0 / 100, self.0 % 100)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

/// An amount as typed, before rounding to cents. Comparisons use the
/// exact value, so `19.995` is still below `$20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TypedAmount {
    whole_cents: Money,
    has_fraction_of_a_cent: bool,
    rounds_up: bool,
}

impl TypedAmount {
    pub(crate) fn is_at_least(&self, bound: Money) -> bool {
        self.whole_cents >= bound
    }

    pub(crate) fn exceeds(&self, bound: Money) -> bool {
        self.whole_cents > bound || (self.whole_cents == bound && self.has_fraction_of_a_cent)
    }

    /// Half up to the nearest cent.
    pub(crate) fn rounded(&self) -> Result<Money, ParseMoneyError> {
        if self.rounds_up {
            self.whole_cents
                .0
                .checked_add(1)
                .map(Money)
                .ok_or(ParseMoneyError)
        } else {
            Ok(self.whole_cents)
        }
    }
}

/// Accepts plain decimal numbers such as `20`, `20.5` or `19.999`. Signs,
/// exponents and separators are rejected.
impl FromStr for TypedAmount {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(ParseMoneyError);
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ParseMoneyError);
        }

        let dollars: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| ParseMoneyError)?
        };
        let digits: Vec<u64> = fraction.bytes().map(|b| (b - b'0') as u64).collect();
        let digit = |i: usize| digits.get(i).copied().unwrap_or(0);
        let cents = digit(0) * 10 + digit(1);
        let whole_cents = dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or(ParseMoneyError)?;

        Ok(TypedAmount {
            whole_cents,
            has_fraction_of_a_cent: digits.iter().skip(2).any(|&d| d > 0),
            rounds_up: digit(2) >= 5,
        })
    }
}

/// Parses like [`TypedAmount`] and rounds half up to the nearest cent.
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<TypedAmount>()?.rounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_decimal_amounts() {
        assert_eq!("20".parse::<Money>(), Ok(Money::from_dollars(20)));
        assert_eq!("20.5".parse::<Money>(), Ok(Money::from_cents(2050)));
        assert_eq!("20.05".parse::<Money>(), Ok(Money::from_cents(2005)));
        assert_eq!(".75".parse::<Money>(), Ok(Money::from_cents(75)));
        assert_eq!("7.".parse::<Money>(), Ok(Money::from_dollars(7)));
    }

    #[test]
    fn rounds_to_the_nearest_cent() {
        assert_eq!("19.994".parse::<Money>(), Ok(Money::from_cents(1999)));
        assert_eq!("19.995".parse::<Money>(), Ok(Money::from_dollars(20)));
    }

    #[test]
    fn typed_amount_compares_before_rounding() {
        let twenty = Money::from_dollars(20);
        let amount: TypedAmount = "19.995".parse().unwrap();
        assert!(!amount.is_at_least(twenty));
        assert_eq!(amount.rounded(), Ok(twenty));

        let amount: TypedAmount = "20.004".parse().unwrap();
        assert!(amount.is_at_least(twenty));
        assert!(amount.exceeds(twenty));
        assert_eq!(amount.rounded(), Ok(twenty));

        let amount: TypedAmount = "20.000".parse().unwrap();
        assert!(!amount.exceeds(twenty));
    }

    #[test]
    fn rejects_anything_else() {
        for text in ["", ".", "-20", "+20", "2e3", "20,00", "twenty", "1.2.3", " 20"] {
            assert_eq!(text.parse::<Money>(), Err(ParseMoneyError), "{:?}", text);
        }
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn displays_with_cents() {
        assert_eq!(Money::from_dollars(100).to_string(), "$100.00");
        assert_eq!(Money::from_cents(2050).to_string(), "$20.50");
        assert_eq!(Money::from_dollars(20).compact(), "20");
        assert_eq!(Money::from_cents(2050).compact(), "20.50");
    }

    #[test]
    fn never_goes_negative() {
        let ten = Money::from_dollars(10);
        assert_eq!(ten.checked_sub(Money::from_dollars(20)), None);
        assert_eq!(ten.checked_sub(ten), Some(Money::ZERO));
        assert_eq!(ten.times(2), Money::from_dollars(20));
    }
}
