use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::ops::Neg;

/// A plain decimal amount held at two fraction digits. No currency is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money(Decimal);

impl Money {
    /// Rounds to two fraction digits, midpoint away from zero. A result of zero
    /// is always positive zero so it never renders as `-0.00`.
    pub fn from_decimal(decimal: Decimal) -> Self {
        let rounded = decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            Money(Decimal::ZERO)
        } else {
            Money(rounded)
        }
    }

    /// Sign inversion between the bank's debit/credit convention and YNAB's.
    pub fn inverted(self) -> Self {
        -self
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Neg for Money {
    type Output = Self;
    fn neg(self) -> Self {
        Money::from_decimal(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_decimal(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn displays_two_fraction_digits() {
        assert_eq!(money("5").to_string(), "5.00");
        assert_eq!(money("-1234.5").to_string(), "-1234.50");
        assert_eq!(money("0.1").to_string(), "0.10");
    }

    // Exact decimal halves round up in magnitude: `1.005` is `1.01`, where a
    // binary float would have stored 1.00499... and printed `1.00`.
    #[test]
    fn rounds_midpoint_away_from_zero() {
        assert_eq!(money("1.005").to_string(), "1.01");
        assert_eq!(money("0.005").to_string(), "0.01");
        assert_eq!(money("-2.675").to_string(), "-2.68");
        assert_eq!(money("1.234").to_string(), "1.23");
    }

    #[test]
    fn inverted_flips_sign() {
        assert_eq!(money("12.34").inverted().to_string(), "-12.34");
        assert_eq!(money("-12.34").inverted().to_string(), "12.34");
    }

    // Float negation would print `-0.00` here; a signed zero is never written.
    #[test]
    fn zero_never_renders_negative() {
        assert_eq!(money("0").inverted().to_string(), "0.00");
        assert_eq!(money("0.001").inverted().to_string(), "0.00");
        assert_eq!(money("-0.001").to_string(), "0.00");
        assert_eq!(money("-0.00"), money("0"));
    }
}
