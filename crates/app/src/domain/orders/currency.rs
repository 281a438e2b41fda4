//! Display currency conversion
//!
//! Prices and totals are stored in the base currency. A display currency is
//! the base amount multiplied by a rate; anything a shopper enters in the
//! display currency must be divided back before it reaches an order.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept on stored amounts.
pub const MONEY_SCALE: u32 = 2;

/// Largest amount a money column holds (`NUMERIC(12, 2)`).
pub const MAX_MONEY: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, MONEY_SCALE);

/// Round an amount to the stored money scale.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Multiplicative rate from base currency to a display currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    /// The identity rate.
    pub const BASE: Self = Self(Decimal::ONE);

    /// Build a rate; `None` unless it is strictly positive.
    #[must_use]
    pub fn new(rate: Decimal) -> Option<Self> {
        (rate > Decimal::ZERO).then_some(Self(rate))
    }

    #[must_use]
    pub fn rate(self) -> Decimal {
        self.0
    }

    /// Convert a base amount for display; `None` on overflow.
    #[must_use]
    pub fn to_display(self, base: Decimal) -> Option<Decimal> {
        base.checked_mul(self.0).map(round_money)
    }

    /// Convert a display amount back to base currency; `None` on overflow.
    #[must_use]
    pub fn to_base(self, display: Decimal) -> Option<Decimal> {
        display.checked_div(self.0).map(round_money)
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self::BASE
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn zero_and_negative_rates_are_rejected() {
        assert_eq!(ExchangeRate::new(dec!(0)), None);
        assert_eq!(ExchangeRate::new(dec!(-1.5)), None);
    }

    #[test]
    fn display_fee_converts_back_to_base() {
        let rate = ExchangeRate::new(dec!(1.25)).expect("positive rate");

        assert_eq!(rate.to_display(dec!(8.00)), Some(dec!(10.00)));
        assert_eq!(rate.to_base(dec!(10.00)), Some(dec!(8.00)));
    }

    #[test]
    fn base_rate_is_identity() {
        assert_eq!(ExchangeRate::BASE.to_base(dec!(3.33)), Some(dec!(3.33)));
    }

    #[test]
    fn conversion_overflow_is_none() {
        let half = ExchangeRate::new(dec!(0.5)).expect("positive rate");
        let double = ExchangeRate::new(dec!(2)).expect("positive rate");

        assert_eq!(half.to_base(Decimal::MAX), None);
        assert_eq!(double.to_display(Decimal::MAX), None);
    }

    #[test]
    fn max_money_matches_the_column_range() {
        assert_eq!(MAX_MONEY, dec!(9999999999.99));
    }

    #[test]
    fn round_money_rounds_half_away_from_zero() {
        assert_eq!(round_money(dec!(2.345)), dec!(2.35));
        assert_eq!(round_money(dec!(2.344)), dec!(2.34));
    }
}
