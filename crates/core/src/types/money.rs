//! Money arithmetic helpers.
//!
//! All prices and totals use [`rust_decimal::Decimal`] so cart and order
//! math is exact at two decimal places. The storefront charges a flat 5%
//! tax on the cart subtotal at checkout.

use rust_decimal::{Decimal, RoundingStrategy};

/// Flat sales tax rate applied at checkout (5%).
pub const TAX_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Round a monetary amount to two decimal places.
///
/// Midpoints round away from zero, matching how prices are displayed.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Line total for a cart item: unit price times quantity.
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    round_money(unit_price * Decimal::from(quantity))
}

/// Tax owed on an amount at the flat [`TAX_RATE`].
#[must_use]
pub fn tax_for(amount: Decimal) -> Decimal {
    round_money(amount * TAX_RATE)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_tax_rate_is_five_percent() {
        assert_eq!(TAX_RATE, dec!(0.05));
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(dec!(398.00), 3), dec!(1194.00));
        assert_eq!(line_total(dec!(0.99), 0), dec!(0.00));
    }

    #[test]
    fn test_tax_for() {
        assert_eq!(tax_for(dec!(100.00)), dec!(5.00));
        assert_eq!(tax_for(dec!(5937.00)), dec!(296.85));
    }

    #[test]
    fn test_round_money_midpoint_away_from_zero() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(1.004)), dec!(1.00));
    }

    #[test]
    fn test_total_is_subtotal_times_one_point_oh_five() {
        let subtotal = dec!(8900.00);
        assert_eq!(subtotal + tax_for(subtotal), subtotal * dec!(1.05));
    }
}
