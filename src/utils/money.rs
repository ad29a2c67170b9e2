//! Money calculation utilities using rust_decimal for precision
//!
//! Stored record prices remain `f64` (backup format compatibility with the
//! original data files); every computation converts through `Decimal` and
//! rounds only at display time.

use rust_decimal::prelude::*;

use crate::models::InvoiceItem;

/// Rounding for displayed monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert an f64 price into a Decimal for arithmetic
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert a Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Computed invoice totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

/// Totals over an invoice's item snapshots and tax rate (fraction).
///
/// subtotal = Σ price×qty; tax = subtotal×rate; total = subtotal + tax.
/// Decimal arithmetic keeps `total == subtotal × (1 + rate)` an identity.
pub fn invoice_totals(items: &[InvoiceItem], tax_rate: f64) -> InvoiceTotals {
    let subtotal: Decimal = items
        .iter()
        .map(|it| to_decimal(it.price) * Decimal::from(it.qty))
        .sum();
    let tax_amount = subtotal * to_decimal(tax_rate);
    InvoiceTotals {
        subtotal,
        tax_amount,
        total: subtotal + tax_amount,
    }
}

/// Format a Decimal amount with the configured currency code, e.g. "18.00 EUR"
pub fn format_money(amount: Decimal, currency: &str) -> String {
    let rounded =
        amount.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2} {currency}")
}

/// Format an f64 record price for display
pub fn format_price(amount: f64, currency: &str) -> String {
    format_money(to_decimal(amount), currency)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: f64, qty: u32) -> InvoiceItem {
        InvoiceItem {
            service_id: "srv_x".into(),
            name: "Corte".into(),
            qty,
            price,
        }
    }

    #[test]
    fn totals_match_distributive_identity() {
        let items = vec![item(18.0, 1), item(15.0, 2), item(0.1, 3)];
        let rate = 0.21;
        let t = invoice_totals(&items, rate);

        let subtotal = to_decimal(18.0) + to_decimal(15.0) * Decimal::from(2u32)
            + to_decimal(0.1) * Decimal::from(3u32);
        assert_eq!(t.subtotal, subtotal);
        assert_eq!(t.total, t.subtotal + t.tax_amount);
        // total = subtotal × (1 + rate), exactly
        assert_eq!(t.total, subtotal * (Decimal::ONE + to_decimal(rate)));
    }

    #[test]
    fn empty_invoice_is_zero() {
        let t = invoice_totals(&[], 0.21);
        assert_eq!(t.subtotal, Decimal::ZERO);
        assert_eq!(t.tax_amount, Decimal::ZERO);
        assert_eq!(t.total, Decimal::ZERO);
    }

    #[test]
    fn zero_rate_keeps_total_equal_to_subtotal() {
        let t = invoice_totals(&[item(33.33, 3)], 0.0);
        assert_eq!(t.total, t.subtotal);
        assert_eq!(t.tax_amount, Decimal::ZERO);
    }

    #[test]
    fn display_rounding_is_half_up() {
        assert_eq!(format_money(Decimal::new(1005, 3), "EUR"), "1.01 EUR");
        assert_eq!(format_price(18.0, "EUR"), "18.00 EUR");
    }
}
