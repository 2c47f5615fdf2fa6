//! Order pricing in exact decimal arithmetic.

use rust_decimal::Decimal;

/// Unit price times quantity. `None` on overflow.
pub fn line_subtotal(unit_price: Decimal, quantity: u32) -> Option<Decimal> {
    unit_price.checked_mul(Decimal::from(quantity))
}

/// Sum of line subtotals. `None` on overflow.
pub fn order_total<I>(subtotals: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    subtotals
        .into_iter()
        .try_fold(Decimal::ZERO, |total, subtotal| total.checked_add(subtotal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtotal_is_exact() {
        let price = Decimal::new(1999, 2);
        assert_eq!(line_subtotal(price, 3), Some(Decimal::new(5997, 2)));
        assert_eq!(line_subtotal(price, 0), Some(Decimal::ZERO));
    }

    #[test]
    fn test_total_sums_lines() {
        let lines = [Decimal::new(2000, 2), Decimal::new(10, 1), Decimal::new(333, 2)];
        assert_eq!(order_total(lines), Some(Decimal::new(2433, 2)));
        assert_eq!(order_total(Vec::new()), Some(Decimal::ZERO));
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(line_subtotal(Decimal::MAX, 2), None);
        assert_eq!(order_total([Decimal::MAX, Decimal::ONE]), None);
    }
}
