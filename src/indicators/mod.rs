pub mod volume;

pub use volume::*;

use rust_decimal::Decimal;

use crate::error::ClassifyError;

/// Simple moving average over the last `period` values.
///
/// When fewer than `period` values exist the average is taken over all of
/// them. Returns `None` for an empty window or on overflow.
pub fn sma_tail(values: &[Decimal], period: usize) -> Option<Decimal> {
    let count = period.min(values.len());
    if count == 0 {
        return None;
    }
    let sum = values
        .iter()
        .rev()
        .take(count)
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))?;
    sum.checked_div(Decimal::from(count as u64))
}

/// Mean of `|v[i] / v[i-1] - 1|` over the most recent `transitions` steps
/// (or all `n - 1` steps if fewer are available). Zero when `n < 2`.
pub fn mean_abs_change(values: &[Decimal], transitions: usize) -> Result<Decimal, ClassifyError> {
    let n = values.len();
    if n < 2 {
        return Ok(Decimal::ZERO);
    }

    let steps = transitions.min(n - 1);
    if steps == 0 {
        return Ok(Decimal::ZERO);
    }

    let mut total = Decimal::ZERO;
    for i in (n - steps)..n {
        let prev = values[i - 1];
        if prev <= Decimal::ZERO {
            return Err(ClassifyError::NonPositivePrice { index: i - 1 });
        }
        let change = values[i]
            .checked_div(prev)
            .ok_or(ClassifyError::Overflow("price change"))?
            - Decimal::ONE;
        total = total
            .checked_add(change.abs())
            .ok_or(ClassifyError::Overflow("volatility"))?;
    }

    total
        .checked_div(Decimal::from(steps as u64))
        .ok_or(ClassifyError::Overflow("volatility"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sma_tail_uses_last_period_values() {
        let values = [dec!(1), dec!(2), dec!(3), dec!(4)];
        assert_eq!(sma_tail(&values, 2), Some(dec!(3.5)));
    }

    #[test]
    fn test_sma_tail_short_history_averages_everything() {
        let values = [dec!(2), dec!(4)];
        assert_eq!(sma_tail(&values, 50), Some(dec!(3)));
        assert_eq!(sma_tail(&[], 10), None);
    }

    #[test]
    fn test_mean_abs_change() {
        // +10% then -10%
        let values = [dec!(100), dec!(110), dec!(99)];
        assert_eq!(mean_abs_change(&values, 20).unwrap(), dec!(0.1));
        // Only the last transition
        assert_eq!(mean_abs_change(&values, 1).unwrap(), dec!(0.1));
    }

    #[test]
    fn test_mean_abs_change_short_input() {
        assert_eq!(mean_abs_change(&[dec!(5)], 20).unwrap(), Decimal::ZERO);
        assert_eq!(mean_abs_change(&[], 20).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_mean_abs_change_rejects_zero_price() {
        let values = [dec!(100), dec!(0), dec!(100)];
        assert_eq!(
            mean_abs_change(&values, 20),
            Err(ClassifyError::NonPositivePrice { index: 1 })
        );
    }

    #[test]
    fn test_mean_abs_change_window_limits_transitions() {
        // First jump is outside a 2-transition window
        let values = [dec!(100), dec!(200), dec!(200), dec!(200)];
        assert_eq!(mean_abs_change(&values, 2).unwrap(), Decimal::ZERO);
        assert!(mean_abs_change(&values, 3).unwrap() > Decimal::ZERO);
    }
}
