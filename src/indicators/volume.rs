use rust_decimal::Decimal;
use super::sma_tail;

/// Ratio of the recent average volume to the whole-window average.
///
/// The recent average covers the last `recent_window` volumes, or all of
/// them when the window is shorter. A zero window average yields a ratio of
/// one so the caller buckets it as neutral.
pub fn relative_volume(volumes: &[Decimal], recent_window: usize) -> Option<Decimal> {
    let avg_volume = sma_tail(volumes, volumes.len())?;
    let recent_volume = sma_tail(volumes, recent_window)?;

    if avg_volume.is_zero() {
        return Some(Decimal::ONE);
    }
    recent_volume.checked_div(avg_volume)
}

pub fn is_high_volume(relative: Decimal, threshold: Decimal) -> bool {
    relative > threshold
}

pub fn is_low_volume(relative: Decimal, threshold: Decimal) -> bool {
    relative < threshold
}
