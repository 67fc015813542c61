//! Atomic-unit amount formatting.

use crate::params::{COIN, DECIMAL_PLACES, TICKER};

/// Format an atomic-unit amount as a decimal currency string.
///
/// `1_500_000` formats as `"1.500000 KSL"`.
pub fn format_amount(atomic: u64) -> String {
    format!(
        "{}.{:0width$} {}",
        atomic / COIN,
        atomic % COIN,
        TICKER,
        width = DECIMAL_PLACES as usize
    )
}
