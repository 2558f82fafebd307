//! Token Amount Conversion
//!
//! Converts raw on-chain integer balances into the whole-token quantity
//! sent to the trade API, and SOL amounts into lamports.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::ToPrimitive;

/// Lamports per SOL
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Convert a raw token balance to whole tokens, rounding half away from zero.
///
/// Fractional remainders are dropped: `1_234_500` with 6 decimals is `1`.
pub fn raw_to_whole_tokens(raw: u64, decimals: u8) -> u64 {
    let scaled = Decimal::from_i128_with_scale(raw as i128, u32::from(decimals).min(28));
    scaled
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(0)
}

/// Convert a SOL amount to lamports (truncating sub-lamport dust)
pub fn sol_to_lamports(sol: f64) -> u64 {
    if !sol.is_finite() || sol <= 0.0 {
        return 0;
    }
    (sol * LAMPORTS_PER_SOL as f64) as u64
}

/// Convert lamports to SOL for display
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}
