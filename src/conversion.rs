//! Coin-to-cent conversion engine.
//!
//! The progressive policy mints one cent at a time because the rate is a step
//! function of the wallet balance: each minted cent moves the balance and may
//! change the rate for the next cent, so a closed-form division would be wrong
//! at tier boundaries. Leftover coins below the next mintable cent are carried
//! forward as pending balance.

use serde::Deserialize;

use crate::constants::{
    COINS_PER_CENT_ARENA, COINS_PER_CENT_ENDLESS, RATE_HIGH_COINS_PER_CENT,
    RATE_LOW_COINS_PER_CENT, RATE_MID_COINS_PER_CENT, TIER_HIGH_THRESHOLD_DOLLARS,
    TIER_MID_THRESHOLD_DOLLARS,
};
use crate::models::GameMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardPolicy {
    /// Balance-tiered minting with pending-coin carryover (canonical).
    Progressive,
    /// Fixed per-mode divisor, no carryover (legacy).
    Flat,
}

/// Outcome of one progressive conversion over a coin pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub reward_cents: i64,
    pub remainder_coins: i64,
    pub new_balance_cents: i64,
}

/// Coins required to mint the next cent at the given balance.
///
/// Tiered on whole dollars (truncating division), evaluated on the current
/// balance so the rate can change mid-conversion.
pub fn rate_for(balance_cents: i64) -> i64 {
    let dollars = balance_cents / 100;
    if dollars < TIER_MID_THRESHOLD_DOLLARS {
        RATE_LOW_COINS_PER_CENT
    } else if dollars < TIER_HIGH_THRESHOLD_DOLLARS {
        RATE_MID_COINS_PER_CENT
    } else {
        RATE_HIGH_COINS_PER_CENT
    }
}

/// Convert a pool of coins into whole cents, one cent at a time.
///
/// Pure and integer-only. Terminates because the pool strictly decreases by
/// at least the smallest rate each iteration.
pub fn convert(starting_balance_cents: i64, coin_pool: i64) -> Conversion {
    let mut balance = starting_balance_cents.max(0);
    let mut pool = coin_pool.max(0);
    let mut minted = 0;

    loop {
        let rate = rate_for(balance);
        if pool < rate {
            break;
        }
        pool -= rate;
        minted += 1;
        balance += 1;
    }

    Conversion {
        reward_cents: minted,
        remainder_coins: pool,
        new_balance_cents: balance,
    }
}

/// Legacy flat-rate conversion: one fixed divisor per mode, floor division,
/// no pool and no carryover.
pub fn flat_convert(coins: i64, mode: GameMode) -> i64 {
    let per_cent = match mode {
        GameMode::Endless => COINS_PER_CENT_ENDLESS,
        GameMode::Arena => COINS_PER_CENT_ARENA,
    };
    coins.max(0) / per_cent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_is_tiered_and_non_decreasing() {
        assert_eq!(rate_for(0), 30);
        assert_eq!(rate_for(199), 30);
        assert_eq!(rate_for(200), 70);
        assert_eq!(rate_for(499), 70);
        assert_eq!(rate_for(500), 120);
        assert_eq!(rate_for(10_000), 120);

        let mut prev = rate_for(0);
        for balance in 0..1_000 {
            let rate = rate_for(balance);
            assert!(rate >= prev);
            assert!(matches!(rate, 30 | 70 | 120));
            prev = rate;
        }
    }

    #[test]
    fn below_first_rate_mints_nothing() {
        let c = convert(0, 29);
        assert_eq!(c.reward_cents, 0);
        assert_eq!(c.remainder_coins, 29);
        assert_eq!(c.new_balance_cents, 0);
    }

    #[test]
    fn exactly_one_cent_at_rate_30() {
        let c = convert(0, 30);
        assert_eq!(c.reward_cents, 1);
        assert_eq!(c.remainder_coins, 0);
        assert_eq!(c.new_balance_cents, 1);
    }

    #[test]
    fn cent_crossing_two_dollar_boundary_uses_rate_before_mint() {
        // Balance 199 -> the minted cent is priced at 30 even though it lands on $2.00.
        let c = convert(199, 30);
        assert_eq!(c.reward_cents, 1);
        assert_eq!(c.remainder_coins, 0);
        assert_eq!(c.new_balance_cents, 200);
    }

    #[test]
    fn at_two_dollars_the_rate_is_70() {
        let c = convert(200, 69);
        assert_eq!(c.reward_cents, 0);
        assert_eq!(c.remainder_coins, 69);
        assert_eq!(c.new_balance_cents, 200);

        let c = convert(200, 70);
        assert_eq!(c.reward_cents, 1);
        assert_eq!(c.remainder_coins, 0);
        assert_eq!(c.new_balance_cents, 201);
    }

    #[test]
    fn balance_delta_equals_reward_and_remainder_is_below_landing_rate() {
        for (balance, pool) in [(0, 0), (0, 1_000), (150, 500), (199, 30), (480, 5_000), (600, 12_345)] {
            let c = convert(balance, pool);
            assert_eq!(c.new_balance_cents - balance, c.reward_cents);
            assert!(c.remainder_coins < rate_for(c.new_balance_cents));
            assert!(c.reward_cents >= 0);
            assert!(c.remainder_coins >= 0);
        }
    }

    #[test]
    fn negative_inputs_are_clamped() {
        let c = convert(-5, -10);
        assert_eq!(c.reward_cents, 0);
        assert_eq!(c.remainder_coins, 0);
        assert_eq!(c.new_balance_cents, 0);
    }

    #[test]
    fn conversion_is_deterministic() {
        assert_eq!(convert(123, 4_567), convert(123, 4_567));
    }

    #[test]
    fn flat_rate_uses_per_mode_divisor() {
        assert_eq!(flat_convert(100, GameMode::Endless), 20);
        assert_eq!(flat_convert(100, GameMode::Arena), 6);
        assert_eq!(flat_convert(4, GameMode::Endless), 0);
        assert_eq!(flat_convert(-50, GameMode::Arena), 0);
    }
}
