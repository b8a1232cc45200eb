/// Application constants

// Progressive conversion tiers: balance in whole dollars -> coins per cent
pub const TIER_MID_THRESHOLD_DOLLARS: i64 = 2;
pub const TIER_HIGH_THRESHOLD_DOLLARS: i64 = 5;
pub const RATE_LOW_COINS_PER_CENT: i64 = 30;
pub const RATE_MID_COINS_PER_CENT: i64 = 70;
pub const RATE_HIGH_COINS_PER_CENT: i64 = 120;

// Flat-rate divisors (legacy per-mode policy, still selectable via REWARD_POLICY)
pub const COINS_PER_CENT_ENDLESS: i64 = 5;
pub const COINS_PER_CENT_ARENA: i64 = 15;

// Session finish guards
pub const MAX_COINS_PER_SESSION: i64 = 100_000;
pub const MAX_CLIENT_ELAPSED_MS: i64 = 600_000; // 10 minutes
pub const MAX_SERVER_ELAPSED_MS: i64 = 900_000; // 15 minutes
