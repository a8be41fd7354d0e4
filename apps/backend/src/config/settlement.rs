//! Business knobs for round settlement and bonus payouts.

use std::env;
use std::str::FromStr;

use crate::domain::claims::{default_fixed_tiers, FixedTier};
use crate::domain::economics::validate_percent;
use crate::error::AppError;

pub const DEFAULT_CREATION_SKIM_PERCENT: i32 = 5;
pub const DEFAULT_ADJUSTMENT_SKIM_PERCENT: i32 = 1;
pub const DEFAULT_DYNAMIC_TRIGGER_CALLS: usize = 4;
pub const DEFAULT_BAD_BINGO_CALLS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementConfig {
    /// Share of the prize moved into the bonus pool when a round is created.
    pub creation_skim_percent: i32,
    /// Share of the delta prize moved in or out of the pool on roster changes.
    pub adjustment_skim_percent: i32,
    /// Call count at which an exact win pays the dynamic pool.
    pub dynamic_trigger_calls: usize,
    /// Call count at which a zero-hit card counts as a win (when the house allows it).
    pub bad_bingo_calls: usize,
    /// Put a card on the round's lock-list after a losing claim.
    pub lock_false_claims: bool,
    /// Fixed payouts by call count when the dynamic bonus is off.
    pub fixed_tiers: Vec<FixedTier>,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            creation_skim_percent: DEFAULT_CREATION_SKIM_PERCENT,
            adjustment_skim_percent: DEFAULT_ADJUSTMENT_SKIM_PERCENT,
            dynamic_trigger_calls: DEFAULT_DYNAMIC_TRIGGER_CALLS,
            bad_bingo_calls: DEFAULT_BAD_BINGO_CALLS,
            lock_false_claims: true,
            fixed_tiers: default_fixed_tiers(),
        }
    }
}

impl SettlementConfig {
    /// Defaults overridden by any `HALL_*` variable that is set.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let cfg = Self {
            creation_skim_percent: var_or(
                "HALL_BONUS_CREATION_SKIM_PERCENT",
                defaults.creation_skim_percent,
            )?,
            adjustment_skim_percent: var_or(
                "HALL_BONUS_ADJUSTMENT_SKIM_PERCENT",
                defaults.adjustment_skim_percent,
            )?,
            dynamic_trigger_calls: var_or(
                "HALL_DYNAMIC_BONUS_CALLS",
                defaults.dynamic_trigger_calls,
            )?,
            bad_bingo_calls: var_or("HALL_BAD_BINGO_CALLS", defaults.bad_bingo_calls)?,
            lock_false_claims: var_or("HALL_LOCK_FALSE_CLAIMS", defaults.lock_false_claims)?,
            fixed_tiers: match env::var("HALL_FIXED_BONUS_TIERS") {
                Ok(raw) => parse_tiers(&raw)?,
                Err(_) => defaults.fixed_tiers,
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_percent("creation skim", self.creation_skim_percent)
            .and_then(|_| validate_percent("adjustment skim", self.adjustment_skim_percent))
            .map_err(|e| AppError::config(e.detail()))
    }
}

fn var_or<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("{name} has an invalid value '{raw}'"))),
        Err(_) => Ok(default),
    }
}

/// Parse `calls:amount` pairs separated by commas, e.g. `4:1000,5:500`.
pub fn parse_tiers(raw: &str) -> Result<Vec<FixedTier>, AppError> {
    let mut tiers = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let bad = || AppError::config(format!("malformed bonus tier '{part}'"));
        let (calls, amount) = part.split_once(':').ok_or_else(bad)?;
        let calls: usize = calls.trim().parse().map_err(|_| bad())?;
        let amount: i64 = amount.trim().parse().map_err(|_| bad())?;
        if amount <= 0 {
            return Err(bad());
        }
        if tiers.iter().any(|t: &FixedTier| t.calls == calls) {
            return Err(AppError::config(format!("bonus tier for {calls} calls repeated")));
        }
        tiers.push(FixedTier { calls, amount });
    }
    Ok(tiers)
}
