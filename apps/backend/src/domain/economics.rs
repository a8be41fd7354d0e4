//! Round economics: stake, house earnings, prize and bonus skim.
//!
//! Amounts are whole currency units. House earnings and the bonus skim round
//! down; the prize absorbs the remainder so the parts always sum to the stake.

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Money split for a number of players at one stake and cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundEconomics {
    pub total_stake: i64,
    pub house_earnings: i64,
    pub prize: i64,
    pub bonus_deduction: i64,
}

impl RoundEconomics {
    /// Split `stake_per_player * players` by the house cut, then skim
    /// `skim_percent` of the prize into the bonus deduction.
    pub fn compute(
        stake_per_player: i64,
        players: i64,
        cut_percent: i32,
        skim_percent: i32,
    ) -> Result<Self, DomainError> {
        validate_percent("cut", cut_percent)?;
        validate_percent("bonus skim", skim_percent)?;
        if stake_per_player <= 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidStake,
                format!("stake per player must be positive, got {stake_per_player}"),
            ));
        }
        if players < 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayerCount,
                format!("player count cannot be negative, got {players}"),
            ));
        }

        let total_stake = stake_per_player.checked_mul(players).ok_or_else(|| {
            DomainError::validation(ValidationKind::InvalidStake, "total stake overflows")
        })?;
        let house_earnings = percent_of(total_stake, cut_percent)?;
        let gross_prize = total_stake - house_earnings;
        let bonus_deduction = percent_of(gross_prize, skim_percent)?;

        Ok(Self {
            total_stake,
            house_earnings,
            prize: gross_prize - bonus_deduction,
            bonus_deduction,
        })
    }

    /// Whether the parts add up to the stake and none is negative.
    pub fn is_balanced(&self) -> bool {
        self.total_stake >= 0
            && self.house_earnings >= 0
            && self.prize >= 0
            && self.bonus_deduction >= 0
            && self.prize + self.house_earnings + self.bonus_deduction == self.total_stake
    }

    pub fn plus(self, delta: RoundEconomics) -> Self {
        Self {
            total_stake: self.total_stake + delta.total_stake,
            house_earnings: self.house_earnings + delta.house_earnings,
            prize: self.prize + delta.prize,
            bonus_deduction: self.bonus_deduction + delta.bonus_deduction,
        }
    }

    pub fn minus(self, delta: RoundEconomics) -> Self {
        Self {
            total_stake: self.total_stake - delta.total_stake,
            house_earnings: self.house_earnings - delta.house_earnings,
            prize: self.prize - delta.prize,
            bonus_deduction: self.bonus_deduction - delta.bonus_deduction,
        }
    }
}

pub fn validate_percent(what: &str, percent: i32) -> Result<(), DomainError> {
    if (0..=100).contains(&percent) {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::PercentOutOfRange,
            format!("{what} percent must be within 0..=100, got {percent}"),
        ))
    }
}

fn percent_of(amount: i64, percent: i32) -> Result<i64, DomainError> {
    amount
        .checked_mul(i64::from(percent))
        .map(|scaled| scaled / 100)
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidStake,
                format!("{percent}% of {amount} overflows"),
            )
        })
}
