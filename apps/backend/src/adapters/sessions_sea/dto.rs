//! DTOs for sessions_sea adapter.

/// DTO for inserting a new round.
#[derive(Debug, Clone)]
pub struct SessionCreate {
    pub house_id: i64,
    pub session_seq: i64,
    pub operator_account_id: i64,
    pub stake_per_player: i64,
    pub player_count: i32,
    pub total_stake: i64,
    pub house_cut_percent: i32,
    pub prize: i64,
    pub house_earnings: i64,
    pub bonus_deduction: i64,
    /// JSON array of card ids
    pub card_ids: String,
}

/// Roster and money columns rewritten together under one lock_version bump.
#[derive(Debug, Clone)]
pub struct SessionRosterUpdate {
    pub id: i64,
    pub expected_version: i32,
    pub player_count: i32,
    pub total_stake: i64,
    pub prize: i64,
    pub house_earnings: i64,
    pub bonus_deduction: i64,
    pub card_ids: String,
}
