//! DTOs for houses_sea adapter.

/// DTO for registering a house with its operator (and optional cashier) account.
#[derive(Debug, Clone)]
pub struct HouseCreate {
    pub name: String,
    pub operator_account_id: i64,
    pub cashier_account_id: Option<i64>,
    pub dynamic_bonus_enabled: bool,
    pub bad_bingo_enabled: bool,
}

impl HouseCreate {
    pub fn new(name: impl Into<String>, operator_account_id: i64) -> Self {
        Self {
            name: name.into(),
            operator_account_id,
            cashier_account_id: None,
            dynamic_bonus_enabled: false,
            bad_bingo_enabled: false,
        }
    }

    pub fn with_cashier(mut self, account_id: i64) -> Self {
        self.cashier_account_id = Some(account_id);
        self
    }

    pub fn with_dynamic_bonus(mut self, enabled: bool) -> Self {
        self.dynamic_bonus_enabled = enabled;
        self
    }

    pub fn with_bad_bingo(mut self, enabled: bool) -> Self {
        self.bad_bingo_enabled = enabled;
        self
    }
}
