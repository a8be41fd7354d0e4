pub mod accounts;
pub mod bonus_awards;
pub mod bonus_pools;
pub mod cards;
pub mod game_sessions;
pub mod houses;

pub use accounts::Entity as Accounts;
pub use accounts::Model as Account;
pub use bonus_awards::Entity as BonusAwards;
pub use bonus_awards::Model as BonusAward;
pub use bonus_pools::Entity as BonusPools;
pub use bonus_pools::Model as BonusPool;
pub use cards::Entity as Cards;
pub use cards::Model as CardRecord;
pub use game_sessions::Entity as GameSessions;
pub use game_sessions::Model as GameSession;
pub use houses::Entity as Houses;
pub use houses::Model as House;
