//! Repository functions: domain models over the SeaORM adapters.

pub mod accounts;
pub mod awards;
pub mod cards;
pub mod houses;
pub mod pools;
pub mod sessions;
