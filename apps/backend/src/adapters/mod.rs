//! SeaORM adapters. Functions here return `sea_orm::DbErr`; the repos layer
//! turns those into domain errors.

pub mod accounts_sea;
pub mod awards_sea;
pub mod cards_sea;
pub mod houses_sea;
pub mod pools_sea;
pub mod sessions_sea;
