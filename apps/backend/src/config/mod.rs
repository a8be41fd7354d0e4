pub mod db;
pub mod settlement;
