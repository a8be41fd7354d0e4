//! Error codes for the bingo hall backend.
//!
//! This module defines all error codes surfaced to callers.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE.

use core::fmt;

/// Centralized error codes.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that callers
/// can match on regardless of the detail text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Cut or skim percent outside 0..=100
    PercentOutOfRange,
    /// Stake must be positive
    InvalidStake,
    /// Player count must be non-negative
    InvalidPlayerCount,
    /// Blank or duplicate card id in a roster
    InvalidCardRoster,
    /// Called number out of range or repeated
    InvalidCalledNumbers,
    /// Pattern name not in the registry
    UnknownPattern,
    /// Update used a different stake or cut than the live round
    StakeMismatch,
    /// Manual bonus amount missing or not positive
    InvalidBonusAmount,
    /// General validation error
    ValidationError,

    // Resource Not Found
    HouseNotFound,
    OperatorNotFound,
    AccountNotFound,
    SessionNotFound,
    CardNotFound,
    /// No active pool (or none with a positive amount)
    PoolNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// A bonus was already awarded for the round
    DuplicateAward,
    /// Round already has a winner
    RoundFinished,
    /// A second active pool would exist for the house
    ActivePoolExists,
    /// The pool was rotated by a concurrent request
    PoolAlreadyRotated,
    /// Session sequence number already used for the house
    SessionSeqTaken,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // Ledger and consistency
    /// Write would make an account balance negative
    InsufficientBalance,
    /// Internal consistency check failed
    InvariantViolation,

    // Card checks
    CardLocked,
    CardNotRegistered,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    ConfigError,
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Request Validation
            Self::PercentOutOfRange => "PERCENT_OUT_OF_RANGE",
            Self::InvalidStake => "INVALID_STAKE",
            Self::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
            Self::InvalidCardRoster => "INVALID_CARD_ROSTER",
            Self::InvalidCalledNumbers => "INVALID_CALLED_NUMBERS",
            Self::UnknownPattern => "UNKNOWN_PATTERN",
            Self::StakeMismatch => "STAKE_MISMATCH",
            Self::InvalidBonusAmount => "INVALID_BONUS_AMOUNT",
            Self::ValidationError => "VALIDATION_ERROR",

            // Resource Not Found
            Self::HouseNotFound => "HOUSE_NOT_FOUND",
            Self::OperatorNotFound => "OPERATOR_NOT_FOUND",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::CardNotFound => "CARD_NOT_FOUND",
            Self::PoolNotFound => "POOL_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Business Logic Conflicts
            Self::DuplicateAward => "DUPLICATE_AWARD",
            Self::RoundFinished => "ROUND_FINISHED",
            Self::ActivePoolExists => "ACTIVE_POOL_EXISTS",
            Self::PoolAlreadyRotated => "POOL_ALREADY_ROTATED",
            Self::SessionSeqTaken => "SESSION_SEQ_TAKEN",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::InsufficientBalance => "INSUFFICIENT_BALANCE",
            Self::InvariantViolation => "INVARIANT_VIOLATION",

            Self::CardLocked => "CARD_LOCKED",
            Self::CardNotRegistered => "CARD_NOT_REGISTERED",

            // System Errors
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
