//! Domain-level error type used across services and adapters.
//!
//! This error type is transport- and DB-agnostic. Adapters return
//! `sea_orm::DbErr`; the repos layer converts it through
//! `crate::infra::db_errors::map_db_err`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::errors::ErrorCode;

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Validation failure kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    PercentOutOfRange,
    InvalidStake,
    InvalidPlayerCount,
    InvalidCardId,
    DuplicateCard,
    CalledNumberOutOfRange,
    DuplicateCalledNumber,
    UnknownPattern,
    StakeMismatch,
    InvalidBonusAmount,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    House,
    Operator,
    Account,
    Session,
    Card,
    Pool,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    DuplicateAward,
    RoundFinished,
    ActivePoolExists,
    PoolAlreadyRotated,
    SessionSeqTaken,
    OptimisticLock,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed input or business rule violation
    Validation(ValidationKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Semantic conflict (duplicate award, finished round, concurrent update)
    Conflict(ConflictKind, String),
    /// A write would drive an account below zero
    InsufficientBalance(String),
    /// Internal consistency check failed; indicates a bug
    InvariantViolation(String),
    /// Card is on the round's lock-list
    Locked(String),
    /// Card is not registered for the round
    NotRegistered(String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::InsufficientBalance(d) => write!(f, "insufficient balance: {d}"),
            DomainError::InvariantViolation(d) => write!(f, "invariant violation: {d}"),
            DomainError::Locked(d) => write!(f, "card locked: {d}"),
            DomainError::NotRegistered(d) => write!(f, "card not registered: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn insufficient_balance(detail: impl Into<String>) -> Self {
        Self::InsufficientBalance(detail.into())
    }
    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::InvariantViolation(detail.into())
    }
    pub fn locked(detail: impl Into<String>) -> Self {
        Self::Locked(detail.into())
    }
    pub fn not_registered(detail: impl Into<String>) -> Self {
        Self::NotRegistered(detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Stable, caller-facing error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::PercentOutOfRange => ErrorCode::PercentOutOfRange,
                ValidationKind::InvalidStake => ErrorCode::InvalidStake,
                ValidationKind::InvalidPlayerCount => ErrorCode::InvalidPlayerCount,
                ValidationKind::InvalidCardId | ValidationKind::DuplicateCard => {
                    ErrorCode::InvalidCardRoster
                }
                ValidationKind::CalledNumberOutOfRange | ValidationKind::DuplicateCalledNumber => {
                    ErrorCode::InvalidCalledNumbers
                }
                ValidationKind::UnknownPattern => ErrorCode::UnknownPattern,
                ValidationKind::StakeMismatch => ErrorCode::StakeMismatch,
                ValidationKind::InvalidBonusAmount => ErrorCode::InvalidBonusAmount,
                ValidationKind::Other(_) => ErrorCode::ValidationError,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::House => ErrorCode::HouseNotFound,
                NotFoundKind::Operator => ErrorCode::OperatorNotFound,
                NotFoundKind::Account => ErrorCode::AccountNotFound,
                NotFoundKind::Session => ErrorCode::SessionNotFound,
                NotFoundKind::Card => ErrorCode::CardNotFound,
                NotFoundKind::Pool => ErrorCode::PoolNotFound,
                NotFoundKind::Other(_) => ErrorCode::NotFound,
            },
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::DuplicateAward => ErrorCode::DuplicateAward,
                ConflictKind::RoundFinished => ErrorCode::RoundFinished,
                ConflictKind::ActivePoolExists => ErrorCode::ActivePoolExists,
                ConflictKind::PoolAlreadyRotated => ErrorCode::PoolAlreadyRotated,
                ConflictKind::SessionSeqTaken => ErrorCode::SessionSeqTaken,
                ConflictKind::OptimisticLock => ErrorCode::OptimisticLock,
                ConflictKind::Other(_) => ErrorCode::Conflict,
            },
            DomainError::InsufficientBalance(_) => ErrorCode::InsufficientBalance,
            DomainError::InvariantViolation(_) => ErrorCode::InvariantViolation,
            DomainError::Locked(_) => ErrorCode::CardLocked,
            DomainError::NotRegistered(_) => ErrorCode::CardNotRegistered,
            DomainError::Infra(kind, _) => match kind {
                InfraErrorKind::Timeout => ErrorCode::DbTimeout,
                InfraErrorKind::DbUnavailable => ErrorCode::DbUnavailable,
                InfraErrorKind::DataCorruption => ErrorCode::DataCorruption,
                InfraErrorKind::Other(_) => ErrorCode::DbError,
            },
        }
    }

    /// Human-readable reason.
    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, d)
            | DomainError::NotFound(_, d)
            | DomainError::Conflict(_, d)
            | DomainError::InsufficientBalance(d)
            | DomainError::InvariantViolation(d)
            | DomainError::Locked(d)
            | DomainError::NotRegistered(d)
            | DomainError::Infra(_, d) => d,
        }
    }

    /// Whether re-reading state and retrying can succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            DomainError::InsufficientBalance(_) | DomainError::Conflict(..) => true,
            DomainError::Infra(kind, _) => {
                matches!(kind, InfraErrorKind::Timeout | InfraErrorKind::DbUnavailable)
            }
            _ => false,
        }
    }
}
