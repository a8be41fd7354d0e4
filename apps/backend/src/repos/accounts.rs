//! Prepaid balances of house operators and cashiers.

use sea_orm::ConnectionTrait;
use tracing::debug;

use crate::adapters::accounts_sea as accounts_adapter;
use crate::entities::accounts::{self, AccountRole};
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub role: AccountRole,
    pub balance: i64,
}

impl From<accounts::Model> for Account {
    fn from(m: accounts::Model) -> Self {
        Self {
            id: m.id,
            role: m.role,
            balance: m.balance,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<Account>, DomainError> {
    Ok(accounts_adapter::find_by_id(conn, id).await?.map(Account::from))
}

pub async fn require_account<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Account, DomainError> {
    find_by_id(conn, id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Account, format!("account {id}")))
}

pub async fn create_account<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role: AccountRole,
    balance: i64,
) -> Result<Account, DomainError> {
    let model = accounts_adapter::create_account(conn, role, balance).await?;
    Ok(Account::from(model))
}

/// Charge `amount`; fails with `InsufficientBalance` instead of going negative.
pub async fn debit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    amount: i64,
) -> Result<Account, DomainError> {
    if amount == 0 {
        return require_account(conn, id).await;
    }
    if accounts_adapter::debit(conn, id, amount).await? == 0 {
        let account = require_account(conn, id).await?;
        return Err(DomainError::insufficient_balance(format!(
            "account {id} holds {} but {amount} is required",
            account.balance
        )));
    }
    let account = require_account(conn, id).await?;
    debug!(account_id = id, amount, balance = account.balance, "account debited");
    Ok(account)
}

pub async fn credit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    amount: i64,
) -> Result<Account, DomainError> {
    if amount != 0 && accounts_adapter::credit(conn, id, amount).await? == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Account,
            format!("account {id}"),
        ));
    }
    let account = require_account(conn, id).await?;
    debug!(account_id = id, amount, balance = account.balance, "account credited");
    Ok(account)
}

/// Copy the operator balance onto the cashier account.
pub async fn mirror_balance<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    operator: &Account,
    cashier_id: i64,
) -> Result<(), DomainError> {
    if accounts_adapter::set_balance(conn, cashier_id, operator.balance).await? == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Account,
            format!("cashier account {cashier_id}"),
        ));
    }
    Ok(())
}
