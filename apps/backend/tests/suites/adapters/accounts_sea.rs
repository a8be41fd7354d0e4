use bingo_backend::adapters::accounts_sea;
use bingo_backend::entities::accounts::AccountRole;
use bingo_backend::errors::domain::DomainError;
use bingo_backend::repos::accounts;

use crate::support::hall_setup::{setup_hall, HallOptions};

#[tokio::test]
async fn debit_never_goes_negative() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let account = accounts_sea::create_account(hall.db(), AccountRole::Operator, 30).await?;

    assert_eq!(accounts_sea::debit(hall.db(), account.id, 30).await?, 1);
    assert_eq!(accounts_sea::debit(hall.db(), account.id, 1).await?, 0);

    let row = accounts_sea::find_by_id(hall.db(), account.id)
        .await?
        .expect("account row");
    assert_eq!(row.balance, 0);
    Ok(())
}

#[tokio::test]
async fn repo_debit_reports_insufficient_balance() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let account = accounts::create_account(hall.db(), AccountRole::Operator, 7).await?;

    let err = accounts::debit(hall.db(), account.id, 8).await.unwrap_err();
    assert!(matches!(err, DomainError::InsufficientBalance(_)));

    let after = accounts::credit(hall.db(), account.id, 3).await?;
    assert_eq!(after.balance, 10);
    Ok(())
}

#[tokio::test]
async fn negative_balance_is_refused_by_the_schema() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let account = accounts::create_account(hall.db(), AccountRole::Cashier, 1).await?;

    let err = accounts_sea::set_balance(hall.db(), account.id, -1)
        .await
        .unwrap_err();
    assert!(matches!(
        bingo_backend::infra::db_errors::map_db_err(err),
        DomainError::InsufficientBalance(_)
    ));
    Ok(())
}
