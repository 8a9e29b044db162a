//! PostgreSQL-backed [`AccountRepository`].
//!
//! Emails reach this adapter already normalised, so the plain unique
//! constraint on `accounts.email` enforces case-insensitive uniqueness.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{AccountRepository, AccountRepositoryError, NewAccount, StoredAccount};
use crate::domain::{Account, AccountCounts, AccountId, AccountKind, CredentialHash, Email};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{AccountRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

const EMAIL_CONSTRAINT: &str = "accounts_email_key";

/// Diesel implementation of the account repository port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    AccountRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::UniqueViolation { constraint }
            if constraint.as_deref().is_none_or(|name| name == EMAIL_CONSTRAINT) =>
        {
            AccountRepositoryError::duplicate_email()
        }
        DieselFailure::UniqueViolation { .. } => {
            AccountRepositoryError::query("unexpected unique violation")
        }
        DieselFailure::Connection => {
            AccountRepositoryError::connection("database unavailable or write conflict unresolved")
        }
        DieselFailure::Query(message) => AccountRepositoryError::query(message),
    }
}

fn row_to_account(row: AccountRow) -> Result<Account, AccountRepositoryError> {
    let corrupt = |what: &str| {
        warn!(account_id = row.id, what, "corrupt account row");
        AccountRepositoryError::query(format!("corrupt account row: {what}"))
    };
    let id = AccountId::new(row.id).map_err(|_| corrupt("id"))?;
    let email = Email::parse(&row.email).map_err(|_| corrupt("email"))?;
    let kind: AccountKind = row.kind.parse().map_err(|_| corrupt("kind"))?;
    Ok(Account::new(id, email, kind, row.created_at))
}

fn row_to_stored(row: AccountRow) -> Result<StoredAccount, AccountRepositoryError> {
    let credential = CredentialHash::from_phc(row.credential.clone());
    Ok(StoredAccount {
        account: row_to_account(row)?,
        credential,
    })
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAccountRow {
            email: account.email.as_ref(),
            credential: account.credential.as_str(),
            kind: account.kind.as_str(),
        };

        let inserted: AccountRow = diesel::insert_into(accounts::table)
            .values(&row)
            .returning(AccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_account(inserted)
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AccountRow> = accounts::table
            .filter(accounts::email.eq(email.as_ref()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_stored).transpose()
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AccountRow> = accounts::table
            .find(id.get())
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_account).transpose()
    }

    async fn count_by_kind(&self) -> Result<AccountCounts, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(String, i64)> = accounts::table
            .group_by(accounts::kind)
            .select((accounts::kind, diesel::dsl::count(accounts::id)))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut counts = AccountCounts::default();
        for (kind, count) in rows {
            let kind: AccountKind = kind
                .parse()
                .map_err(|_| AccountRepositoryError::query(format!("unknown account kind {kind}")))?;
            counts.record(kind, u64::try_from(count).unwrap_or_default());
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[derive(Debug)]
    struct ConstraintInfo(&'static str);

    impl DatabaseErrorInformation for ConstraintInfo {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("accounts")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some(self.0)
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique_violation(constraint: &'static str) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(ConstraintInfo(constraint)),
        )
    }

    fn row(kind: &str, email: &str) -> AccountRow {
        AccountRow {
            id: 1,
            email: email.to_owned(),
            credential: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$ZGlnZXN0".to_owned(),
            kind: kind.to_owned(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn email_unique_violation_is_duplicate_email() {
        assert_eq!(
            map_diesel_error(unique_violation(EMAIL_CONSTRAINT)),
            AccountRepositoryError::DuplicateEmail
        );
    }

    #[rstest]
    fn other_unique_violations_are_query_errors() {
        assert!(matches!(
            map_diesel_error(unique_violation("accounts_pkey")),
            AccountRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    fn closed_connections_are_connection_errors() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(String::from("server closed the connection")),
        );
        assert!(matches!(
            map_diesel_error(error),
            AccountRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn pool_errors_are_connection_errors() {
        assert_eq!(
            map_pool_error(PoolError::checkout("timed out")),
            AccountRepositoryError::connection("timed out")
        );
    }

    #[rstest]
    fn rows_convert_to_stored_accounts() {
        let stored = row_to_stored(row("company", "acme@x.com")).expect("valid row");
        assert_eq!(stored.account.kind(), AccountKind::Company);
        assert_eq!(stored.account.email().as_ref(), "acme@x.com");
        assert!(stored.credential.as_str().starts_with("$argon2id$"));
    }

    #[rstest]
    #[case("recruiter", "acme@x.com")]
    #[case("company", "not-an-email")]
    fn corrupt_rows_are_query_errors(#[case] kind: &str, #[case] email: &str) {
        assert!(matches!(
            row_to_account(row(kind, email)),
            Err(AccountRepositoryError::Query { .. })
        ));
    }
}
