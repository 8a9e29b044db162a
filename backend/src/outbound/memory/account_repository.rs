//! Mutex-guarded account table.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{AccountRepository, AccountRepositoryError, NewAccount, StoredAccount};
use crate::domain::{Account, AccountCounts, AccountId, Email};

#[derive(Default)]
struct AccountTable {
    last_id: i64,
    rows: BTreeMap<AccountId, StoredAccount>,
    by_email: HashMap<Email, AccountId>,
}

/// Account repository holding rows in memory.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    table: Mutex<AccountTable>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, AccountTable>, AccountRepositoryError> {
        self.table
            .lock()
            .map_err(|_| AccountRepositoryError::query("account table lock poisoned"))
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut table = self.lock()?;
        if table.by_email.contains_key(&account.email) {
            return Err(AccountRepositoryError::duplicate_email());
        }

        let id = AccountId::new(table.last_id + 1)
            .map_err(|err| AccountRepositoryError::query(err.to_string()))?;
        let created = Account::new(id, account.email.clone(), account.kind, Utc::now());
        table.last_id = id.get();
        table.by_email.insert(account.email.clone(), id);
        table.rows.insert(
            id,
            StoredAccount {
                account: created.clone(),
                credential: account.credential.clone(),
            },
        );
        Ok(created)
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError> {
        let table = self.lock()?;
        Ok(table
            .by_email
            .get(email)
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let table = self.lock()?;
        Ok(table.rows.get(&id).map(|row| row.account.clone()))
    }

    async fn count_by_kind(&self) -> Result<AccountCounts, AccountRepositoryError> {
        let table = self.lock()?;
        let mut counts = AccountCounts::default();
        for row in table.rows.values() {
            counts.record(row.account.kind(), 1);
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountKind, CredentialHash};
    use rstest::{fixture, rstest};

    #[fixture]
    fn repo() -> InMemoryAccountRepository {
        InMemoryAccountRepository::new()
    }

    fn new_account(email: &str, kind: AccountKind) -> NewAccount {
        NewAccount {
            email: Email::parse(email).expect("valid email"),
            credential: CredentialHash::from_phc("$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA"),
            kind,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn ids_start_at_one_and_increase(repo: InMemoryAccountRepository) {
        let first = repo
            .insert(&new_account("a@x.com", AccountKind::Candidate))
            .await
            .expect("insert");
        let second = repo
            .insert(&new_account("b@x.com", AccountKind::Company))
            .await
            .expect("insert");
        assert_eq!(first.id().get(), 1);
        assert_eq!(second.id().get(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected_regardless_of_kind(repo: InMemoryAccountRepository) {
        repo.insert(&new_account("a@x.com", AccountKind::Candidate))
            .await
            .expect("insert");
        let err = repo
            .insert(&new_account("A@X.com", AccountKind::Company))
            .await
            .expect_err("duplicate");
        assert_eq!(err, AccountRepositoryError::DuplicateEmail);
        assert_eq!(repo.count_by_kind().await.expect("count").companies, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn lookups_return_stored_rows(repo: InMemoryAccountRepository) {
        let created = repo
            .insert(&new_account("a@x.com", AccountKind::Company))
            .await
            .expect("insert");
        let email = Email::parse("a@x.com").expect("valid email");

        let stored = repo
            .find_by_email(&email)
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(stored.account, created);
        assert_eq!(
            repo.find_by_id(created.id()).await.expect("lookup"),
            Some(created)
        );
        let missing = AccountId::new(99).expect("valid id");
        assert_eq!(repo.find_by_id(missing).await.expect("lookup"), None);
    }
}
