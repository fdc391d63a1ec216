//! Read-only user statistics for the reports page.

use std::sync::Arc;

use crate::domain::ports::UserRepository;
use crate::domain::record_service::map_record_error;
use crate::domain::{Error, Record, RecordStatus, User};

/// Aggregate user counts, recomputed on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserStatistics {
    pub active_count: u64,
    pub total_count: u64,
}

/// Aggregations over the user store.
#[derive(Clone)]
pub struct ReportingService {
    users: Arc<dyn UserRepository>,
}

impl ReportingService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn user_statistics(&self) -> Result<UserStatistics, Error> {
        let active_count = self
            .users
            .count(Some(RecordStatus::Active))
            .await
            .map_err(|err| map_record_error(User::KIND, err))?;
        let total_count = self
            .users
            .count(None)
            .await
            .map_err(|err| map_record_error(User::KIND, err))?;
        Ok(UserStatistics {
            active_count,
            total_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmailAddress, PasswordHash, UserId, UserName};
    use crate::test_support::InMemoryUserRepository;
    use rstest::rstest;

    fn user(email: &str, status: RecordStatus) -> User {
        User::new(
            UserId::random(),
            UserName::new("Someone").expect("name"),
            EmailAddress::new(email).expect("email"),
            PasswordHash::new("$argon2id$stub"),
            status,
        )
    }

    #[rstest]
    #[case(vec![], 0, 0)]
    #[case(vec![RecordStatus::Active, RecordStatus::Active, RecordStatus::Inactive], 2, 3)]
    #[case(vec![RecordStatus::Inactive], 0, 1)]
    #[tokio::test]
    async fn counts_active_and_total_users(
        #[case] statuses: Vec<RecordStatus>,
        #[case] active: u64,
        #[case] total: u64,
    ) {
        let users = statuses
            .into_iter()
            .enumerate()
            .map(|(index, status)| user(&format!("user{index}@x.com"), status))
            .collect();
        let service = ReportingService::new(Arc::new(InMemoryUserRepository::with_users(users)));

        let stats = service.user_statistics().await.expect("stats");
        assert_eq!(
            stats,
            UserStatistics {
                active_count: active,
                total_count: total,
            }
        );
    }
}
