//! User account service: registration, authentication and admin CRUD.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    PasswordHashError, PasswordHasher, RecordPersistenceError, UserLoader, UserRepository,
};
use crate::domain::record_service::{RecordService, map_record_error};
use crate::domain::{
    Error, ErrorCode, LoginCredentials, PasswordHash, Record, Registration, TraceId, User,
    UserChanges, UserId, VerifiedUser,
};

/// Message returned for any failed login, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Login Unsuccessful. Please check email and password.";
/// Message returned when an email is already registered.
pub const EMAIL_TAKEN_MESSAGE: &str = "An account with this email already exists.";

fn email_taken() -> Error {
    Error::conflict(EMAIL_TAKEN_MESSAGE)
        .with_details(json!({ "field": "email", "code": "email_taken" }))
}

fn invalid_credentials() -> Error {
    Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)
}

/// Account lifecycle over a [`UserRepository`] and a [`PasswordHasher`].
#[derive(Clone)]
pub struct UserAccountService {
    users: Arc<dyn UserRepository>,
    records: RecordService<User, dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserAccountService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            records: RecordService::new(Arc::clone(&users)),
            users,
            hasher,
        }
    }

    /// Create an active account for a new email address.
    ///
    /// Fails with `Conflict` when the email is taken. The password is hashed
    /// before anything is stored.
    pub async fn register(&self, registration: &Registration) -> Result<VerifiedUser, Error> {
        let existing = self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(|err| map_record_error(User::KIND, err))?;
        if existing.is_some() {
            debug!("registration rejected: email already registered");
            return Err(email_taken());
        }

        let password_hash = self.hash_password(registration.password()).await?;
        let user = User::register(
            registration.name().clone(),
            registration.email().clone(),
            password_hash,
        );
        self.users.insert(&user).await.map_err(|err| match err {
            RecordPersistenceError::Conflict { .. } => email_taken(),
            other => map_record_error(User::KIND, other),
        })?;
        info!(user_id = %user.id(), "user registered");
        Ok(VerifiedUser::new(user))
    }

    /// Verify a login attempt.
    ///
    /// Unknown emails and wrong passwords produce the same error.
    pub async fn authenticate(&self, credentials: &LoginCredentials) -> Result<VerifiedUser, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(|err| map_record_error(User::KIND, err))?
        else {
            debug!("login rejected: unknown email");
            return Err(invalid_credentials());
        };

        let verified = self
            .verify_password(credentials.password(), user.password_hash())
            .await?;
        if !verified {
            debug!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(invalid_credentials());
        }
        Ok(VerifiedUser::new(user))
    }

    pub async fn list(&self) -> Result<Vec<User>, Error> {
        self.records.list().await
    }

    pub async fn get(&self, id: &UserId) -> Result<User, Error> {
        self.records.get(id).await
    }

    /// Overwrite supplied fields; a taken email is a `Conflict`.
    pub async fn update(&self, id: &UserId, changes: &UserChanges) -> Result<User, Error> {
        self.records.update(id, changes).await.map_err(|err| {
            if err.code() == ErrorCode::Conflict {
                email_taken()
            } else {
                err
            }
        })
    }

    /// Remove an account or fail with `NotFound`.
    pub async fn delete(&self, id: &UserId) -> Result<(), Error> {
        let removed = self
            .users
            .delete(id)
            .await
            .map_err(|err| map_record_error(User::KIND, err))?;
        if removed {
            info!(user_id = %id, "user deleted");
            Ok(())
        } else {
            Err(Error::not_found(format!("user {id} not found")))
        }
    }

    async fn hash_password(&self, password: &str) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = zeroize::Zeroizing::new(password.to_owned());
        run_blocking(move || hasher.hash(&password))
            .await?
            .map_err(|err: PasswordHashError| Error::internal(err.to_string()))
    }

    async fn verify_password(&self, password: &str, hash: &PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = zeroize::Zeroizing::new(password.to_owned());
        let hash = hash.clone();
        run_blocking(move || hasher.verify(&password, &hash)).await
    }
}

/// Run CPU-bound work on the blocking pool, keeping the trace id in scope.
async fn run_blocking<F, T>(work: F) -> Result<T, Error>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(move || match trace_id {
        Some(id) => TraceId::sync_scope(id, work),
        None => work(),
    })
    .await
    .map_err(|err| Error::internal(format!("password task failed: {err}")))
}

#[async_trait]
impl UserLoader for UserAccountService {
    async fn load_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(|err| map_record_error(User::KIND, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockPasswordHasher;
    use crate::domain::{EmailAddress, RecordStatus, UserName};
    use crate::test_support::{InMemoryUserRepository, fast_password_hasher};
    use rstest::{fixture, rstest};

    struct Harness {
        service: UserAccountService,
        repo: Arc<InMemoryUserRepository>,
    }

    #[fixture]
    fn harness() -> Harness {
        let repo = Arc::new(InMemoryUserRepository::default());
        let service = UserAccountService::new(repo.clone(), Arc::new(fast_password_hasher()));
        Harness { service, repo }
    }

    fn registration(name: &str, email: &str, password: &str) -> Registration {
        Registration::try_from_parts(name, email, password).expect("valid registration")
    }

    fn login(email: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(email, password).expect("valid credentials")
    }

    #[rstest]
    #[tokio::test]
    async fn register_then_authenticate_yields_same_user(harness: Harness) {
        let registered = harness
            .service
            .register(&registration("Ann", "ann@x.com", "p1"))
            .await
            .expect("register");
        assert_eq!(registered.user().status(), RecordStatus::Active);

        let authenticated = harness
            .service
            .authenticate(&login("ann@x.com", "p1"))
            .await
            .expect("authenticate");
        assert_eq!(authenticated.user().id(), registered.user().id());
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_conflicts_without_new_row(harness: Harness) {
        harness
            .service
            .register(&registration("Ann", "ann@x.com", "p1"))
            .await
            .expect("first registration");

        let err = harness
            .service
            .register(&registration("Ann2", "ANN@x.com", "p2"))
            .await
            .expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(harness.repo.len(), 1);
    }

    #[rstest]
    #[case("ann@x.com", "wrong")]
    #[case("bob@x.com", "p1")]
    #[tokio::test]
    async fn bad_credentials_share_one_generic_error(
        harness: Harness,
        #[case] email: &str,
        #[case] password: &str,
    ) {
        harness
            .service
            .register(&registration("Ann", "ann@x.com", "p1"))
            .await
            .expect("register");

        let err = harness
            .service
            .authenticate(&login(email, password))
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn stored_hash_never_contains_plaintext(harness: Harness) {
        let password = "correct horse battery staple";
        let user = harness
            .service
            .register(&registration("Ann", "ann@x.com", password))
            .await
            .expect("register")
            .into_user();
        let stored = harness.service.get(user.id()).await.expect("get");
        assert!(!stored.password_hash().as_str().contains(password));
        assert!(stored.password_hash().as_str().starts_with("$argon2id$"));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_row_and_second_delete_is_not_found(harness: Harness) {
        let user = harness
            .service
            .register(&registration("Ann", "ann@x.com", "p1"))
            .await
            .expect("register")
            .into_user();

        harness.service.delete(user.id()).await.expect("delete");
        let get_err = harness.service.get(user.id()).await.expect_err("gone");
        assert_eq!(get_err.code(), ErrorCode::NotFound);
        let delete_err = harness.service.delete(user.id()).await.expect_err("gone");
        assert_eq!(delete_err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn changing_email_to_a_taken_one_conflicts(harness: Harness) {
        harness
            .service
            .register(&registration("Ann", "ann@x.com", "p1"))
            .await
            .expect("register ann");
        let bob = harness
            .service
            .register(&registration("Bob", "bob@x.com", "p2"))
            .await
            .expect("register bob")
            .into_user();

        let changes = UserChanges {
            email: Some(EmailAddress::new("ann@x.com").expect("email")),
            ..UserChanges::default()
        };
        let err = harness
            .service
            .update(bob.id(), &changes)
            .await
            .expect_err("taken");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn update_then_get_reflects_change(harness: Harness) {
        let user = harness
            .service
            .register(&registration("Ann", "ann@x.com", "p1"))
            .await
            .expect("register")
            .into_user();
        let changes = UserChanges {
            name: Some(UserName::new("Annie").expect("name")),
            ..UserChanges::default()
        };

        harness.service.update(user.id(), &changes).await.expect("update");
        let fetched = harness.service.get(user.id()).await.expect("get");
        assert_eq!(fetched.name().as_ref(), "Annie");
        assert_eq!(fetched.email(), user.email());
        assert_eq!(fetched.status(), user.status());
    }

    #[tokio::test]
    async fn hashing_failure_is_internal_and_stores_nothing() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .times(1)
            .returning(|_| Err(PasswordHashError::hashing("params rejected")));
        let service = UserAccountService::new(repo.clone(), Arc::new(hasher));

        let err = service
            .register(&registration("Ann", "ann@x.com", "p1"))
            .await
            .expect_err("hash failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(repo.len(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn loader_reports_deleted_users_as_absent(harness: Harness) {
        let user = harness
            .service
            .register(&registration("Ann", "ann@x.com", "p1"))
            .await
            .expect("register")
            .into_user();
        assert!(harness.service.load_user(user.id()).await.expect("load").is_some());

        harness.service.delete(user.id()).await.expect("delete");
        assert!(harness.service.load_user(user.id()).await.expect("load").is_none());
    }
}
