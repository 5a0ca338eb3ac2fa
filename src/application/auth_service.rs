use std::sync::Arc;

use tracing::{info, instrument};

use crate::data::user_repository::UserRepository;
use crate::domain::error::{DomainError, FieldError};
use crate::domain::user::{NewUser, User, UserRole};
use crate::infrastructure::security::{SessionKeys, hash_password, verify_password};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    keys: SessionKeys,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, keys: SessionKeys) -> Self {
        Self { users, keys }
    }

    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    /// Creates an account and logs it in. The very first account becomes
    /// the administrator; everyone after it is a regular user.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<(User, String), DomainError> {
        validate_registration(email, password, name)?;

        let hash = hash_password(password).map_err(|e| DomainError::Internal(e.to_string()))?;
        let role = if self.users.count().await? == 0 {
            UserRole::Admin
        } else {
            UserRole::User
        };
        let user = self
            .users
            .create(NewUser {
                email: email.trim().to_lowercase(),
                password_hash: hash,
                name: name.trim().to_string(),
                role,
            })
            .await?;

        info!(user_id = user.id, email = %user.email, "user registered");

        let token = self.session_token(&user)?;
        Ok((user, token))
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), DomainError> {
        let user = self
            .users
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or(DomainError::UnknownEmail)?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !valid {
            return Err(DomainError::BadPassword);
        }

        info!(user_id = user.id, "user logged in");

        let token = self.session_token(&user)?;
        Ok((user, token))
    }

    /// Resolves a session token back to its user. Any failure along the
    /// way (bad signature, expiry, vanished user) reads as "not logged in".
    pub async fn resolve(&self, token: &str) -> Result<User, DomainError> {
        let claims = self
            .keys
            .verify(token)
            .map_err(|_| DomainError::Unauthenticated)?;
        self.users
            .find_by_id(claims.sub)
            .await?
            .ok_or(DomainError::Unauthenticated)
    }

    fn session_token(&self, user: &User) -> Result<String, DomainError> {
        self.keys
            .issue(user.id)
            .map_err(|e| DomainError::Internal(e.to_string()))
    }
}

fn validate_registration(email: &str, password: &str, name: &str) -> Result<(), DomainError> {
    let mut fields = Vec::new();
    if email.trim().is_empty() {
        fields.push(FieldError::new("email", "must not be empty"));
    }
    if password.is_empty() {
        fields.push(FieldError::new("password", "must not be empty"));
    }
    if name.trim().is_empty() {
        fields.push(FieldError::new("name", "must not be empty"));
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(fields))
    }
}
