use chrono::{DateTime, Utc};
use logger_redacted::redact;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::IdentityConfig;
use crate::error::{IdentityError, Result};
use crate::models::{LoginOutcome, NewAccount, UserAccount};
use crate::password::{verify_password, PasswordScheme};
use crate::repository::UserRepository;
use crate::role::Role;
use crate::token::TokenService;

pub struct IdentityService {
    user_repo: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
    password_scheme: PasswordScheme,
    // Verified against when the email is unknown so every login costs one hash check
    dummy_hash: OnceCell<String>,
}

const DUMMY_PASSWORD: &str = "no-such-account";

impl IdentityService {
    pub fn new(user_repo: Arc<dyn UserRepository>, config: &IdentityConfig) -> Self {
        Self {
            user_repo,
            tokens: Arc::new(TokenService::new(
                &config.jwt_secret,
                config.issuer.clone(),
                config.token_ttl_hours,
            )),
            password_scheme: config.password_scheme,
            dummy_hash: OnceCell::new(),
        }
    }

    pub fn token_service(&self) -> Arc<TokenService> {
        Arc::clone(&self.tokens)
    }

    /// Create an account with a freshly hashed password
    ///
    /// # Errors
    ///
    /// [`IdentityError::InvalidEmail`], [`IdentityError::EmptyPassword`] or
    /// [`IdentityError::UserAlreadyExists`] for bad input; storage and hashing
    /// failures are passed through.
    pub async fn register_user(&self, account: NewAccount) -> Result<UserAccount> {
        let NewAccount { email, password, role } = account;
        let email = email.trim().to_string();
        if !is_valid_email(&email) {
            return Err(IdentityError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(IdentityError::EmptyPassword);
        }

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(IdentityError::UserAlreadyExists);
        }

        let user = UserAccount {
            id: Uuid::new_v4(),
            email,
            password_hash: hash_password(self.password_scheme, password).await?,
            role,
            is_active: true,
            created_at: Utc::now(),
            last_login: None,
        };

        let created = self.user_repo.create_user(&user).await?;
        info!(email = %redact(&created.email), role = %created.role, "Account created");
        Ok(created)
    }

    /// Exchange credentials for a signed token
    ///
    /// The password is checked before the account state so a disabled account
    /// is only reported to someone who knows its password.
    ///
    /// # Errors
    ///
    /// [`IdentityError::InvalidCredentials`] for an unknown email or wrong
    /// password and [`IdentityError::AccountDisabled`] for inactive accounts.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        let Some(user) = self.user_repo.find_by_email(email.trim()).await? else {
            let dummy = self
                .dummy_hash
                .get_or_try_init(|| hash_password(self.password_scheme, DUMMY_PASSWORD.to_string()))
                .await?;
            check_password(password, dummy).await?;
            warn!(email = %redact(email), "Login failed: unknown account");
            return Err(IdentityError::InvalidCredentials);
        };

        if !check_password(password, &user.password_hash).await? {
            warn!(email = %redact(email), "Login failed: wrong password");
            return Err(IdentityError::InvalidCredentials);
        }

        if !user.is_active {
            warn!(email = %redact(email), "Login failed: account disabled");
            return Err(IdentityError::AccountDisabled);
        }

        let now = Utc::now();
        self.user_repo.update_last_login(user.id, now).await?;

        let issued = self.tokens.issue(&user.email, user.role)?;
        let expires_at = DateTime::<Utc>::from_timestamp(issued.claims.exp, 0).unwrap_or(now);

        info!(email = %redact(&user.email), role = %user.role, "Login succeeded");

        Ok(LoginOutcome {
            email: user.email,
            role: user.role,
            token: issued.token,
            expires_at,
        })
    }

    /// Delete the account for `email` if it holds `role`.
    /// Returns whether an account was removed.
    ///
    /// # Errors
    ///
    /// Storage failures are passed through.
    pub async fn remove_account(&self, email: &str, role: Role) -> Result<bool> {
        match self.user_repo.find_by_email(email.trim()).await? {
            Some(user) if user.role == role => {
                let removed = self.user_repo.delete_user(user.id).await?;
                if removed {
                    info!(email = %redact(&user.email), role = %role, "Account removed");
                }
                Ok(removed)
            }
            _ => Ok(false),
        }
    }

    /// Create the configured admin account unless the email is already taken.
    /// Returns whether an account was created.
    ///
    /// # Errors
    ///
    /// Propagates registration failures other than an existing account.
    pub async fn ensure_bootstrap_admin(&self, email: &str, password: &SecretString) -> Result<bool> {
        if self.user_repo.find_by_email(email.trim()).await?.is_some() {
            return Ok(false);
        }

        match self
            .register_user(NewAccount {
                email: email.to_string(),
                password: password.expose_secret().clone(),
                role: Role::Admin,
            })
            .await
        {
            Ok(_) => Ok(true),
            Err(IdentityError::UserAlreadyExists) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl std::fmt::Debug for IdentityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityService")
            .field("tokens", &self.tokens)
            .field("password_scheme", &self.password_scheme)
            .finish_non_exhaustive()
    }
}

async fn hash_password(scheme: PasswordScheme, password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || scheme.hash(&password))
        .await
        .map_err(|e| IdentityError::HashingError(format!("password hashing task failed: {e}")))?
}

async fn check_password(password: &str, stored_hash: &str) -> Result<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| IdentityError::HashingError(format!("password check task failed: {e}")))?
}

/// Shape check shared by account registration and request validation
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}
