//! Authentication service
//!
//! Handles registration, login, token refresh, logout and admin checks.
//! Every token pair belongs to a server-side session; refreshing rotates the
//! session and logging out revokes it.

use chrono::Utc;
use rewear_common::auth::{hash_password, validate_password_length, verify_password};
use rewear_common::AppError;
use rewear_core::entities::{NewUser, Session, User};
use rewear_core::{DomainError, UserId, ADMIN_BOOTSTRAP_POINTS};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Caller identity proven by a valid access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub session_id: String,
}

/// Profile received from a federated identity provider
#[derive(Debug, Clone)]
pub struct ExternalProfile {
    pub external_id: String,
    pub email: String,
    pub name: String,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_password_length(&request.password)?;

        let email = normalize_email(&request.email);
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;
        let user = self
            .ctx
            .user_repo()
            .create(&NewUser::with_password(
                request.name.trim().to_string(),
                email,
                password_hash,
            ))
            .await?;

        info!(user_id = %user.id, "User registered successfully");

        self.open_session(&user).await
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&normalize_email(&request.email))
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        // Accounts created through a federated login have no password
        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password set");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        info!(user_id = %user.id, "User logged in successfully");

        self.open_session(&user).await
    }

    /// Exchange a refresh token for a new token pair, rotating the session
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> ServiceResult<AuthResponse> {
        let claims = self.ctx.jwt_service().validate_refresh_token(refresh_token)?;
        let user_id = claims.user_id()?;

        let session = self
            .ctx
            .session_repo()
            .find_active(&claims.sid)
            .await?
            .filter(|s| s.user_id == user_id)
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        // Losing the race to another refresh of the same token counts as reuse
        if !self.ctx.session_repo().revoke(&session.id).await? {
            warn!(user_id = %user_id, "Refresh token reused");
            return Err(ServiceError::App(AppError::InvalidToken));
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        info!(user_id = %user.id, "Tokens refreshed successfully");

        self.open_session(&user).await
    }

    /// End the caller's session, or every session when `all` is set
    #[instrument(skip(self, identity), fields(user_id = %identity.user_id))]
    pub async fn logout(&self, identity: &Identity, all: bool) -> ServiceResult<()> {
        if all {
            let revoked = self
                .ctx
                .session_repo()
                .revoke_all_for_user(identity.user_id)
                .await?;
            info!(revoked, "User logged out of all sessions");
        } else {
            self.ctx.session_repo().revoke(&identity.session_id).await?;
            info!("User logged out");
        }
        Ok(())
    }

    /// Profile of the authenticated user
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: UserId) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(CurrentUserResponse::from(&user))
    }

    /// Verify an access token and check that its session is still active
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<Identity> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        let user_id = claims.user_id()?;

        let active = self
            .ctx
            .session_repo()
            .find_active(&claims.sid)
            .await?
            .is_some_and(|s| s.user_id == user_id);
        if !active {
            return Err(ServiceError::App(AppError::InvalidToken));
        }

        Ok(Identity {
            user_id,
            session_id: claims.sid,
        })
    }

    /// Sign in with a federated identity
    ///
    /// Looks the account up by external id, then links an existing account
    /// with the same email, and otherwise creates a new one.
    #[instrument(skip(self, profile), fields(external_id = %profile.external_id))]
    pub async fn login_with_external_identity(
        &self,
        profile: ExternalProfile,
    ) -> ServiceResult<AuthResponse> {
        let repo = self.ctx.user_repo();

        let user = if let Some(user) = repo.find_by_external_id(&profile.external_id).await? {
            user
        } else {
            let email = normalize_email(&profile.email);
            match repo.find_by_email(&email).await? {
                Some(existing) => {
                    info!(user_id = %existing.id, "Linking federated identity");
                    repo.link_external_id(existing.id, &profile.external_id)
                        .await?
                }
                None => {
                    let name = display_name(&profile.name, &email);
                    let user = repo
                        .create(&NewUser::with_external_id(
                            name,
                            email,
                            profile.external_id,
                        ))
                        .await?;
                    info!(user_id = %user.id, "User registered via federated identity");
                    user
                }
            }
        };

        self.open_session(&user).await
    }

    /// Make sure an admin account exists for `email`
    ///
    /// Creates it with the bootstrap balance, or promotes an existing account.
    #[instrument(skip(self, password))]
    pub async fn ensure_admin(&self, email: &str, password: &str, name: &str) -> ServiceResult<User> {
        let email = normalize_email(email);
        let repo = self.ctx.user_repo();

        if let Some(user) = repo.find_by_email(&email).await? {
            if user.is_admin {
                return Ok(user);
            }
            let user = repo.set_admin(user.id, true).await?;
            info!(user_id = %user.id, "Existing user promoted to admin");
            return Ok(user);
        }

        validate_password_length(password)?;
        let mut new_user = NewUser::with_password(name.to_string(), email, hash_password(password)?);
        new_user.points = ADMIN_BOOTSTRAP_POINTS;
        new_user.is_admin = true;

        let user = repo.create(&new_user).await?;
        info!(user_id = %user.id, "Admin account created");
        Ok(user)
    }

    /// Load the user and fail unless they are an admin
    #[instrument(skip(self))]
    pub async fn require_admin(&self, user_id: UserId) -> ServiceResult<User> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        if !user.is_admin {
            warn!(user_id = %user_id, "Admin access denied");
            return Err(DomainError::AdminRequired.into());
        }
        Ok(user)
    }

    async fn open_session(&self, user: &User) -> ServiceResult<AuthResponse> {
        let jwt = self.ctx.jwt_service();
        let session = Session::new(
            Uuid::new_v4().simple().to_string(),
            user.id,
            jwt.session_expires_at(Utc::now()),
        );
        self.ctx.session_repo().create(&session).await?;

        let tokens = jwt.generate_token_pair(user.id, &session.id)?;

        Ok(AuthResponse::new(
            tokens.access_token,
            tokens.refresh_token,
            tokens.expires_in,
            CurrentUserResponse::from(user),
        ))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Longest account name the users table holds
const MAX_NAME_LEN: usize = 100;

/// Fit a provider-supplied name into the bounds `register` enforces
///
/// Falls back to the local part of the email when the name is too short.
fn display_name(name: &str, email: &str) -> String {
    let name = name.trim();
    let name = if name.chars().count() >= 2 {
        name
    } else {
        email.split('@').next().unwrap_or(email)
    };
    name.chars().take(MAX_NAME_LEN).collect::<String>().trim_end().to_string()
}
