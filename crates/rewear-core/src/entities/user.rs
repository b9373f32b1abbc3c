//! User entity - a marketplace member with a points balance

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::UserId;

/// Starting balance for every new account
pub const DEFAULT_POINTS: i32 = 100;

/// Starting balance for the bootstrap admin account
pub const ADMIN_BOOTSTRAP_POINTS: i32 = 1000;

/// User account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub points: i32,
    pub is_admin: bool,
    /// Identifier at the federated identity provider, if linked
    pub external_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new regular user with the default balance
    pub fn new(id: UserId, name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            points: DEFAULT_POINTS,
            is_admin: false,
            external_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the balance covers `amount`
    #[inline]
    pub fn can_afford(&self, amount: i32) -> bool {
        self.points >= amount
    }

    /// Public name tag used in listings and leaderboards
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Fields required to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// None for accounts that only sign in through a federated identity
    pub password_hash: Option<String>,
    pub external_id: Option<String>,
    pub points: i32,
    pub is_admin: bool,
}

impl NewUser {
    /// A password-based account with the default balance
    pub fn with_password(name: String, email: String, password_hash: String) -> Self {
        Self {
            name,
            email,
            password_hash: Some(password_hash),
            external_id: None,
            points: DEFAULT_POINTS,
            is_admin: false,
        }
    }

    /// A federated account with the default balance
    pub fn with_external_id(name: String, email: String, external_id: String) -> Self {
        Self {
            name,
            email,
            password_hash: None,
            external_id: Some(external_id),
            points: DEFAULT_POINTS,
            is_admin: false,
        }
    }
}

/// Minimal public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
}
