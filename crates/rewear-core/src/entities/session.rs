//! Session entity - a server-side refresh session

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// Refresh session backing a pair of issued tokens
///
/// Access tokens carry the session id; revoking the session invalidates them
/// before they expire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(id: String, user_id: UserId, expires_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            expires_at,
            created_at: Utc::now(),
            revoked_at: None,
        }
    }

    /// Not revoked and not yet expired at `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }
}
