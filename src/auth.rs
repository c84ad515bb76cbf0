// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Auth session handle.
//!
//! Authentication itself happens before any of these flows run; this module
//! only carries the already-established identity. An empty session is the
//! `Unauthenticated` condition for profile operations.

use crate::error::SyncError;
use crate::models::UserProfile;

/// Identity supplied by the authentication provider.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// Opaque, stable user id
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl SessionUser {
    /// Snapshot the session identity into a profile document, stamping the
    /// sign-in time.
    pub fn profile(&self, last_login_millis: i64) -> UserProfile {
        UserProfile {
            user_id: self.user_id.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            avatar_url: self.avatar_url.clone(),
            last_login_millis,
        }
    }
}

/// The current session: either an authenticated user or nobody.
#[derive(Debug, Clone)]
pub struct AuthSession {
    user: Option<SessionUser>,
}

impl AuthSession {
    pub fn authenticated(user: SessionUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// Read the session identity from the environment.
    ///
    /// `SESSION_USER_ID` must be non-empty for the session to count as
    /// authenticated; the remaining fields may be absent.
    pub fn from_env() -> Self {
        match std::env::var("SESSION_USER_ID") {
            Ok(user_id) if !user_id.trim().is_empty() => Self::authenticated(SessionUser {
                user_id: user_id.trim().to_string(),
                email: std::env::var("SESSION_EMAIL").unwrap_or_default(),
                display_name: std::env::var("SESSION_DISPLAY_NAME").unwrap_or_default(),
                avatar_url: std::env::var("SESSION_AVATAR_URL")
                    .ok()
                    .filter(|v| !v.is_empty()),
            }),
            _ => Self::anonymous(),
        }
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// The session identity, or `Unauthenticated` when none is present.
    pub fn require_user(&self) -> Result<&SessionUser, SyncError> {
        self.user.as_ref().ok_or(SyncError::Unauthenticated)
    }
}
