//! Session lookup, permission checks and anti-forgery tokens.
//!
//! Sessions are provisioned up front from the data directory; this module
//! only validates them. A request names its session with the `session_id`
//! cookie or, failing that, the `X-Session-Id` header.

use std::collections::HashMap;

use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::config::{Permission, SessionGrant};
use crate::error::{EngineError, EngineResult};

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "session_id";

/// Header carrying the session id when no cookie is sent.
pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Debug, Clone)]
struct SessionEntry {
    grant: SessionGrant,
    csrf_token: Option<String>,
}

/// The known sessions and the anti-forgery token issued to each.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl SessionRegistry {
    /// Builds a registry from provisioned grants.
    pub fn new(grants: impl IntoIterator<Item = SessionGrant>) -> Self {
        let sessions = grants
            .into_iter()
            .map(|grant| {
                (
                    grant.session_id.clone(),
                    SessionEntry {
                        grant,
                        csrf_token: None,
                    },
                )
            })
            .collect();
        Self {
            sessions: RwLock::new(sessions),
        }
    }

    /// Number of registered sessions, expired ones included.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Returns true when no sessions are registered.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Checks that a session exists, is live at `now`, and holds `permission`.
    ///
    /// # Errors
    ///
    /// [`EngineError::Unauthenticated`] for a missing, unknown or expired
    /// session; [`EngineError::PermissionDenied`] when the permission is absent.
    pub fn authorize(
        &self,
        session_id: Option<&str>,
        permission: Permission,
        now: DateTime<Utc>,
    ) -> EngineResult<SessionGrant> {
        let session_id = session_id.ok_or(EngineError::Unauthenticated)?;
        let sessions = self.sessions.read();
        let entry = sessions
            .get(session_id)
            .ok_or(EngineError::Unauthenticated)?;

        if entry.grant.expires_at.is_some_and(|expiry| expiry <= now) {
            return Err(EngineError::Unauthenticated);
        }
        if !entry.grant.permissions.contains(&permission) {
            return Err(EngineError::PermissionDenied {
                permission: permission.as_str().to_string(),
            });
        }
        Ok(entry.grant.clone())
    }

    /// Returns the session's anti-forgery token, issuing one on first use.
    pub fn issue_csrf_token(&self, session_id: &str) -> EngineResult<String> {
        let mut sessions = self.sessions.write();
        let entry = sessions
            .get_mut(session_id)
            .ok_or(EngineError::Unauthenticated)?;
        let token = entry
            .csrf_token
            .get_or_insert_with(|| Uuid::new_v4().simple().to_string());
        Ok(token.clone())
    }

    /// Checks a submitted token against the one issued to the session.
    ///
    /// A session that was never issued a token rejects every submission.
    pub fn verify_csrf_token(&self, session_id: &str, submitted: &str) -> EngineResult<()> {
        let sessions = self.sessions.read();
        let issued = sessions
            .get(session_id)
            .and_then(|entry| entry.csrf_token.as_deref());
        match issued {
            Some(token) if !submitted.is_empty() && token == submitted => Ok(()),
            _ => Err(EngineError::InvalidCsrfToken),
        }
    }
}

/// Extracts the session id from the cookie jar, then the header.
pub fn session_id_from(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            headers
                .get(SESSION_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        })
        .filter(|id| !id.is_empty())
}
