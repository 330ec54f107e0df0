//! Browser sessions.
//!
//! The browser never holds the upstream JWT. Logging in trades credentials
//! for an [`AuthSession`] kept in the [`SessionStore`]; the browser gets the
//! session id and presents it as `Authorization: Bearer <id>`.

pub mod claims;
pub mod extract;
pub mod store;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{LoginRequest, UserDetails};
use crate::upstream::{Backend, UpstreamError};
use crate::utils::{AppError, AppResult};

pub use extract::CurrentSession;
pub use store::SessionStore;

#[derive(Clone)]
pub struct AuthSession {
    pub id: Uuid,
    pub token: String,
    pub user: UserDetails,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// Expiry follows the token's own `exp` claim when it has one, else `ttl`.
    pub fn open(token: String, user: UserDetails, now: DateTime<Utc>, ttl: chrono::Duration) -> Self {
        let expires_at = claims::token_expiry(&token).unwrap_or(now + ttl);
        Self {
            id: Uuid::new_v4(),
            token,
            user,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            session_id: self.id,
            expires_at: self.expires_at,
            redirect: self.user.role.dashboard_path(),
            user: &self.user,
        }
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("id", &self.id)
            .field("token", &"<redacted>")
            .field("user", &self.user.email)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// What the browser learns about its session. The token stays server-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView<'a> {
    pub session_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub redirect: &'static str,
    pub user: &'a UserDetails,
}

/// Exchanges credentials for a stored session.
pub async fn login(
    backend: &dyn Backend,
    store: &SessionStore,
    ttl: chrono::Duration,
    credentials: &LoginRequest,
    now: DateTime<Utc>,
) -> AppResult<AuthSession> {
    let token = backend
        .login(credentials)
        .await
        .map_err(|err| match err {
            UpstreamError::Unauthorized => AppError::AuthError("Invalid email or password.".to_string()),
            UpstreamError::Rejected(message) => AppError::AuthError(message),
            other => AppError::from(other),
        })?
        .access_token;

    let user = backend.user_details(&token).await?;
    let session = AuthSession::open(token, user, now, ttl);
    if session.is_expired(now) {
        return Err(AppError::AuthError("Login token has already expired.".to_string()));
    }

    tracing::info!(session = %session.id, role = ?session.user.role, "Session opened");
    store.insert(session.clone()).await;
    Ok(session)
}

/// Revalidates the session's token upstream and refreshes the cached user.
/// A token the upstream no longer accepts ends the session.
pub async fn refresh(backend: &dyn Backend, store: &SessionStore, session: &AuthSession) -> AppResult<AuthSession> {
    match backend.user_details(&session.token).await {
        Ok(user) => store
            .update(session.id, |stored| stored.user = user)
            .await
            .ok_or_else(|| AppError::AuthError("Session has ended.".to_string())),
        Err(UpstreamError::Unauthorized) => {
            store.remove(session.id).await;
            tracing::info!(session = %session.id, "Session closed after upstream rejected its token");
            Err(AppError::AuthError(
                "Your session is no longer valid. Please log in again.".to_string(),
            ))
        }
        Err(other) => Err(other.into()),
    }
}

/// Ends a session. Returns false if it was already gone.
pub async fn logout(store: &SessionStore, id: Uuid) -> bool {
    let removed = store.remove(id).await.is_some();
    if removed {
        tracing::info!(session = %id, "Session closed");
    }
    removed
}
