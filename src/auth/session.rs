use axum::{async_trait, extract::FromRequestParts, http::request::Parts, response::Redirect};
use model::entities::user;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::{debug, error};

use crate::error::AppError;

const PRINCIPAL_KEY: &str = "principal";

/// The identity stored in session state and carried through protected
/// handlers. Deliberately a subset of [`user::Model`]: the password hash
/// must never enter the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl From<&user::Model> for Principal {
    fn from(user: &user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// Associate the session with a freshly verified user.
///
/// Called after a successful credential check or a fresh registration
/// (auto-login). The session id is cycled first so a pre-login cookie can
/// never be promoted to an authenticated one.
pub async fn establish(session: &Session, user: &user::Model) -> Result<(), AppError> {
    session.cycle_id().await?;
    session.insert(PRINCIPAL_KEY, Principal::from(user)).await?;
    debug!(user_id = user.id, "session established");
    Ok(())
}

/// Resolve the identity bound to this request's session, if any.
pub async fn resolve(session: &Session) -> Result<Option<Principal>, AppError> {
    Ok(session.get::<Principal>(PRINCIPAL_KEY).await?)
}

/// Log the session out: drop the server-side record and clear the cookie.
///
/// A store failure surfaces to the caller; logout must never pretend to
/// have succeeded.
pub async fn terminate(session: &Session) -> Result<(), AppError> {
    session.flush().await?;
    Ok(())
}

/// The authentication gate for protected routes. Extraction succeeds only
/// for requests whose session resolves to an identity; everything else is
/// bounced to the login form, which is the contract for a browser-form
/// application rather than a 401.
#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, message)| {
                error!("session extraction failed: {message}");
                Redirect::to("/login")
            })?;

        match resolve(&session).await {
            Ok(Some(principal)) => Ok(principal),
            Ok(None) => Err(Redirect::to("/login")),
            Err(err) => {
                error!("session lookup failed: {err}");
                Err(Redirect::to("/login"))
            }
        }
    }
}
