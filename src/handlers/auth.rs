use axum::{extract::State, response::Redirect, Form};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::auth::{password, session};
use crate::error::AppError;
use crate::schemas::AppState;
use crate::store;

/// Request body for the login form
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request body for the registration form
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct RegisterForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub username: String,
}

/// Log a user in: verify the password, then establish the session, then
/// redirect, strictly in that order. Every failure path lands back on the
/// login form with no detail about what went wrong.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    if form.validate().is_err() {
        warn!("login form failed validation");
        return Ok(Redirect::to("/login"));
    }

    let Some(user) = store::users::find_by_email(&state.db, &form.email).await? else {
        warn!("login attempt for unknown email");
        return Err(AppError::Auth);
    };

    let valid = password::verify(form.password, user.password_hash.clone()).await?;
    if !valid {
        warn!(user_id = user.id, "login attempt with wrong password");
        return Err(AppError::Auth);
    }

    session::establish(&session, &user).await?;
    info!(user_id = user.id, "user logged in");
    Ok(Redirect::to("/main"))
}

/// Register a new user and log them straight in.
///
/// The duplicate-email case is decided by the database unique constraint;
/// when it fires the browser is sent to the login form, matching the
/// established UX for an address that already has an account.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect, AppError> {
    if form.validate().is_err() {
        warn!("registration form failed validation");
        return Ok(Redirect::to("/register"));
    }

    let digest = password::hash(form.password).await?;

    let user = match store::users::create(&state.db, form.email, form.username, digest).await {
        Ok(user) => user,
        Err(AppError::Conflict(_)) => {
            info!("registration with an email that already has an account");
            return Ok(Redirect::to("/login"));
        }
        Err(err) => return Err(err),
    };

    session::establish(&session, &user).await?;
    info!(user_id = user.id, "user registered and logged in");
    Ok(Redirect::to("/main"))
}

/// End the session and go home. Works as a no-op for visitors without a
/// session; a session-store failure propagates instead of redirecting.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    session::terminate(&session).await?;
    info!("session terminated");
    Ok(Redirect::to("/"))
}
