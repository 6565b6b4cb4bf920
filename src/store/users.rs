//! User persistence. All queries go through SeaORM's bound parameters;
//! nothing in this module concatenates SQL.

use model::entities::user;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::{debug, instrument};

use crate::error::{is_unique_violation, AppError};

/// Look up a user by email. Emails are matched exactly as stored.
#[instrument(skip(db))]
pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user::Model>, AppError> {
    let user = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?;
    Ok(user)
}

/// Insert a new user row.
///
/// Email uniqueness is decided by the database constraint, not a prior
/// existence check; two concurrent registrations for the same address
/// race safely and exactly one wins.
#[instrument(skip(db, password_hash))]
pub async fn create(
    db: &DatabaseConnection,
    email: String,
    username: String,
    password_hash: String,
) -> Result<user::Model, AppError> {
    let new_user = user::ActiveModel {
        email: Set(email),
        username: Set(username),
        password_hash: Set(password_hash),
        ..Default::default()
    };

    match new_user.insert(db).await {
        Ok(user_model) => {
            debug!(user_id = user_model.id, "user row created");
            Ok(user_model)
        }
        Err(err) if is_unique_violation(&err) => Err(AppError::Conflict(
            "an account with this email already exists".to_string(),
        )),
        Err(err) => Err(AppError::Storage(err)),
    }
}
