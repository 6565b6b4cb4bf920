//! Book persistence. Mutations take the caller's identity and verify
//! ownership before touching a row; the web layer cannot reach a book it
//! does not own through this module.

use chrono::NaiveDate;
use model::entities::book;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{debug, instrument};

use crate::error::{is_unique_violation, AppError};

/// The full writable field set of a book. Edits overwrite all of these;
/// `id` and ownership are never writable.
#[derive(Debug, Clone)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub date_read: Option<NaiveDate>,
    pub isbn: String,
    pub rating: Decimal,
    pub notes: Option<String>,
}

/// A user's shelf, best-rated first.
#[instrument(skip(db))]
pub async fn list_for_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<book::Model>, AppError> {
    let books = book::Entity::find()
        .filter(book::Column::UserId.eq(user_id))
        .order_by_desc(book::Column::Rating)
        .all(db)
        .await?;
    Ok(books)
}

#[instrument(skip(db))]
pub async fn find_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<book::Model>, AppError> {
    let book = book::Entity::find_by_id(id).one(db).await?;
    Ok(book)
}

/// Shelve a new book for `user_id`.
///
/// The per-shelf title uniqueness is enforced by the database index; a
/// duplicate submission maps to `Conflict` rather than being pre-checked.
#[instrument(skip(db, fields), fields(title = %fields.title))]
pub async fn insert(
    db: &DatabaseConnection,
    user_id: i32,
    fields: BookFields,
) -> Result<book::Model, AppError> {
    let new_book = book::ActiveModel {
        user_id: Set(user_id),
        title: Set(fields.title),
        author: Set(fields.author),
        date_read: Set(fields.date_read),
        isbn: Set(fields.isbn),
        rating: Set(fields.rating),
        notes: Set(fields.notes),
        ..Default::default()
    };

    match new_book.insert(db).await {
        Ok(book_model) => {
            debug!(book_id = book_model.id, "book row created");
            Ok(book_model)
        }
        Err(err) if is_unique_violation(&err) => Err(AppError::Conflict(
            "this book is already on your shelf".to_string(),
        )),
        Err(err) => Err(AppError::Storage(err)),
    }
}

/// Overwrite every writable field of a book the caller owns.
///
/// Fails with `NotFound` for a missing id and `Forbidden` when the row
/// belongs to someone else, leaving it untouched either way.
#[instrument(skip(db, fields))]
pub async fn update_owned(
    db: &DatabaseConnection,
    id: i32,
    owner_id: i32,
    fields: BookFields,
) -> Result<book::Model, AppError> {
    let existing = find_by_id(db, id).await?.ok_or(AppError::NotFound)?;
    if existing.user_id != owner_id {
        return Err(AppError::Forbidden);
    }

    let mut active: book::ActiveModel = existing.into();
    active.title = Set(fields.title);
    active.author = Set(fields.author);
    active.date_read = Set(fields.date_read);
    active.isbn = Set(fields.isbn);
    active.rating = Set(fields.rating);
    active.notes = Set(fields.notes);

    match active.update(db).await {
        Ok(book_model) => Ok(book_model),
        Err(err) if is_unique_violation(&err) => Err(AppError::Conflict(
            "this book is already on your shelf".to_string(),
        )),
        Err(err) => Err(AppError::Storage(err)),
    }
}

/// Remove a book the caller owns. Same ownership contract as
/// [`update_owned`].
#[instrument(skip(db))]
pub async fn delete_owned(
    db: &DatabaseConnection,
    id: i32,
    owner_id: i32,
) -> Result<(), AppError> {
    let existing = find_by_id(db, id).await?.ok_or(AppError::NotFound)?;
    if existing.user_id != owner_id {
        return Err(AppError::Forbidden);
    }

    existing.delete(db).await?;
    debug!(book_id = id, "book row deleted");
    Ok(())
}
