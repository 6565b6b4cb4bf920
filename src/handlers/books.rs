use axum::{extract::State, response::Redirect, Form};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use tracing::{info, instrument, warn};
use validator::{Validate, ValidationError};

use crate::auth::session::Principal;
use crate::error::AppError;
use crate::schemas::AppState;
use crate::store::{self, books::BookFields};

// The browser form posts `auther` for the author, `note` for the rating
// and `date` for the read date; those names are the wire contract, so the
// serde renames keep them while the code uses the real ones.

/// Request body for shelving a new book
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AddBookForm {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(rename = "auther")]
    #[validate(length(min = 1))]
    pub author: String,
    #[serde(rename = "date", default, deserialize_with = "empty_date_as_none")]
    pub date_read: Option<NaiveDate>,
    pub isbn: String,
    #[serde(rename = "note")]
    #[validate(custom(function = validate_rating))]
    pub rating: Decimal,
    #[serde(default, deserialize_with = "empty_text_as_none")]
    pub notes: Option<String>,
}

/// Request body for rewriting an existing book. Every writable field is
/// overwritten; id and ownership are not part of the form's power.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct EditBookForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(rename = "auther")]
    #[validate(length(min = 1))]
    pub author: String,
    #[serde(rename = "date", default, deserialize_with = "empty_date_as_none")]
    pub date_read: Option<NaiveDate>,
    pub isbn: String,
    #[serde(rename = "note")]
    #[validate(custom(function = validate_rating))]
    pub rating: Decimal,
    #[serde(default, deserialize_with = "empty_text_as_none")]
    pub notes: Option<String>,
}

/// Request body for removing a book
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteBookForm {
    pub id: i32,
}

impl AddBookForm {
    fn into_fields(self) -> BookFields {
        BookFields {
            title: self.title,
            author: self.author,
            date_read: self.date_read,
            isbn: self.isbn,
            rating: self.rating,
            notes: self.notes,
        }
    }
}

impl EditBookForm {
    fn into_fields(self) -> BookFields {
        BookFields {
            title: self.title,
            author: self.author,
            date_read: self.date_read,
            isbn: self.isbn,
            rating: self.rating,
            notes: self.notes,
        }
    }
}

#[instrument(skip_all, fields(user_id = user.id, title = %form.title))]
pub async fn add_book(
    State(state): State<AppState>,
    user: Principal,
    Form(form): Form<AddBookForm>,
) -> Result<Redirect, AppError> {
    if form.validate().is_err() {
        warn!("add-book form failed validation");
        return Ok(Redirect::to("/main"));
    }
    let book = store::books::insert(&state.db, user.id, form.into_fields()).await?;
    info!(book_id = book.id, "book shelved");
    Ok(Redirect::to("/main"))
}

#[instrument(skip_all, fields(user_id = user.id, book_id = form.id))]
pub async fn edit_book(
    State(state): State<AppState>,
    user: Principal,
    Form(form): Form<EditBookForm>,
) -> Result<Redirect, AppError> {
    if form.validate().is_err() {
        warn!("edit-book form failed validation");
        return Ok(Redirect::to("/main"));
    }
    let id = form.id;
    store::books::update_owned(&state.db, id, user.id, form.into_fields()).await?;
    info!(book_id = id, "book updated");
    Ok(Redirect::to("/main"))
}

#[instrument(skip_all, fields(user_id = user.id, book_id = form.id))]
pub async fn delete_book(
    State(state): State<AppState>,
    user: Principal,
    Form(form): Form<DeleteBookForm>,
) -> Result<Redirect, AppError> {
    store::books::delete_owned(&state.db, form.id, user.id).await?;
    info!(book_id = form.id, "book removed");
    Ok(Redirect::to("/main"))
}

fn validate_rating(rating: &Decimal) -> Result<(), ValidationError> {
    if *rating < Decimal::ZERO || *rating > Decimal::from(5) {
        return Err(ValidationError::new("rating_out_of_range"));
    }
    Ok(())
}

/// Browsers submit an untouched date input as an empty string; treat that
/// as absent rather than a parse failure.
fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Some)
            .map_err(de::Error::custom),
    }
}

fn empty_text_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|text| !text.trim().is_empty()))
}
