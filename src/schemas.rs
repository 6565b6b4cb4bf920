use axum::{
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use common::ShelfStatistics;
use model::entities::book;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::auth::session::Principal;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
}

/// A page handed off to the external rendering collaborator: the template
/// it should render plus the data the template consumes. Serialized as the
/// response body; this crate deliberately does no HTML templating itself.
#[derive(Debug, Serialize)]
pub struct View<T> {
    pub template: &'static str,
    pub data: T,
}

impl<T: Serialize> IntoResponse for View<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Data for the home page; `user` is present when a session is active.
#[derive(Debug, Serialize)]
pub struct HomeData {
    pub user: Option<Principal>,
}

/// Data for the dashboard: the user's shelf sorted by rating plus the
/// computed aggregates.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub user: Principal,
    pub books: Vec<BookResponse>,
    pub stats: ShelfStatistics,
}

/// Book response model
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub date_read: Option<NaiveDate>,
    pub isbn: String,
    pub rating: Decimal,
    pub notes: Option<String>,
}

impl From<book::Model> for BookResponse {
    fn from(model: book::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            author: model.author,
            date_read: model.date_read,
            isbn: model.isbn,
            rating: model.rating,
            notes: model.notes,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}
