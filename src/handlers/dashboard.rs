use axum::extract::State;
use tracing::{debug, instrument};

use crate::auth::session::Principal;
use crate::error::AppError;
use crate::schemas::{AppState, BookResponse, DashboardData, View};
use crate::store;

/// The dashboard: the caller's shelf sorted by rating plus the computed
/// aggregates. The `Principal` extractor is the authentication gate;
/// requests without a live session never reach this function.
#[instrument(skip(state), fields(user_id = user.id))]
pub async fn dashboard(
    State(state): State<AppState>,
    user: Principal,
) -> Result<View<DashboardData>, AppError> {
    let books = store::books::list_for_user(&state.db, user.id).await?;
    let stats = compute::shelf_statistics(&books);
    debug!(total = stats.total_books, "dashboard assembled");

    let books = books.into_iter().map(BookResponse::from).collect();
    Ok(View {
        template: "main",
        data: DashboardData { user, books, stats },
    })
}
