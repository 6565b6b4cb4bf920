use tower_sessions::Session;
use tracing::instrument;

use crate::auth::session;
use crate::error::AppError;
use crate::schemas::{HomeData, View};

/// Home page, shown to everyone; the view learns whether someone is
/// logged in so it can swap its navigation.
#[instrument(skip(session))]
pub async fn home(session: Session) -> Result<View<HomeData>, AppError> {
    let user = session::resolve(&session).await?;
    Ok(View {
        template: "home",
        data: HomeData { user },
    })
}

pub async fn login_page() -> View<()> {
    View {
        template: "login",
        data: (),
    }
}

pub async fn register_page() -> View<()> {
    View {
        template: "register",
        data: (),
    }
}
