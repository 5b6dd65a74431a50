use axum::{extract::State, response::IntoResponse, routing::get, Router};
use axum_extra::extract::CookieJar;

use crate::{
    extractors::IsHtmx,
    names,
    rejections::{AppError, ResultExt},
    views, AppState,
};

use crate::views::leaderboard as leaderboard_views;

pub fn routes() -> Router<AppState> {
    Router::new().route("/leaderboard", get(leaderboard_page))
}

/// The leaderboard is public; the header just shows the viewer's name when a
/// valid session cookie is present.
async fn leaderboard_page(
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    jar: CookieJar,
) -> Result<axum::response::Response, AppError> {
    let username = match jar
        .get(names::USER_SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
    {
        Some(session_id) => state
            .db
            .get_user_by_session(&session_id)
            .await
            .unwrap_or(None)
            .map(|user| user.username),
        None => None,
    };

    let entries = state
        .db
        .leaderboard(names::LEADERBOARD_SIZE)
        .await
        .reject("could not get leaderboard")?;

    Ok(views::render(
        is_htmx,
        "Leaderboard",
        leaderboard_views::leaderboard(&entries),
        username.as_deref(),
    )
    .into_response())
}
