use axum::{
    extract::{Form, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::{
    db::AuthUser,
    extractors::{AuthGuard, IsHtmx},
    rejections::{AppError, ResultExt},
    views, AppState,
};

use crate::views::profile as profile_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile_page))
        .route("/change-password", post(change_password_post))
}

async fn profile_body(
    state: &AppState,
    user: &AuthUser,
    pw_state: profile_views::ChangePasswordState,
) -> Result<maud::Markup, AppError> {
    let scores = state
        .db
        .user_scores(user.id)
        .await
        .reject("could not get scores")?;

    let games = state
        .db
        .games_for_user(user.id)
        .await
        .reject("could not get games")?;

    Ok(profile_views::profile(
        profile_views::ProfileData {
            user,
            scores: &scores,
            games: &games,
        },
        pw_state,
    ))
}

async fn profile_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
) -> Result<axum::response::Response, AppError> {
    let body = profile_body(&state, &user, profile_views::ChangePasswordState::NoError).await?;

    Ok(views::render(is_htmx, "Profile", body, Some(&user.username)).into_response())
}

#[derive(Deserialize)]
struct ChangePasswordPost {
    current_password: String,
    new_password: String,
}

async fn change_password_post(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Form(body): Form<ChangePasswordPost>,
) -> Result<axum::response::Response, AppError> {
    let pw_state = if body.current_password.is_empty() || body.new_password.is_empty() {
        profile_views::ChangePasswordState::EmptyFields
    } else {
        let changed = state
            .db
            .change_password(user.id, &body.current_password, &body.new_password)
            .await
            .reject("could not change password")?;

        if changed {
            profile_views::ChangePasswordState::Success
        } else {
            profile_views::ChangePasswordState::IncorrectPassword
        }
    };

    let body = profile_body(&state, &user, pw_state).await?;

    Ok(views::titled("Profile", body).into_response())
}
