use axum::{
    extract::{Form, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::{
    extractors::IsHtmx,
    names,
    rejections::{AppError, ResultExt},
    utils, views, AppState,
};

use crate::views::homepage as homepage_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(homepage))
        .route("/register", get(register_page).post(register_post))
        .route("/login", get(login_page).post(login_post))
        .route("/logout", post(logout_post))
}

async fn homepage(
    State(state): State<AppState>,
    jar: CookieJar,
    IsHtmx(is_htmx): IsHtmx,
) -> Result<axum::response::Response, AppError> {
    if let Some(session_id) = jar
        .get(names::USER_SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
    {
        if let Ok(Some(user)) = state.db.get_user_by_session(&session_id).await {
            let categories = state
                .db
                .categories()
                .await
                .reject("could not get categories")?;
            let incomplete_game = state
                .db
                .find_incomplete_game(user.id)
                .await
                .reject("could not check for an incomplete game")?
                .map(|(game_id, _token)| game_id);

            return Ok(views::render(
                is_htmx,
                "Play",
                homepage_views::pre_game(&categories, incomplete_game),
                Some(&user.username),
            )
            .into_response());
        }
    }

    // Not logged in: redirect to login page
    Ok(Redirect::to(names::LOGIN_URL).into_response())
}

async fn register_page(IsHtmx(is_htmx): IsHtmx) -> maud::Markup {
    views::render(
        is_htmx,
        "Register",
        homepage_views::register(homepage_views::RegisterState::NoError),
        None,
    )
}

async fn login_page(IsHtmx(is_htmx): IsHtmx) -> maud::Markup {
    views::render(
        is_htmx,
        "Log In",
        homepage_views::login(homepage_views::LoginState::NoError),
        None,
    )
}

#[derive(Deserialize)]
struct RegisterPost {
    username: String,
    email: String,
    password: String,
}

async fn register_post(
    State(state): State<AppState>,
    Form(body): Form<RegisterPost>,
) -> Result<axum::response::Response, AppError> {
    let username = body.username.trim();
    let email = body.email.trim();

    if username.is_empty() || email.is_empty() || body.password.is_empty() {
        return Ok(views::titled(
            "Register",
            homepage_views::register(homepage_views::RegisterState::EmptyFields),
        )
        .into_response());
    }

    if state
        .db
        .username_exists(username)
        .await
        .reject("could not check username")?
    {
        return Ok(views::titled(
            "Register",
            homepage_views::register(homepage_views::RegisterState::UsernameTaken),
        )
        .into_response());
    }

    if state
        .db
        .email_exists(email)
        .await
        .reject("could not check email")?
    {
        return Ok(views::titled(
            "Register",
            homepage_views::register(homepage_views::RegisterState::EmailTaken),
        )
        .into_response());
    }

    let user_id = state
        .db
        .create_user(username, email, &body.password)
        .await
        .reject("could not create user")?;

    let session_token = state
        .db
        .create_user_session(user_id)
        .await
        .reject("could not create session")?;

    let cookie = utils::cookie(
        names::USER_SESSION_COOKIE_NAME,
        &session_token,
        state.secure_cookies,
    )
    .reject("could not build session cookie")?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert("HX-Redirect", HeaderValue::from_static("/"));

    Ok((headers, "").into_response())
}

#[derive(Deserialize)]
struct LoginPost {
    identifier: String,
    password: String,
}

async fn login_post(
    State(state): State<AppState>,
    Form(body): Form<LoginPost>,
) -> Result<axum::response::Response, AppError> {
    let identifier = body.identifier.trim();

    let user = state
        .db
        .find_user(identifier)
        .await
        .reject("could not look up user")?;

    let Some(user) = user else {
        return Ok(views::titled(
            "Log In",
            homepage_views::login(homepage_views::LoginState::UnknownUser),
        )
        .into_response());
    };

    let verified = state
        .db
        .verify_user_password(identifier, &body.password)
        .await
        .reject("could not verify password")?;

    if !verified {
        return Ok(views::titled(
            "Log In",
            homepage_views::login(homepage_views::LoginState::IncorrectPassword),
        )
        .into_response());
    }

    let session_token = state
        .db
        .create_user_session(user.id)
        .await
        .reject("could not create session")?;

    let cookie = utils::cookie(
        names::USER_SESSION_COOKIE_NAME,
        &session_token,
        state.secure_cookies,
    )
    .reject("could not build session cookie")?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert("HX-Redirect", HeaderValue::from_static("/"));

    Ok((headers, "").into_response())
}

async fn logout_post(
    jar: CookieJar,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(session_id) = jar
        .get(names::USER_SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
    {
        let _ = state.db.delete_user_session(&session_id).await;
    }

    let clear_user = utils::clear_cookie(names::USER_SESSION_COOKIE_NAME, state.secure_cookies)
        .reject("could not build clear-session cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, clear_user);
    headers.insert("HX-Redirect", HeaderValue::from_static(names::LOGIN_URL));

    Ok((headers, ""))
}
