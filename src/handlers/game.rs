use axum::{
    extract::{Form, Path, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::{
    db::AnswerOutcome,
    extractors::{AuthGuard, IsHtmx},
    names,
    rejections::{AppError, ResultExt},
    utils, views, AppState,
};

use crate::views::game as game_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/start-game", post(start_game))
        .route("/game/{idx}", get(game_page))
        .route("/submit-answer", post(submit_answer))
        .route("/post-game", get(post_game))
        .route("/resume-game/{game_id}", post(resume_game))
}

#[derive(Deserialize)]
struct StartGameBody {
    category_id: i32,
    difficulty: String,
}

async fn start_game(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Form(body): Form<StartGameBody>,
) -> Result<axum::response::Response, AppError> {
    let difficulty = names::parse_difficulty(&body.difficulty)
        .ok_or(AppError::Input("unknown difficulty"))?;

    let category = state
        .db
        .category_name(body.category_id)
        .await
        .reject_input("unknown category")?;

    let created = state
        .db
        .create_game(user.id, body.category_id, difficulty, names::GAME_SIZE)
        .await
        .reject("could not create game")?;

    let Some((token, _game_id)) = created else {
        tracing::warn!(
            "no questions for category={} difficulty={difficulty}",
            body.category_id
        );
        return Ok(views::titled(
            "No Questions",
            game_views::no_questions(&category, difficulty),
        )
        .into_response());
    };

    let cookie = utils::cookie(names::GAME_COOKIE_NAME, &token, state.secure_cookies)
        .reject("could not build game cookie")?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert(
        "HX-Redirect",
        names::game_question_url(0)
            .parse()
            .reject("could not build redirect header")?,
    );

    Ok((headers, "").into_response())
}

async fn game_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(question_idx): Path<i32>,
    IsHtmx(is_htmx): IsHtmx,
    jar: CookieJar,
) -> Result<axum::response::Response, AppError> {
    let Some(token) = jar.get(names::GAME_COOKIE_NAME).map(|c| c.value().to_string()) else {
        return Ok(views::render(
            is_htmx,
            "Not In a Game",
            game_views::not_in_game(),
            Some(&user.username),
        )
        .into_response());
    };

    let game = match state.db.get_game(&token).await {
        Ok(game) => game,
        Err(e) => {
            tracing::error!("could not get game for {token}: {e}");
            return Ok(views::render(
                is_htmx,
                "Not In a Game",
                game_views::not_in_game(),
                Some(&user.username),
            )
            .into_response());
        }
    };

    let questions_count = state
        .db
        .questions_count_for_game(game.id)
        .await
        .reject("could not get question count")?;

    if question_idx < 0 || question_idx >= questions_count {
        return Err(AppError::Input("that question doesn't exist"));
    }

    let question_id = state
        .db
        .game_question_id(game.id, question_idx)
        .await
        .reject("could not get question id")?;

    let question = state
        .db
        .get_question(question_id)
        .await
        .reject("could not get question")?;

    let mut answers = state
        .db
        .get_answers(question_id)
        .await
        .reject("could not get answers")?;

    // The answers are shown in a fresh random order every time
    answers.shuffle(&mut rand::thread_rng());

    let category = state
        .db
        .category_name(game.category_id)
        .await
        .reject("could not get category name")?;

    let page = game_views::question(game_views::QuestionData {
        category,
        question,
        answers,
        question_idx,
        questions_count,
        current_idx: game.question_index,
    });

    Ok(views::render(is_htmx, "Question", page, Some(&user.username)).into_response())
}

#[derive(Deserialize)]
struct SubmitAnswerBody {
    answer: i32,
}

async fn submit_answer(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    jar: CookieJar,
    Form(body): Form<SubmitAnswerBody>,
) -> Result<axum::response::Response, AppError> {
    let Some(token) = jar.get(names::GAME_COOKIE_NAME).map(|c| c.value().to_string()) else {
        return Ok(views::titled("Not In a Game", game_views::not_in_game()).into_response());
    };

    let game = state
        .db
        .get_game(&token)
        .await
        .reject("could not get game")?;

    if game.user_id != user.id {
        return Err(AppError::Unauthorized);
    }

    let questions_count = state
        .db
        .questions_count_for_game(game.id)
        .await
        .reject("could not get question count")?;

    if game.question_index >= questions_count {
        return Err(AppError::Input("this game is already finished"));
    }

    let question_id = state
        .db
        .game_question_id(game.id, game.question_index)
        .await
        .reject("could not get current question")?;

    let outcome = state
        .db
        .record_answer(&game, question_id, body.answer)
        .await
        .reject("could not record answer")?;

    match outcome {
        AnswerOutcome::Correct | AnswerOutcome::Incorrect => {}
        AnswerOutcome::NotInQuestion => {
            return Err(AppError::Input(
                "that answer isn't one of the current question's choices",
            ));
        }
        AnswerOutcome::AlreadyAnswered => {
            return Err(AppError::Input("that question has already been answered"));
        }
    }

    let next_idx = state
        .db
        .advance_game(game.id)
        .await
        .reject("could not advance game")?;

    let mut headers = HeaderMap::new();
    if next_idx >= questions_count {
        state
            .db
            .finish_game(game.id)
            .await
            .reject("could not finish game")?;
        headers.insert("HX-Redirect", HeaderValue::from_static(names::POST_GAME_URL));
    } else {
        headers.insert(
            "HX-Redirect",
            names::game_question_url(next_idx)
                .parse()
                .reject("could not build redirect header")?,
        );
    }

    Ok((headers, "").into_response())
}

async fn post_game(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    jar: CookieJar,
) -> Result<axum::response::Response, AppError> {
    let Some(token) = jar.get(names::GAME_COOKIE_NAME).map(|c| c.value().to_string()) else {
        return Ok(views::render(
            is_htmx,
            "Not In a Game",
            game_views::not_in_game(),
            Some(&user.username),
        )
        .into_response());
    };

    let game = state
        .db
        .get_game(&token)
        .await
        .reject("could not get game")?;

    let questions_count = state
        .db
        .questions_count_for_game(game.id)
        .await
        .reject("could not get question count")?;

    let results = state
        .db
        .game_results(game.id)
        .await
        .reject("could not get game results")?;

    let category = state
        .db
        .category_name(game.category_id)
        .await
        .reject("could not get category name")?;

    let page = game_views::post_game(game_views::PostGameData {
        username: user.username.clone(),
        category,
        difficulty: game.difficulty,
        score: game.score,
        questions_count,
        results,
    });

    // The game is over; drop the cookie that carried it
    let clear = utils::clear_cookie(names::GAME_COOKIE_NAME, state.secure_cookies)
        .reject("could not build clear-game cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, clear);

    Ok((
        headers,
        views::render(is_htmx, "Results", page, Some(&user.username)),
    )
        .into_response())
}

async fn resume_game(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(game_id): Path<i32>,
) -> Result<axum::response::Response, AppError> {
    let game = state
        .db
        .get_game_by_id(game_id)
        .await
        .reject("could not get game")?;

    if game.user_id != user.id {
        return Err(AppError::Unauthorized);
    }

    let questions_count = state
        .db
        .questions_count_for_game(game.id)
        .await
        .reject("could not get question count")?;

    tracing::info!("resuming game {game_id} at question {}", game.question_index);

    let cookie = utils::cookie(names::GAME_COOKIE_NAME, &game.token, state.secure_cookies)
        .reject("could not build game cookie")?;

    let target = if game.question_index < questions_count {
        names::game_question_url(game.question_index)
    } else {
        names::POST_GAME_URL.to_string()
    };

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert(
        "HX-Redirect",
        target.parse().reject("could not build redirect header")?,
    );

    Ok((headers, "").into_response())
}
