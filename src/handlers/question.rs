use axum::{
    extract::{Form, Path, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::{
    extractors::{AuthGuard, IsHtmx},
    names,
    rejections::{AppError, ResultExt},
    views, AppState,
};

use crate::views::question as question_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/questions/new", get(new_question_page))
        .route("/questions", post(create_question_post))
        .route("/flag-question/{question_id}", post(flag_question_post))
}

async fn new_question_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
) -> Result<axum::response::Response, AppError> {
    let categories = state
        .db
        .categories()
        .await
        .reject("could not get categories")?;

    Ok(views::render(
        is_htmx,
        "Add a Question",
        question_views::new_question(&categories, question_views::NewQuestionState::NoError),
        Some(&user.username),
    )
    .into_response())
}

#[derive(Deserialize)]
struct NewQuestionPost {
    question: String,
    category_id: i32,
    difficulty: String,
    correct_answer: String,
    wrong_answer_1: String,
    wrong_answer_2: String,
    wrong_answer_3: String,
}

async fn create_question_post(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    Form(body): Form<NewQuestionPost>,
) -> Result<axum::response::Response, AppError> {
    let question = body.question.trim();
    let correct_answer = body.correct_answer.trim();
    let wrong_answers: Vec<String> = [
        body.wrong_answer_1.trim(),
        body.wrong_answer_2.trim(),
        body.wrong_answer_3.trim(),
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    if question.is_empty() || correct_answer.is_empty() || wrong_answers.iter().any(|s| s.is_empty())
    {
        let categories = state
            .db
            .categories()
            .await
            .reject("could not get categories")?;
        return Ok(views::titled(
            "Add a Question",
            question_views::new_question(&categories, question_views::NewQuestionState::EmptyFields),
        )
        .into_response());
    }

    let difficulty = names::parse_difficulty(&body.difficulty)
        .ok_or(AppError::Input("unknown difficulty"))?;

    // Validates the category exists before touching the question bank
    state
        .db
        .category_name(body.category_id)
        .await
        .reject_input("unknown category")?;

    state
        .db
        .create_question(
            question,
            body.category_id,
            difficulty,
            correct_answer,
            &wrong_answers,
        )
        .await
        .reject("could not create question")?;

    Ok(views::titled("Thanks", question_views::created()).into_response())
}

async fn flag_question_post(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    Path(question_id): Path<i32>,
) -> Result<maud::Markup, AppError> {
    state
        .db
        .flag_question(question_id)
        .await
        .reject_input("could not flag that question")?;

    Ok(views::game::flagged())
}
