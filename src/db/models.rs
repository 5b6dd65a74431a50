// Database model structs

#[derive(Clone, sqlx::FromRow)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
    pub email: String,
}

#[derive(sqlx::FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub question_count: i64,
}

#[derive(sqlx::FromRow)]
pub struct QuestionModel {
    pub id: i32,
    pub question: String,
    pub category_id: i32,
    pub difficulty: i32,
    pub times_answered: i32,
    pub times_correct: i32,
}

#[derive(Clone, sqlx::FromRow)]
pub struct AnswerModel {
    pub id: i32,
    pub question_id: i32,
    pub is_correct: bool,
    pub answer: String,
}

#[derive(sqlx::FromRow)]
pub struct GameModel {
    pub id: i32,
    pub token: String,
    pub user_id: i32,
    pub category_id: i32,
    pub difficulty: i32,
    pub question_index: i32,
    pub score: i32,
}

/// One row of the post-game summary, in asked order.
#[derive(sqlx::FromRow)]
pub struct QuestionResultModel {
    pub question_number: i32,
    pub question: String,
    pub chosen_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(sqlx::FromRow)]
pub struct CategoryScore {
    pub category: String,
    pub num_answered: i64,
    pub num_correct: i64,
}

#[derive(sqlx::FromRow)]
pub struct LeaderboardEntry {
    pub username: String,
    pub total_correct: i64,
    pub total_answered: i64,
}

#[derive(sqlx::FromRow)]
pub struct GameSummary {
    pub game_id: i32,
    pub token: String,
    pub category: String,
    pub difficulty: i32,
    pub score: i32,
    pub total_questions: i32,
    pub answered_questions: i32,
    pub is_complete: bool,
}

/// Result of recording a submitted answer against the game's current question.
#[derive(Debug)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    /// The answer id is not one of the question's answers.
    NotInQuestion,
    /// The question already has a recorded result (stale form repost).
    AlreadyAnswered,
}
