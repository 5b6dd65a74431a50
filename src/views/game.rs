use maud::{html, Markup};

use crate::db::{AnswerModel, QuestionModel, QuestionResultModel};
use crate::names;

pub struct QuestionData {
    pub category: String,
    pub question: QuestionModel,
    pub answers: Vec<AnswerModel>,
    pub question_idx: i32,
    pub questions_count: i32,
    /// The index the game is currently waiting on.
    pub current_idx: i32,
}

pub fn flag_button(question_id: i32) -> Markup {
    html! {
        button type="button" class="flag-btn secondary outline"
               hx-post=(names::flag_question_url(question_id))
               hx-swap="outerHTML"
               title="Flag this question for review" {
            "\u{2691} Flag"
        }
    }
}

pub fn flagged() -> Markup {
    html! {
        small class="flag-btn" { "Flagged for review" }
    }
}

pub fn question(data: QuestionData) -> Markup {
    html! {
        p {
            "Playing " mark { (data.category) }
            " (" (names::difficulty_label(data.question.difficulty)) ")."
        }
        article style="width: fit-content;" {
            div style="display: flex; align-items: center; margin-bottom: 0.5rem;" {
                p style="color: #666; font-size: 0.9rem; margin-bottom: 0;" {
                    "Question " strong { (data.question_idx + 1) } " of " (data.questions_count)
                }
                span style="margin-left: auto;" {
                    (flag_button(data.question.id))
                }
            }

            h3 { (data.question.question) }

            @if data.question_idx == data.current_idx {
                form hx-post=(names::SUBMIT_ANSWER_URL)
                     hx-target="main"
                     hx-swap="innerHTML"
                     id="question-form" {
                    fieldset {
                        @for answer in &data.answers {
                            label {
                                input type="radio" name="answer" value=(answer.id) onchange="enableSubmitButton()";
                                (answer.answer)
                            }
                        }
                    }
                    input type="submit" id="submit-btn" value="Submit answer" disabled;
                }
                script {
                    "function enableSubmitButton() { document.getElementById('submit-btn').disabled = false; }"
                }
            } @else {
                form {
                    fieldset disabled {
                        @for answer in &data.answers {
                            label {
                                input type="radio" name="answer" value=(answer.id);
                                (answer.answer)
                            }
                        }
                    }
                }
                p { "You've already answered this one." }
                @if data.current_idx < data.questions_count {
                    button hx-get=(names::game_question_url(data.current_idx))
                           hx-target="main"
                           hx-swap="innerHTML" {
                        "Back to the current question"
                    }
                } @else {
                    button hx-get=(names::POST_GAME_URL)
                           hx-push-url="true"
                           hx-target="main" {
                        "See your results"
                    }
                }
            }
        }
    }
}

/// Shown when a category/difficulty pair has no questions to build a game from.
pub fn no_questions(category: &str, difficulty: i32) -> Markup {
    html! {
        article style="margin-top: 2rem;" {
            header {
                h2 { "No questions here yet" }
            }
            p {
                "There are no " (names::difficulty_label(difficulty)) " questions in "
                mark { (category) }
                " yet. :("
            }
            p {
                a href=(names::NEW_QUESTION_URL) { "Contribute one" }
                " or pick another category."
            }
            button hx-get="/" hx-push-url="true" hx-target="main" { "Back" }
        }
    }
}

/// Shown when the game cookie is missing or doesn't match a game.
pub fn not_in_game() -> Markup {
    html! {
        article style="margin-top: 2rem;" {
            header {
                h2 { "You aren't in a game!" }
            }
            p { "Head back and start one." }
            button hx-get="/" hx-push-url="true" hx-target="main" { "Start a game" }
        }
    }
}

pub struct PostGameData {
    pub username: String,
    pub category: String,
    pub difficulty: i32,
    pub score: i32,
    pub questions_count: i32,
    pub results: Vec<QuestionResultModel>,
}

pub fn post_game(data: PostGameData) -> Markup {
    html! {
        h1 { "Nice one, " (data.username) "!" }
        p {
            "You scored " strong { (data.score) } " out of " (data.questions_count)
            " in " mark { (data.category) }
            " (" (names::difficulty_label(data.difficulty)) ")."
        }
        article {
            table {
                thead {
                    tr {
                        th { "#" }
                        th { "Question" }
                        th { "Your answer" }
                        th { "Correct answer" }
                        th { "" }
                    }
                }
                tbody {
                    @for result in &data.results {
                        tr {
                            td { (result.question_number + 1) }
                            td { (result.question) }
                            td { (result.chosen_answer) }
                            td { (result.correct_answer) }
                            td {
                                @if result.is_correct {
                                    span class="result-correct" { "\u{2713}" }
                                } @else {
                                    span class="result-incorrect" { "\u{2717}" }
                                }
                            }
                        }
                    }
                }
            }
        }
        div style="display: flex; gap: 1rem;" {
            button hx-get="/" hx-push-url="true" hx-target="main" { "Play again" }
            a role="button" class="secondary" href=(names::LEADERBOARD_URL) { "Leaderboard" }
        }
    }
}
