use maud::{html, Markup};

use crate::db::{AuthUser, CategoryScore, GameSummary};
use crate::names;

pub enum ChangePasswordState {
    NoError,
    Success,
    EmptyFields,
    IncorrectPassword,
}

pub struct ProfileData<'a> {
    pub user: &'a AuthUser,
    pub scores: &'a [CategoryScore],
    pub games: &'a [GameSummary],
}

pub fn profile(data: ProfileData, pw_state: ChangePasswordState) -> Markup {
    html! {
        h1 { (data.user.username) }
        p { (data.user.email) }

        h2 { "Scores by category" }
        @if data.scores.is_empty() {
            p { "No games played yet." }
        } @else {
            article {
                table {
                    thead {
                        tr {
                            th { "Category" }
                            th { "Answered" }
                            th { "Correct" }
                            th { "Accuracy" }
                        }
                    }
                    tbody {
                        @for score in data.scores {
                            tr {
                                td { (score.category) }
                                td { (score.num_answered) }
                                td { (score.num_correct) }
                                td {
                                    @if score.num_answered > 0 {
                                        (score.num_correct * 100 / score.num_answered) "%"
                                    } @else {
                                        "-"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        h2 { "Recent games" }
        @if data.games.is_empty() {
            p { "Nothing here yet. " a href="/" { "Start a game" } "!" }
        } @else {
            article {
                table {
                    thead {
                        tr {
                            th { "Category" }
                            th { "Difficulty" }
                            th { "Score" }
                            th { "Progress" }
                            th { "" }
                        }
                    }
                    tbody {
                        @for game in data.games {
                            tr {
                                td { (game.category) }
                                td { (names::difficulty_label(game.difficulty)) }
                                td { (game.score) "/" (game.total_questions) }
                                td {
                                    @if game.is_complete {
                                        "finished"
                                    } @else {
                                        (game.answered_questions) "/" (game.total_questions) " answered"
                                    }
                                }
                                td {
                                    @if !game.is_complete {
                                        button."secondary outline"
                                               hx-post=(names::resume_game_url(game.game_id)) {
                                            "Resume"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        h2 { "Change password" }
        article style="width: fit-content;" {
            form hx-post=(names::CHANGE_PASSWORD_URL) hx-target="main" hx-swap="innerHTML" {
                label {
                    "Current password"
                    @if matches!(&pw_state, ChangePasswordState::IncorrectPassword) {
                        input name="current_password" type="password"
                              autocomplete="current-password" required
                              aria-invalid="true" aria-label="Current password";
                        small { "That's not your current password." }
                    } @else {
                        input name="current_password" type="password"
                              autocomplete="current-password" required
                              aria-label="Current password";
                    }
                }
                label {
                    "New password"
                    input name="new_password" type="password"
                          autocomplete="new-password" required
                          aria-label="New password";
                }
                @match pw_state {
                    ChangePasswordState::Success => {
                        p style="color: #28a745;" { "Password changed." }
                    },
                    ChangePasswordState::EmptyFields => {
                        p style="color: #d32f2f;" { "Please fill in both fields." }
                    },
                    _ => {}
                }
                button type="submit" { "Change password" }
            }
        }
    }
}
