use maud::{html, Markup};

use crate::{db::Category, names};

pub enum RegisterState {
    NoError,
    EmptyFields,
    UsernameTaken,
    EmailTaken,
}

pub fn register(state: RegisterState) -> Markup {
    let error_msg = match state {
        RegisterState::NoError => None,
        RegisterState::EmptyFields => Some("Please fill in every field."),
        RegisterState::UsernameTaken => Some("That username is already taken."),
        RegisterState::EmailTaken => Some("That email address is already in use."),
    };

    html! {
        h1 { "Join Quizzi" }
        p { "Make an account to play trivia and climb the leaderboard." }
        article style="width: fit-content;" {
            form hx-post=(names::REGISTER_URL) hx-target="main" hx-swap="innerHTML" {
                label {
                    "Username"
                    input name="username"
                          type="text"
                          autocomplete="username"
                          required
                          placeholder="Username"
                          aria-label="Username";
                }
                label {
                    "Email"
                    input name="email"
                          type="email"
                          autocomplete="email"
                          required
                          placeholder="Email"
                          aria-label="Email";
                }
                label {
                    "Password"
                    @if let Some(msg) = error_msg {
                        input name="password"
                              type="password"
                              autocomplete="new-password"
                              required
                              placeholder="Password"
                              aria-invalid="true"
                              aria-label="Password";
                        small { (msg) }
                    } @else {
                        input name="password"
                              type="password"
                              autocomplete="new-password"
                              required
                              placeholder="Password"
                              aria-label="Password";
                    }
                }
                button type="submit" { "Register" }
            }
            p {
                "Already have an account? "
                a href=(names::LOGIN_URL) { "Log in" }
            }
        }
    }
}

pub enum LoginState {
    NoError,
    UnknownUser,
    IncorrectPassword,
}

pub fn login(state: LoginState) -> Markup {
    let error_msg = match state {
        LoginState::NoError => None,
        LoginState::UnknownUser => Some("No account matches that username or email."),
        LoginState::IncorrectPassword => Some("Password/Username is incorrect."),
    };

    html! {
        h1 { "Welcome back" }
        p { "Log in with your username or email." }
        article style="width: fit-content;" {
            form hx-post=(names::LOGIN_URL) hx-target="main" hx-swap="innerHTML" {
                label {
                    "Username or email"
                    input name="identifier"
                          type="text"
                          autocomplete="username"
                          required
                          placeholder="Username or email"
                          aria-label="Username or email";
                }
                label {
                    "Password"
                    @if let Some(msg) = error_msg {
                        input name="password"
                              type="password"
                              autocomplete="current-password"
                              required
                              placeholder="Password"
                              aria-invalid="true"
                              aria-label="Password";
                        small { (msg) }
                    } @else {
                        input name="password"
                              type="password"
                              autocomplete="current-password"
                              required
                              placeholder="Password"
                              aria-label="Password";
                    }
                }
                button type="submit" { "Log in" }
            }
            p {
                "No account yet? "
                a href=(names::REGISTER_URL) { "Register" }
            }
        }
    }
}

/// The logged-in landing page: pick a category and difficulty to start a game.
pub fn pre_game(categories: &[Category], incomplete_game: Option<i32>) -> Markup {
    html! {
        h1 { "Ready to play?" }

        @if let Some(game_id) = incomplete_game {
            article."resume-banner" {
                p { "You have an unfinished game." }
                button hx-post=(names::resume_game_url(game_id)) { "Resume it" }
            }
        }

        @if categories.is_empty() {
            p {
                "The question bank is empty. "
                a href=(names::NEW_QUESTION_URL) { "Contribute the first question" }
                "!"
            }
        } @else {
            p {
                "Pick a category and difficulty; you'll get "
                (names::GAME_SIZE)
                " questions."
            }
            article style="width: fit-content;" {
                form hx-post=(names::START_GAME_URL) hx-target="main" hx-swap="innerHTML" {
                    label {
                        "Category"
                        select name="category_id" aria-label="Category" required {
                            @for category in categories {
                                option value=(category.id) {
                                    (category.name) " (" (category.question_count) " questions)"
                                }
                            }
                        }
                    }
                    fieldset {
                        legend { "Difficulty" }
                        @for (value, label) in names::DIFFICULTIES {
                            label {
                                @if *value == names::DEFAULT_DIFFICULTY {
                                    input type="radio" name="difficulty" value=(label) checked;
                                } @else {
                                    input type="radio" name="difficulty" value=(label);
                                }
                                (label)
                            }
                        }
                    }
                    input type="submit" value="Start game";
                }
            }
            p {
                "Got a good question of your own? "
                a href=(names::NEW_QUESTION_URL) { "Add it to the bank" }
                "."
            }
        }
    }
}
