use maud::{html, Markup};

use crate::{db::Category, names};

pub enum NewQuestionState {
    NoError,
    EmptyFields,
}

pub fn new_question(categories: &[Category], state: NewQuestionState) -> Markup {
    let error_msg = match state {
        NewQuestionState::NoError => None,
        NewQuestionState::EmptyFields => Some("Please fill in every field."),
    };

    html! {
        h1 { "Add a question" }
        p { "Questions you contribute go straight into the bank for everyone to play." }
        article style="width: fit-content;" {
            form hx-post=(names::CREATE_QUESTION_URL) hx-target="main" hx-swap="innerHTML" {
                label {
                    "Question"
                    input name="question"
                          type="text"
                          required
                          placeholder="What is..."
                          aria-label="Question";
                }
                label {
                    "Category"
                    select name="category_id" aria-label="Category" required {
                        @for category in categories {
                            option value=(category.id) { (category.name) }
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
                label {
                    "Correct answer"
                    input name="correct_answer" type="text" required aria-label="Correct answer";
                }
                @for i in 1..=names::WRONG_ANSWERS_PER_QUESTION {
                    label {
                        "Wrong answer " (i)
                        input name=(format!("wrong_answer_{i}")) type="text" required
                              aria-label=(format!("Wrong answer {i}"));
                    }
                }
                @if let Some(msg) = error_msg {
                    small style="color: #d32f2f;" { (msg) }
                }
                input type="submit" value="Add question";
            }
        }
    }
}

pub fn created() -> Markup {
    html! {
        article style="margin-top: 2rem;" {
            header {
                h2 { "Thanks!" }
            }
            p { "Your question is in the bank." }
            div style="display: flex; gap: 1rem;" {
                button hx-get=(names::NEW_QUESTION_URL) hx-target="main" hx-swap="innerHTML" {
                    "Add another"
                }
                button class="secondary" hx-get="/" hx-push-url="true" hx-target="main" {
                    "Back to the lobby"
                }
            }
        }
    }
}
