mod common;

use std::collections::HashSet;

use common::create_test_db;
use quizzi::db::{AnswerOutcome, Db};

const EASY: i32 = 0;
const MEDIUM: i32 = 1;

/// Seed a category with `n` questions (one correct + three wrong answers each)
/// and return its id.
async fn seed_category(db: &Db, name: &str, n: usize, difficulty: i32) -> i32 {
    let category_id = db.create_category(name).await.unwrap();
    for i in 0..n {
        db.create_question(
            &format!("Question {} of {}?", i + 1, name),
            category_id,
            difficulty,
            &format!("Right {}", i + 1),
            &[
                format!("Wrong {}a", i + 1),
                format!("Wrong {}b", i + 1),
                format!("Wrong {}c", i + 1),
            ],
        )
        .await
        .unwrap();
    }
    category_id
}

async fn register_user(db: &Db, username: &str) -> i32 {
    db.create_user(username, &format!("{username}@example.com"), "password")
        .await
        .unwrap()
}

/// Answer every remaining question in a game, picking the correct answer for
/// the first `correct` of them and a wrong answer for the rest.
async fn play_game(db: &Db, game_id: i32, correct: i32) {
    let total = db.questions_count_for_game(game_id).await.unwrap();
    let mut answered = 0;
    loop {
        let game = db.get_game_by_id(game_id).await.unwrap();
        if game.question_index >= total {
            break;
        }
        let question_id = db
            .game_question_id(game_id, game.question_index)
            .await
            .unwrap();
        let answers = db.get_answers(question_id).await.unwrap();
        let pick = answers
            .iter()
            .find(|a| a.is_correct == (answered < correct))
            .unwrap();

        let outcome = db.record_answer(&game, question_id, pick.id).await.unwrap();
        assert!(matches!(
            outcome,
            AnswerOutcome::Correct | AnswerOutcome::Incorrect
        ));

        db.advance_game(game_id).await.unwrap();
        answered += 1;
    }
    db.finish_game(game_id).await.unwrap();
}

#[tokio::test]
async fn test_db_connection() {
    let db = create_test_db().await;
    // Schema creation is idempotent; a fresh handle has an empty bank
    let categories = db.categories().await.unwrap();
    assert!(categories.is_empty());
}

#[tokio::test]
async fn test_user_registration_and_login() {
    let db = create_test_db().await;

    let user_id = db
        .create_user("awesomealex", "alex@example.com", "password")
        .await
        .unwrap();
    assert!(user_id > 0);

    assert!(db.username_exists("awesomealex").await.unwrap());
    assert!(!db.username_exists("nobody").await.unwrap());
    assert!(db.email_exists("alex@example.com").await.unwrap());

    // The login identifier matches username or email
    let by_name = db.find_user("awesomealex").await.unwrap().unwrap();
    let by_email = db.find_user("alex@example.com").await.unwrap().unwrap();
    assert_eq!(by_name.id, by_email.id);

    assert!(db
        .verify_user_password("awesomealex", "password")
        .await
        .unwrap());
    assert!(!db
        .verify_user_password("awesomealex", "wrong")
        .await
        .unwrap());
    assert!(!db.verify_user_password("nobody", "password").await.unwrap());
}

#[tokio::test]
async fn test_user_sessions() {
    let db = create_test_db().await;
    let user_id = register_user(&db, "sessionuser").await;

    let token = db.create_user_session(user_id).await.unwrap();
    let user = db.get_user_by_session(&token).await.unwrap().unwrap();
    assert_eq!(user.id, user_id);
    assert_eq!(user.username, "sessionuser");

    db.delete_user_session(&token).await.unwrap();
    assert!(db.get_user_by_session(&token).await.unwrap().is_none());
}

#[tokio::test]
async fn test_change_password() {
    let db = create_test_db().await;
    let user_id = register_user(&db, "pwuser").await;

    // Wrong current password leaves the stored one untouched
    assert!(!db.change_password(user_id, "nope", "newpass").await.unwrap());
    assert!(db.verify_user_password("pwuser", "password").await.unwrap());

    assert!(db
        .change_password(user_id, "password", "newpass")
        .await
        .unwrap());
    assert!(db.verify_user_password("pwuser", "newpass").await.unwrap());
    assert!(!db.verify_user_password("pwuser", "password").await.unwrap());
}

#[tokio::test]
async fn test_question_creation() {
    let db = create_test_db().await;
    let category_id = seed_category(&db, "Science", 3, EASY).await;

    let categories = db.categories().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Science");
    assert_eq!(categories[0].question_count, 3);

    assert_eq!(db.questions_count(category_id, EASY).await.unwrap(), 3);
    assert_eq!(db.questions_count(category_id, MEDIUM).await.unwrap(), 0);

    let name = db.category_name(category_id).await.unwrap();
    assert_eq!(name, "Science");
}

#[tokio::test]
async fn test_question_has_one_correct_answer() {
    let db = create_test_db().await;
    let category_id = db.create_category("Maths").await.unwrap();
    let question_id = db
        .create_question(
            "What is 1+1?",
            category_id,
            EASY,
            "2",
            &["1".to_string(), "3".to_string(), "11".to_string()],
        )
        .await
        .unwrap();

    let question = db.get_question(question_id).await.unwrap();
    assert_eq!(question.question, "What is 1+1?");
    assert_eq!(question.times_answered, 0);
    assert_eq!(question.times_correct, 0);

    let answers = db.get_answers(question_id).await.unwrap();
    assert_eq!(answers.len(), 4);
    let correct: Vec<_> = answers.iter().filter(|a| a.is_correct).collect();
    assert_eq!(correct.len(), 1);
    assert_eq!(correct[0].answer, "2");
}

#[tokio::test]
async fn test_game_selects_subset() {
    let db = create_test_db().await;
    let user_id = register_user(&db, "player").await;
    let category_id = seed_category(&db, "History", 8, EASY).await;

    let (token, game_id) = db
        .create_game(user_id, category_id, EASY, 5)
        .await
        .unwrap()
        .unwrap();

    let game = db.get_game(&token).await.unwrap();
    assert_eq!(game.id, game_id);
    assert_eq!(game.user_id, user_id);
    assert_eq!(game.category_id, category_id);
    assert_eq!(game.question_index, 0);
    assert_eq!(game.score, 0);

    // Five distinct questions, all from the requested pool
    let count = db.questions_count_for_game(game_id).await.unwrap();
    assert_eq!(count, 5);
    let mut seen = HashSet::new();
    for idx in 0..count {
        let question_id = db.game_question_id(game_id, idx).await.unwrap();
        assert!(seen.insert(question_id));
        let question = db.get_question(question_id).await.unwrap();
        assert_eq!(question.category_id, category_id);
        assert_eq!(question.difficulty, EASY);
    }
}

#[tokio::test]
async fn test_game_with_empty_pool() {
    let db = create_test_db().await;
    let user_id = register_user(&db, "player").await;
    let category_id = seed_category(&db, "Geography", 4, EASY).await;

    // No medium questions exist in this category
    let created = db.create_game(user_id, category_id, MEDIUM, 5).await.unwrap();
    assert!(created.is_none());
}

#[tokio::test]
async fn test_game_with_small_pool() {
    let db = create_test_db().await;
    let user_id = register_user(&db, "player").await;
    let category_id = seed_category(&db, "Music", 2, EASY).await;

    let (_token, game_id) = db
        .create_game(user_id, category_id, EASY, 5)
        .await
        .unwrap()
        .unwrap();

    // Fewer questions than requested: play with what exists
    assert_eq!(db.questions_count_for_game(game_id).await.unwrap(), 2);
}

#[tokio::test]
async fn test_perfect_game_updates_everything() {
    let db = create_test_db().await;
    let user_id = register_user(&db, "winner").await;
    let category_id = seed_category(&db, "Sport", 3, EASY).await;

    let (token, game_id) = db
        .create_game(user_id, category_id, EASY, 3)
        .await
        .unwrap()
        .unwrap();

    play_game(&db, game_id, 3).await;

    let game = db.get_game(&token).await.unwrap();
    assert_eq!(game.score, 3);
    assert_eq!(game.question_index, 3);

    // Results come back in asked order
    let results = db.game_results(game_id).await.unwrap();
    assert_eq!(results.len(), 3);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.question_number, i as i32);
        assert!(result.is_correct);
        assert_eq!(result.chosen_answer, result.correct_answer);
    }

    // Question counters were bumped
    let question_id = db.game_question_id(game_id, 0).await.unwrap();
    let question = db.get_question(question_id).await.unwrap();
    assert_eq!(question.times_answered, 1);
    assert_eq!(question.times_correct, 1);

    // The per-category tally followed along
    let scores = db.user_scores(user_id).await.unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].category, "Sport");
    assert_eq!(scores[0].num_answered, 3);
    assert_eq!(scores[0].num_correct, 3);

    // And the game reads as complete
    let games = db.games_for_user(user_id).await.unwrap();
    assert_eq!(games.len(), 1);
    assert!(games[0].is_complete);
    assert_eq!(games[0].answered_questions, 3);
}

#[tokio::test]
async fn test_wrong_answers_count_against_the_tally() {
    let db = create_test_db().await;
    let user_id = register_user(&db, "loser").await;
    let category_id = seed_category(&db, "Films", 2, EASY).await;

    let (token, game_id) = db
        .create_game(user_id, category_id, EASY, 2)
        .await
        .unwrap()
        .unwrap();

    play_game(&db, game_id, 0).await;

    let game = db.get_game(&token).await.unwrap();
    assert_eq!(game.score, 0);

    let results = db.game_results(game_id).await.unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| !r.is_correct));
    assert!(results.iter().all(|r| r.chosen_answer != r.correct_answer));

    let scores = db.user_scores(user_id).await.unwrap();
    assert_eq!(scores[0].num_answered, 2);
    assert_eq!(scores[0].num_correct, 0);
}

#[tokio::test]
async fn test_answer_from_another_question_is_rejected() {
    let db = create_test_db().await;
    let user_id = register_user(&db, "cheater").await;
    let category_id = seed_category(&db, "Art", 3, EASY).await;

    let (_token, game_id) = db
        .create_game(user_id, category_id, EASY, 3)
        .await
        .unwrap()
        .unwrap();

    let game = db.get_game_by_id(game_id).await.unwrap();
    let current_question = db.game_question_id(game_id, 0).await.unwrap();
    let other_question = db.game_question_id(game_id, 1).await.unwrap();
    let foreign_answer = &db.get_answers(other_question).await.unwrap()[0];

    let outcome = db
        .record_answer(&game, current_question, foreign_answer.id)
        .await
        .unwrap();
    assert!(matches!(outcome, AnswerOutcome::NotInQuestion));

    // Nothing was recorded
    assert!(db.game_results(game_id).await.unwrap().is_empty());
    assert_eq!(db.get_game_by_id(game_id).await.unwrap().score, 0);
    assert!(db.user_scores(user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_double_answer_is_rejected() {
    let db = create_test_db().await;
    let user_id = register_user(&db, "impatient").await;
    let category_id = seed_category(&db, "Tech", 2, EASY).await;

    let (_token, game_id) = db
        .create_game(user_id, category_id, EASY, 2)
        .await
        .unwrap()
        .unwrap();

    let game = db.get_game_by_id(game_id).await.unwrap();
    let question_id = db.game_question_id(game_id, 0).await.unwrap();
    let answers = db.get_answers(question_id).await.unwrap();
    let correct = answers.iter().find(|a| a.is_correct).unwrap();

    let first = db.record_answer(&game, question_id, correct.id).await.unwrap();
    assert!(matches!(first, AnswerOutcome::Correct));

    // A stale repost of the same form must not double-count
    let second = db.record_answer(&game, question_id, correct.id).await.unwrap();
    assert!(matches!(second, AnswerOutcome::AlreadyAnswered));

    assert_eq!(db.get_game_by_id(game_id).await.unwrap().score, 1);
    assert_eq!(db.game_results(game_id).await.unwrap().len(), 1);
    let scores = db.user_scores(user_id).await.unwrap();
    assert_eq!(scores[0].num_answered, 1);
}

#[tokio::test]
async fn test_resume_lookup() {
    let db = create_test_db().await;
    let user_id = register_user(&db, "resumer").await;
    let category_id = seed_category(&db, "Nature", 3, EASY).await;

    assert!(db.find_incomplete_game(user_id).await.unwrap().is_none());

    let (token, game_id) = db
        .create_game(user_id, category_id, EASY, 3)
        .await
        .unwrap()
        .unwrap();

    let found = db.find_incomplete_game(user_id).await.unwrap();
    assert_eq!(found, Some((game_id, token)));

    play_game(&db, game_id, 2).await;
    assert!(db.find_incomplete_game(user_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_flags() {
    let db = create_test_db().await;
    let category_id = seed_category(&db, "Food", 1, EASY).await;
    let user_id = register_user(&db, "flagger").await;

    // The single question in the category, via the game it lands in
    let (_, game_id) = db
        .create_game(user_id, category_id, EASY, 1)
        .await
        .unwrap()
        .unwrap();
    let question_id = db.game_question_id(game_id, 0).await.unwrap();

    assert_eq!(db.flags_count(question_id).await.unwrap(), 0);
    db.flag_question(question_id).await.unwrap();
    db.flag_question(question_id).await.unwrap();
    assert_eq!(db.flags_count(question_id).await.unwrap(), 2);
}

#[tokio::test]
async fn test_leaderboard_ordering() {
    let db = create_test_db().await;
    let category_id = seed_category(&db, "General", 3, EASY).await;

    let ada = register_user(&db, "ada").await;
    let bob = register_user(&db, "bob").await;

    let (_, ada_game) = db
        .create_game(ada, category_id, EASY, 3)
        .await
        .unwrap()
        .unwrap();
    play_game(&db, ada_game, 3).await;

    let (_, bob_game) = db
        .create_game(bob, category_id, EASY, 3)
        .await
        .unwrap()
        .unwrap();
    play_game(&db, bob_game, 1).await;

    let entries = db.leaderboard(10).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].username, "ada");
    assert_eq!(entries[0].total_correct, 3);
    assert_eq!(entries[0].total_answered, 3);
    assert_eq!(entries[1].username, "bob");
    assert_eq!(entries[1].total_correct, 1);

    // The limit is honored
    let top_one = db.leaderboard(1).await.unwrap();
    assert_eq!(top_one.len(), 1);
    assert_eq!(top_one[0].username, "ada");
}
