// Database schema initialization

use color_eyre::Result;

pub async fn create_schema(pool: &sqlx::SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_sessions (
            id TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL,
            FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id INTEGER PRIMARY KEY,
            question TEXT NOT NULL,
            category_id INTEGER NOT NULL,
            difficulty INTEGER NOT NULL DEFAULT 0,
            times_answered INTEGER NOT NULL DEFAULT 0,
            times_correct INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS answers (
            id INTEGER PRIMARY KEY,
            answer TEXT NOT NULL,
            is_correct BOOLEAN NOT NULL,
            question_id INTEGER NOT NULL,
            FOREIGN KEY(question_id) REFERENCES questions(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS flags (
            id INTEGER PRIMARY KEY,
            question_id INTEGER NOT NULL,
            FOREIGN KEY(question_id) REFERENCES questions(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS scores (
            user_id INTEGER NOT NULL,
            category_id INTEGER NOT NULL,
            num_answered INTEGER NOT NULL DEFAULT 0,
            num_correct INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY(user_id, category_id),
            FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS games (
            id INTEGER PRIMARY KEY,
            token TEXT NOT NULL UNIQUE,
            user_id INTEGER NOT NULL,
            category_id INTEGER NOT NULL,
            difficulty INTEGER NOT NULL,
            question_index INTEGER NOT NULL DEFAULT 0,
            score INTEGER NOT NULL DEFAULT 0,
            time_started INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
            time_completed INTEGER,
            FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS game_questions (
            id INTEGER PRIMARY KEY,
            game_id INTEGER NOT NULL,
            question_id INTEGER NOT NULL,
            question_number INTEGER NOT NULL,
            is_correct BOOLEAN DEFAULT NULL,
            FOREIGN KEY(game_id) REFERENCES games(id) ON DELETE CASCADE,
            FOREIGN KEY(question_id) REFERENCES questions(id) ON DELETE CASCADE,
            UNIQUE(game_id, question_number)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS question_results (
            id INTEGER PRIMARY KEY,
            game_id INTEGER NOT NULL,
            question_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL,
            answer_id INTEGER NOT NULL,
            is_correct BOOLEAN NOT NULL,
            FOREIGN KEY(game_id) REFERENCES games(id) ON DELETE CASCADE,
            FOREIGN KEY(question_id) REFERENCES questions(id) ON DELETE CASCADE,
            FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY(answer_id) REFERENCES answers(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // VIEW: per-game progress (answered/correct counts, completion flag)
    sqlx::query(
        r#"
        CREATE VIEW IF NOT EXISTS game_stats AS
        SELECT
            g.id AS game_id,
            g.token,
            g.user_id,
            g.category_id,
            g.difficulty,
            g.score,
            g.time_started,
            g.time_completed,
            (SELECT COUNT(*) FROM game_questions WHERE game_id = g.id) AS total_questions,
            (SELECT COUNT(*) FROM game_questions WHERE game_id = g.id AND is_correct IS NOT NULL) AS answered_questions,
            CASE WHEN
                (SELECT COUNT(*) FROM game_questions WHERE game_id = g.id AND is_correct IS NOT NULL)
                >= (SELECT COUNT(*) FROM game_questions WHERE game_id = g.id)
                AND (SELECT COUNT(*) FROM game_questions WHERE game_id = g.id) > 0
            THEN 1 ELSE 0 END AS is_complete
        FROM games g
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
