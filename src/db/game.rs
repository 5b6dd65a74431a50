use color_eyre::{eyre::OptionExt, Result};
use rand::seq::SliceRandom;
use ulid::Ulid;

use super::models::{AnswerOutcome, GameModel, GameSummary, QuestionResultModel};
use super::Db;

impl Db {
    /// Start a game for a category/difficulty pair: collect the matching
    /// question ids, shuffle, keep the first `question_count`, and insert the
    /// game with its question list atomically.
    ///
    /// Returns `(game_token, game_id)`, or `None` when the pair has no
    /// questions at all.
    pub async fn create_game(
        &self,
        user_id: i32,
        category_id: i32,
        difficulty: i32,
        question_count: i32,
    ) -> Result<Option<(String, i32)>> {
        let mut question_ids: Vec<i32> = sqlx::query_scalar(
            "SELECT id FROM questions WHERE category_id = ? AND difficulty = ? ORDER BY id",
        )
        .bind(category_id)
        .bind(difficulty)
        .fetch_all(&self.pool)
        .await?;

        if question_ids.is_empty() {
            return Ok(None);
        }

        question_ids.shuffle(&mut rand::thread_rng());
        question_ids.truncate(question_count as usize);

        let token = Ulid::new().to_string();

        // Transaction: insert game + game_questions atomically
        let mut tx = self.pool.begin().await?;

        let game_id: i32 = sqlx::query_scalar(
            "INSERT INTO games (token, user_id, category_id, difficulty) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&token)
        .bind(user_id)
        .bind(category_id)
        .bind(difficulty)
        .fetch_one(&mut *tx)
        .await?;

        for (number, question_id) in question_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO game_questions (game_id, question_id, question_number) VALUES (?, ?, ?)",
            )
            .bind(game_id)
            .bind(question_id)
            .bind(number as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "game created for user={user_id}: game_id={game_id}, category={category_id}, difficulty={difficulty}, questions={}",
            question_ids.len()
        );
        Ok(Some((token, game_id)))
    }

    pub async fn get_game(&self, token: &str) -> Result<GameModel> {
        let game = sqlx::query_as::<_, GameModel>(
            "SELECT id, token, user_id, category_id, difficulty, question_index, score FROM games WHERE token = ?",
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await?;

        Ok(game)
    }

    pub async fn get_game_by_id(&self, game_id: i32) -> Result<GameModel> {
        let game = sqlx::query_as::<_, GameModel>(
            "SELECT id, token, user_id, category_id, difficulty, question_index, score FROM games WHERE id = ?",
        )
        .bind(game_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(game)
    }

    pub async fn game_question_id(&self, game_id: i32, idx: i32) -> Result<i32> {
        let question_id: i32 = sqlx::query_scalar(
            "SELECT question_id FROM game_questions WHERE game_id = ? AND question_number = ?",
        )
        .bind(game_id)
        .bind(idx)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_eyre("no question at that position")?;

        Ok(question_id)
    }

    pub async fn questions_count_for_game(&self, game_id: i32) -> Result<i32> {
        let count: i32 =
            sqlx::query_scalar("SELECT COUNT(*) FROM game_questions WHERE game_id = ?")
                .bind(game_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Record the user's answer for one of the game's questions: write the
    /// question result, mark the game question, bump the game score, the
    /// question's counters, and the user's per-category tally, all in one
    /// transaction. Rejected submissions change nothing.
    pub async fn record_answer(
        &self,
        game: &GameModel,
        question_id: i32,
        answer_id: i32,
    ) -> Result<AnswerOutcome> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<bool> = sqlx::query_scalar(
            "SELECT is_correct FROM game_questions WHERE game_id = ? AND question_id = ?",
        )
        .bind(game.id)
        .bind(question_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_eyre("question is not part of this game")?;

        if existing.is_some() {
            return Ok(AnswerOutcome::AlreadyAnswered);
        }

        let answer: Option<(i32, bool)> = sqlx::query_as(
            "SELECT id, is_correct FROM answers WHERE id = ? AND question_id = ?",
        )
        .bind(answer_id)
        .bind(question_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((answer_id, is_correct)) = answer else {
            return Ok(AnswerOutcome::NotInQuestion);
        };

        sqlx::query(
            "INSERT INTO question_results (game_id, question_id, user_id, answer_id, is_correct) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(game.id)
        .bind(question_id)
        .bind(game.user_id)
        .bind(answer_id)
        .bind(is_correct)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE game_questions SET is_correct = ? WHERE game_id = ? AND question_id = ?",
        )
        .bind(is_correct)
        .bind(game.id)
        .bind(question_id)
        .execute(&mut *tx)
        .await?;

        if is_correct {
            sqlx::query("UPDATE games SET score = score + 1 WHERE id = ?")
                .bind(game.id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            "UPDATE questions SET times_answered = times_answered + 1, times_correct = times_correct + ? WHERE id = ?",
        )
        .bind(is_correct as i32)
        .bind(question_id)
        .execute(&mut *tx)
        .await?;

        Self::bump_score_tx(&mut tx, game.user_id, game.category_id, is_correct).await?;

        tx.commit().await?;

        tracing::info!(
            "answer recorded for game={} question={question_id}: correct={is_correct}",
            game.id
        );

        if is_correct {
            Ok(AnswerOutcome::Correct)
        } else {
            Ok(AnswerOutcome::Incorrect)
        }
    }

    /// Move the game's linear index one step forward and return the new index.
    pub async fn advance_game(&self, game_id: i32) -> Result<i32> {
        let question_index: i32 = sqlx::query_scalar(
            "UPDATE games SET question_index = question_index + 1 WHERE id = ? RETURNING question_index",
        )
        .bind(game_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(question_index)
    }

    pub async fn finish_game(&self, game_id: i32) -> Result<()> {
        sqlx::query(
            "UPDATE games SET time_completed = strftime('%s', 'now') WHERE id = ? AND time_completed IS NULL",
        )
        .bind(game_id)
        .execute(&self.pool)
        .await?;

        tracing::info!("game {game_id} completed");
        Ok(())
    }

    /// Per-question results for the post-game summary, in asked order.
    pub async fn game_results(&self, game_id: i32) -> Result<Vec<QuestionResultModel>> {
        let results = sqlx::query_as::<_, QuestionResultModel>(
            r#"
            SELECT gq.question_number, q.question, a.answer AS chosen_answer,
                   ca.answer AS correct_answer, qr.is_correct
            FROM question_results qr
            JOIN game_questions gq ON gq.game_id = qr.game_id AND gq.question_id = qr.question_id
            JOIN questions q ON q.id = qr.question_id
            JOIN answers a ON a.id = qr.answer_id
            JOIN answers ca ON ca.question_id = qr.question_id AND ca.is_correct = TRUE
            WHERE qr.game_id = ?
            ORDER BY gq.question_number
            "#,
        )
        .bind(game_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }

    /// The user's most recent game that still has unanswered questions.
    /// Returns `(game_id, game_token)`.
    pub async fn find_incomplete_game(&self, user_id: i32) -> Result<Option<(i32, String)>> {
        let row = sqlx::query_as::<_, (i32, String)>(
            "SELECT game_id, token FROM game_stats WHERE user_id = ? AND is_complete = FALSE ORDER BY game_id DESC",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((game_id, token)) => {
                tracing::info!("found incomplete game {game_id} for user {user_id}");
                Ok(Some((game_id, token)))
            }
            None => Ok(None),
        }
    }

    pub async fn games_for_user(&self, user_id: i32) -> Result<Vec<GameSummary>> {
        let games = sqlx::query_as::<_, GameSummary>(
            r#"
            SELECT gs.game_id, gs.token, c.name AS category, gs.difficulty, gs.score,
                   gs.total_questions, gs.answered_questions, gs.is_complete
            FROM game_stats gs
            JOIN categories c ON c.id = gs.category_id
            WHERE gs.user_id = ?
            ORDER BY gs.game_id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(games)
    }
}
