use color_eyre::Result;

use super::models::{CategoryScore, LeaderboardEntry};
use super::Db;

impl Db {
    /// Upsert the user's per-category tally using a transaction executor, so
    /// it commits or rolls back together with the answer being recorded.
    pub(super) async fn bump_score_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        user_id: i32,
        category_id: i32,
        correct: bool,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO scores (user_id, category_id, num_answered, num_correct)
            VALUES (?, ?, 1, ?)
            ON CONFLICT(user_id, category_id)
            DO UPDATE SET num_answered = num_answered + 1,
                          num_correct = num_correct + excluded.num_correct
            "#,
        )
        .bind(user_id)
        .bind(category_id)
        .bind(correct as i32)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// The user's running tallies, one row per category played.
    pub async fn user_scores(&self, user_id: i32) -> Result<Vec<CategoryScore>> {
        let scores = sqlx::query_as::<_, CategoryScore>(
            r#"
            SELECT c.name AS category, s.num_answered, s.num_correct
            FROM scores s
            JOIN categories c ON c.id = s.category_id
            WHERE s.user_id = ?
            ORDER BY c.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(scores)
    }

    /// Top users by total correct answers across all categories.
    pub async fn leaderboard(&self, limit: i32) -> Result<Vec<LeaderboardEntry>> {
        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT u.username,
                   COALESCE(SUM(s.num_correct), 0) AS total_correct,
                   COALESCE(SUM(s.num_answered), 0) AS total_answered
            FROM scores s
            JOIN users u ON u.id = s.user_id
            GROUP BY u.id, u.username
            ORDER BY total_correct DESC, total_answered ASC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
