use color_eyre::{eyre::OptionExt, Result};

use super::models::{AnswerModel, QuestionModel};
use super::Db;

impl Db {
    /// Insert a question with its correct answer and wrong answers atomically.
    /// Returns the id of the new question.
    pub async fn create_question(
        &self,
        question: &str,
        category_id: i32,
        difficulty: i32,
        correct_answer: &str,
        wrong_answers: &[String],
    ) -> Result<i32> {
        let mut tx = self.pool.begin().await?;

        let question_id: i32 = sqlx::query_scalar(
            "INSERT INTO questions (question, category_id, difficulty) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(question)
        .bind(category_id)
        .bind(difficulty)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO answers (answer, is_correct, question_id) VALUES (?, TRUE, ?)")
            .bind(correct_answer)
            .bind(question_id)
            .execute(&mut *tx)
            .await?;

        for wrong in wrong_answers {
            sqlx::query(
                "INSERT INTO answers (answer, is_correct, question_id) VALUES (?, FALSE, ?)",
            )
            .bind(wrong)
            .bind(question_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!("new question created: id={question_id}, category={category_id}, difficulty={difficulty}");
        Ok(question_id)
    }

    pub async fn get_question(&self, question_id: i32) -> Result<QuestionModel> {
        let question = sqlx::query_as::<_, QuestionModel>(
            "SELECT id, question, category_id, difficulty, times_answered, times_correct FROM questions WHERE id = ?",
        )
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_eyre("could not get question")?;

        Ok(question)
    }

    pub async fn get_answers(&self, question_id: i32) -> Result<Vec<AnswerModel>> {
        let answers = sqlx::query_as::<_, AnswerModel>(
            "SELECT id, question_id, is_correct, answer FROM answers WHERE question_id = ?",
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(answers)
    }

    pub async fn questions_count(&self, category_id: i32, difficulty: i32) -> Result<i32> {
        let count: i32 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM questions WHERE category_id = ? AND difficulty = ?",
        )
        .bind(category_id)
        .bind(difficulty)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Record a flag marking the question for review.
    pub async fn flag_question(&self, question_id: i32) -> Result<i32> {
        let flag_id: i32 =
            sqlx::query_scalar("INSERT INTO flags (question_id) VALUES (?) RETURNING id")
                .bind(question_id)
                .fetch_one(&self.pool)
                .await?;

        tracing::info!("question {question_id} flagged for review (flag_id={flag_id})");
        Ok(flag_id)
    }

    pub async fn flags_count(&self, question_id: i32) -> Result<i32> {
        let count: i32 = sqlx::query_scalar("SELECT COUNT(*) FROM flags WHERE question_id = ?")
            .bind(question_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
