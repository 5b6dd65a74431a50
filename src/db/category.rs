use color_eyre::{eyre::OptionExt, Result};

use super::models::Category;
use super::Db;

impl Db {
    pub async fn create_category(&self, name: &str) -> Result<i32> {
        let category_id: i32 =
            sqlx::query_scalar("INSERT INTO categories (name) VALUES (?) RETURNING id")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        tracing::info!("new category created: id={category_id}, name={name}");
        Ok(category_id)
    }

    /// All categories with their question counts, for the pre-game picker.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT c.id, c.name, COUNT(q.id) AS question_count
            FROM categories c
            LEFT JOIN questions q ON q.category_id = c.id
            GROUP BY c.id, c.name
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn category_name(&self, category_id: i32) -> Result<String> {
        let name: String = sqlx::query_scalar("SELECT name FROM categories WHERE id = ?")
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_eyre("could not get category name")?;

        Ok(name)
    }
}
