//! PostgreSQL implementation of StoryRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use storyloom::{DomainError, Language, Story, StoryOutline, StoryRepository};

/// PostgreSQL implementation of StoryRepository
pub struct PgStoryRepository {
    pool: PgPool,
}

impl PgStoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct StoryRow {
    id: Uuid,
    title: String,
    outline: Json<StoryOutline>,
    content: String,
    language: String,
    image_url: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<StoryRow> for Story {
    type Error = DomainError;

    fn try_from(row: StoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            title: row.title,
            outline: row.outline.0,
            content: row.content,
            language: row
                .language
                .parse::<Language>()
                .map_err(DomainError::Repository)?,
            image_url: row.image_url,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl StoryRepository for PgStoryRepository {
    async fn create(&self, story: &Story) -> Result<Story, DomainError> {
        let row = sqlx::query_as::<_, StoryRow>(
            r#"
            INSERT INTO stories (id, title, outline, content, language, image_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(story.id)
        .bind(&story.title)
        .bind(Json(&story.outline))
        .bind(&story.content)
        .bind(story.language.code())
        .bind(&story.image_url)
        .bind(story.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Story>, DomainError> {
        let row = sqlx::query_as::<_, StoryRow>("SELECT * FROM stories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list(&self, language: Option<Language>) -> Result<Vec<Story>, DomainError> {
        let rows = match language {
            Some(language) => {
                sqlx::query_as::<_, StoryRow>(
                    "SELECT * FROM stories WHERE language = $1 ORDER BY created_at DESC",
                )
                .bind(language.code())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, StoryRow>("SELECT * FROM stories ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM stories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_image_url(&self, id: Uuid, image_url: &str) -> Result<Story, DomainError> {
        let row = sqlx::query_as::<_, StoryRow>(
            "UPDATE stories SET image_url = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?
        .ok_or_else(|| DomainError::not_found("Story", id))?;

        row.try_into()
    }
}
