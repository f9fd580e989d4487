//! PostgreSQL implementation of ImageStore (bytea)

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use storyloom::{DomainError, ImageStore, StoryImage};

/// Stores cover images in the `story_images` table
pub struct PgImageStore {
    pool: PgPool,
}

impl PgImageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct StoryImageRow {
    id: Uuid,
    story_id: Uuid,
    file_name: String,
    content_type: String,
    data: Vec<u8>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<StoryImageRow> for StoryImage {
    fn from(row: StoryImageRow) -> Self {
        Self {
            id: row.id,
            story_id: row.story_id,
            file_name: row.file_name,
            content_type: row.content_type,
            data: row.data,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ImageStore for PgImageStore {
    async fn put(&self, image: &StoryImage) -> Result<StoryImage, DomainError> {
        let row = sqlx::query_as::<_, StoryImageRow>(
            r#"
            INSERT INTO story_images (id, story_id, file_name, content_type, data, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(image.id)
        .bind(image.story_id)
        .bind(&image.file_name)
        .bind(&image.content_type)
        .bind(&image.data)
        .bind(image.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(e.to_string()))?;

        Ok(row.into())
    }

    async fn get(&self, id: Uuid) -> Result<Option<StoryImage>, DomainError> {
        let row = sqlx::query_as::<_, StoryImageRow>("SELECT * FROM story_images WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        Ok(row.map(Into::into))
    }
}
