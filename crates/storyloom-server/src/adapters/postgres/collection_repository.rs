//! PostgreSQL implementation of CollectionRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use storyloom::{CollectedStory, CollectionRepository, DomainError, Language, StoryOutline};

/// PostgreSQL implementation of CollectionRepository
pub struct PgCollectionRepository {
    pool: PgPool,
}

impl PgCollectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CollectedStoryRow {
    id: Uuid,
    source_story_id: Option<Uuid>,
    title: String,
    outline: Json<StoryOutline>,
    content: String,
    language: String,
    image_url: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    copied_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<CollectedStoryRow> for CollectedStory {
    type Error = DomainError;

    fn try_from(row: CollectedStoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            source_story_id: row.source_story_id,
            title: row.title,
            outline: row.outline.0,
            content: row.content,
            language: row
                .language
                .parse::<Language>()
                .map_err(DomainError::Repository)?,
            image_url: row.image_url,
            created_at: row.created_at,
            copied_at: row.copied_at,
        })
    }
}

#[async_trait]
impl CollectionRepository for PgCollectionRepository {
    async fn add_copy(&self, copy: &CollectedStory) -> Result<CollectedStory, DomainError> {
        let row = sqlx::query_as::<_, CollectedStoryRow>(
            r#"
            INSERT INTO story_collections
                (id, source_story_id, title, outline, content, language, image_url, created_at, copied_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(copy.id)
        .bind(copy.source_story_id)
        .bind(&copy.title)
        .bind(Json(&copy.outline))
        .bind(&copy.content)
        .bind(copy.language.code())
        .bind(&copy.image_url)
        .bind(copy.created_at)
        .bind(copy.copied_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.try_into()
    }

    async fn list(&self) -> Result<Vec<CollectedStory>, DomainError> {
        let rows = sqlx::query_as::<_, CollectedStoryRow>(
            "SELECT * FROM story_collections ORDER BY copied_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
