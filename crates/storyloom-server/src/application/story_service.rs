//! Story Application Service (Use Case)
//!
//! Saved stories, the story collection and cover images. A generated story
//! is always saved as a pair of single-language documents (zh, then en).

use std::sync::Arc;
use uuid::Uuid;

use storyloom::{
    CollectedStory, CollectionRepository, DomainError, ImageStore, Language, Story, StoryImage,
    StoryOutline, StoryRepository,
};

/// Largest accepted cover image
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

const UNTITLED_STORY: &str = "Untitled Story";
const FEEDBACK_PLOT: &str = "AI Feedback";

/// Bilingual story to save
#[derive(Debug, Clone)]
pub struct SaveStoryParams {
    pub title_zh: String,
    pub title_en: String,
    pub content_zh: String,
    pub content_en: String,
    pub outline: StoryOutline,
}

/// The two documents written for one save
#[derive(Debug, Clone)]
pub struct SavedStories {
    pub zh: Story,
    pub en: Story,
}

/// Application service for stories, the collection and cover images
pub struct StoryService<S: StoryRepository, C: CollectionRepository, I: ImageStore> {
    stories: Arc<S>,
    collection: Arc<C>,
    images: Arc<I>,
}

impl<S, C, I> StoryService<S, C, I>
where
    S: StoryRepository,
    C: CollectionRepository,
    I: ImageStore,
{
    pub fn new(stories: Arc<S>, collection: Arc<C>, images: Arc<I>) -> Self {
        Self {
            stories,
            collection,
            images,
        }
    }

    /// Save both language versions of a story
    pub async fn save_story(&self, params: SaveStoryParams) -> Result<SavedStories, DomainError> {
        for (field, value) in [
            ("title_zh", &params.title_zh),
            ("title_en", &params.title_en),
            ("content_zh", &params.content_zh),
            ("content_en", &params.content_en),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::Validation(format!(
                    "Cannot save story: '{}' is missing",
                    field
                )));
            }
        }

        let zh = Story::new(
            params.title_zh,
            params.outline.clone(),
            params.content_zh,
            Language::Zh,
        );
        let zh = self.stories.create(&zh).await?;

        let en = Story::new(
            params.title_en,
            params.outline,
            params.content_en,
            Language::En,
        );
        let en = self.stories.create(&en).await?;

        tracing::info!("Saved story '{}' ({} / {})", en.title, zh.id, en.id);

        Ok(SavedStories { zh, en })
    }

    /// Save editorial feedback as a bilingual story pair
    pub async fn save_feedback(
        &self,
        original_title: Option<String>,
        feedback: String,
    ) -> Result<SavedStories, DomainError> {
        if feedback.trim().is_empty() {
            return Err(DomainError::Validation(
                "Cannot save empty feedback".to_string(),
            ));
        }

        let title = original_title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED_STORY.to_string());

        self.save_story(SaveStoryParams {
            title_zh: format!("關於「{}」的AI回饋", title),
            title_en: format!("AI Feedback for \"{}\"", title),
            content_zh: feedback.clone(),
            content_en: feedback,
            outline: StoryOutline {
                plot: FEEDBACK_PLOT.to_string(),
                ..StoryOutline::default()
            },
        })
        .await
    }

    /// Saved stories, newest first
    pub async fn list(&self, language: Option<Language>) -> Result<Vec<Story>, DomainError> {
        self.stories.list(language).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Story>, DomainError> {
        self.stories.find_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let deleted = self.stories.delete(id).await?;
        if deleted {
            tracing::info!("Deleted story: {}", id);
        }
        Ok(deleted)
    }

    /// Copy a saved story into the collection
    pub async fn copy_to_collection(&self, id: Uuid) -> Result<CollectedStory, DomainError> {
        let story = self
            .stories
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Story", id))?;

        let copy = self.collection.add_copy(&CollectedStory::copy_of(&story)).await?;
        tracing::info!("Copied story {} to collection as {}", id, copy.id);

        Ok(copy)
    }

    /// Collection, most recently copied first
    pub async fn list_collection(&self) -> Result<Vec<CollectedStory>, DomainError> {
        self.collection.list().await
    }

    /// Store a new cover image for a story and return its URL
    pub async fn replace_image(
        &self,
        story_id: Uuid,
        file_name: String,
        content_type: String,
        data: Vec<u8>,
    ) -> Result<String, DomainError> {
        if !content_type.starts_with("image/") {
            return Err(DomainError::Validation(format!(
                "Please upload an image file (got {})",
                content_type
            )));
        }
        if data.is_empty() {
            return Err(DomainError::Validation("Image file is empty".to_string()));
        }
        if data.len() > MAX_IMAGE_BYTES {
            return Err(DomainError::Validation(format!(
                "Image is too large ({} bytes, max {})",
                data.len(),
                MAX_IMAGE_BYTES
            )));
        }

        if self.stories.find_by_id(story_id).await?.is_none() {
            return Err(DomainError::not_found("Story", story_id));
        }

        let image = StoryImage::new(story_id, file_name, content_type, data);
        let image = self.images.put(&image).await?;
        let url = image.url();
        self.stories.set_image_url(story_id, &url).await?;

        tracing::info!("Replaced cover image for story {}: {}", story_id, url);

        Ok(url)
    }

    pub async fn get_image(&self, id: Uuid) -> Result<Option<StoryImage>, DomainError> {
        self.images.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStories(Mutex<Vec<Story>>);

    #[async_trait]
    impl StoryRepository for MemoryStories {
        async fn create(&self, story: &Story) -> Result<Story, DomainError> {
            self.0.lock().unwrap().push(story.clone());
            Ok(story.clone())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Story>, DomainError> {
            Ok(self.0.lock().unwrap().iter().find(|s| s.id == id).cloned())
        }

        async fn list(&self, language: Option<Language>) -> Result<Vec<Story>, DomainError> {
            let mut stories: Vec<Story> = self
                .0
                .lock()
                .unwrap()
                .iter()
                .filter(|s| language.map_or(true, |l| s.language == l))
                .cloned()
                .collect();
            stories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(stories)
        }

        async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
            let mut stories = self.0.lock().unwrap();
            let before = stories.len();
            stories.retain(|s| s.id != id);
            Ok(stories.len() < before)
        }

        async fn set_image_url(&self, id: Uuid, image_url: &str) -> Result<Story, DomainError> {
            let mut stories = self.0.lock().unwrap();
            let story = stories
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| DomainError::not_found("Story", id))?;
            story.image_url = Some(image_url.to_string());
            Ok(story.clone())
        }
    }

    #[derive(Default)]
    struct MemoryCollection(Mutex<Vec<CollectedStory>>);

    #[async_trait]
    impl CollectionRepository for MemoryCollection {
        async fn add_copy(&self, copy: &CollectedStory) -> Result<CollectedStory, DomainError> {
            self.0.lock().unwrap().push(copy.clone());
            Ok(copy.clone())
        }

        async fn list(&self) -> Result<Vec<CollectedStory>, DomainError> {
            Ok(self.0.lock().unwrap().iter().rev().cloned().collect())
        }
    }

    #[derive(Default)]
    struct MemoryImages(Mutex<Vec<StoryImage>>);

    #[async_trait]
    impl ImageStore for MemoryImages {
        async fn put(&self, image: &StoryImage) -> Result<StoryImage, DomainError> {
            self.0.lock().unwrap().push(image.clone());
            Ok(image.clone())
        }

        async fn get(&self, id: Uuid) -> Result<Option<StoryImage>, DomainError> {
            Ok(self.0.lock().unwrap().iter().find(|i| i.id == id).cloned())
        }
    }

    fn service() -> StoryService<MemoryStories, MemoryCollection, MemoryImages> {
        StoryService::new(
            Arc::new(MemoryStories::default()),
            Arc::new(MemoryCollection::default()),
            Arc::new(MemoryImages::default()),
        )
    }

    fn params() -> SaveStoryParams {
        SaveStoryParams {
            title_zh: "太陽去哪裡了？".to_string(),
            title_en: "Where did the sun go?".to_string(),
            content_zh: "從前，有一隻小獅子……".to_string(),
            content_en: "Once upon a time, a little lion...".to_string(),
            outline: StoryOutline::new("Leo", "forest", "sun vanished", "friendship"),
        }
    }

    #[tokio::test]
    async fn test_save_story_writes_both_languages() {
        let service = service();
        let saved = service.save_story(params()).await.unwrap();

        assert_eq!(saved.zh.language, Language::Zh);
        assert_eq!(saved.en.language, Language::En);
        assert_eq!(saved.zh.outline, saved.en.outline);

        let zh_only = service.list(Some(Language::Zh)).await.unwrap();
        assert_eq!(zh_only.len(), 1);
        assert_eq!(zh_only[0].id, saved.zh.id);
        assert_eq!(service.list(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_save_story_requires_every_field() {
        let service = service();
        let mut incomplete = params();
        incomplete.content_en = "  ".to_string();

        let err = service.save_story(incomplete).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("content_en")));
        assert!(service.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_feedback_titles() {
        let service = service();

        let saved = service
            .save_feedback(Some("The Brave Dragon".to_string()), "Great pacing.".to_string())
            .await
            .unwrap();
        assert_eq!(saved.zh.title, "關於「The Brave Dragon」的AI回饋");
        assert_eq!(saved.en.title, "AI Feedback for \"The Brave Dragon\"");
        assert_eq!(saved.en.outline.plot, "AI Feedback");
        assert_eq!(saved.zh.content, saved.en.content);

        let untitled = service
            .save_feedback(None, "Nice.".to_string())
            .await
            .unwrap();
        assert_eq!(untitled.en.title, "AI Feedback for \"Untitled Story\"");
    }

    #[tokio::test]
    async fn test_copy_to_collection() {
        let service = service();
        let saved = service.save_story(params()).await.unwrap();

        let copy = service.copy_to_collection(saved.en.id).await.unwrap();
        assert_eq!(copy.source_story_id, Some(saved.en.id));
        assert_eq!(copy.title, saved.en.title);
        assert_ne!(copy.id, saved.en.id);

        let missing = service.copy_to_collection(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(missing, DomainError::NotFound { .. }));
        assert_eq!(service.list_collection().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_replace_image() {
        let service = service();
        let saved = service.save_story(params()).await.unwrap();

        let url = service
            .replace_image(
                saved.en.id,
                "cover.png".to_string(),
                "image/png".to_string(),
                vec![0x89, b'P', b'N', b'G'],
            )
            .await
            .unwrap();
        assert!(url.starts_with("/api/images/"));

        let story = service.get(saved.en.id).await.unwrap().unwrap();
        assert_eq!(story.image_url.as_deref(), Some(url.as_str()));

        let image_id: Uuid = url.trim_start_matches("/api/images/").parse().unwrap();
        let image = service.get_image(image_id).await.unwrap().unwrap();
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.data.len(), 4);
    }

    #[tokio::test]
    async fn test_replace_image_rejects_non_images() {
        let service = service();
        let saved = service.save_story(params()).await.unwrap();

        let err = service
            .replace_image(
                saved.en.id,
                "notes.txt".to_string(),
                "text/plain".to_string(),
                b"hello".to_vec(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = service
            .replace_image(
                Uuid::new_v4(),
                "cover.png".to_string(),
                "image/png".to_string(),
                vec![1, 2, 3],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service();
        let saved = service.save_story(params()).await.unwrap();

        assert!(service.delete(saved.zh.id).await.unwrap());
        assert!(!service.delete(saved.zh.id).await.unwrap());
        assert!(service.get(saved.zh.id).await.unwrap().is_none());
    }
}
