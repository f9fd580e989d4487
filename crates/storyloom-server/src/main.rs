use anyhow::Context;
use axum::{middleware, Router};
use shuttle_runtime::SecretStore;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use storyloom::{GenerationConfig, StoryFlows};

mod adapters;
mod application;
mod auth;
mod models;
mod routes;

use adapters::{GeminiClient, PgCollectionRepository, PgImageStore, PgStoryRepository};
use application::StoryService;

/// Type aliases for application services with concrete adapter implementations
pub type AppFlows = StoryFlows<GeminiClient>;
pub type AppStoryService = StoryService<PgStoryRepository, PgCollectionRepository, PgImageStore>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub flows: AppFlows,
    pub story_service: Arc<AppStoryService>,
}

/// Build the generation config from secrets, failing on a missing or malformed key
fn generation_config(secrets: &SecretStore) -> anyhow::Result<GenerationConfig> {
    let api_key = secrets
        .get("GEMINI_API_KEY")
        .or_else(|| secrets.get("GOOGLE_GENAI_API_KEY"))
        .context("GEMINI_API_KEY secret is not set")?;

    let mut config = GenerationConfig::new(api_key).context("GEMINI_API_KEY is not usable")?;

    if let Some(model) = secrets.get("GEMINI_MODEL") {
        config = config.with_model(model).context("GEMINI_MODEL is not usable")?;
    }
    if let Some(base_url) = secrets.get("GEMINI_BASE_URL") {
        config = config.with_base_url(base_url);
    }

    Ok(config)
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("📖 Storyloom API initializing...");

    // Initialize API key from secrets
    if let Some(api_key) = secrets.get("STORYLOOM_API_KEY") {
        auth::init_api_key(api_key);
        tracing::info!("🔐 API key authentication enabled");
    } else {
        tracing::warn!("⚠️  No STORYLOOM_API_KEY set - authentication disabled");
    }

    // Generation service (required)
    let config = generation_config(&secrets)?;
    tracing::info!(
        "✨ Gemini configured: model {} ({})",
        config.model,
        config.key_fingerprint()
    );

    storyloom::flows::check_templates().map_err(anyhow::Error::msg)?;
    tracing::info!("📝 Prompt templates checked");

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("✅ Database migrations completed");

    let gemini = GeminiClient::new(config).context("Failed to build Gemini HTTP client")?;
    let flows = StoryFlows::new(Arc::new(gemini));

    let story_service = Arc::new(StoryService::new(
        Arc::new(PgStoryRepository::new(pool.clone())),
        Arc::new(PgCollectionRepository::new(pool.clone())),
        Arc::new(PgImageStore::new(pool)),
    ));

    let state = AppState {
        flows,
        story_service,
    };

    // Protected routes (require authentication)
    let protected_routes = Router::new()
        .merge(routes::flows::router())
        .merge(routes::stories::router())
        .merge(routes::collections::router())
        .merge(routes::diagnostics::router())
        .layer(middleware::from_fn(auth::auth_middleware));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    // Build router with shared state
    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(routes::health::router())
        .merge(routes::images::router())
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Storyloom API ready");

    Ok(router.into())
}
