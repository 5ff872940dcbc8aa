//! Application state wiring the chat service together.
//!
//! AppState holds the concrete service instances used by both the CLI and the
//! HTTP API. `ChatService` is generic over its repository; AppState pins it to
//! the SQLite implementation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use supportdesk_core::chat::service::{ChatService, ChatSettings};
use supportdesk_core::llm::box_provider::BoxLlmProvider;
use supportdesk_infra::config::{load_config, resolve_database_url};
use supportdesk_infra::filesystem::{ensure_data_dir, resolve_data_dir};
use supportdesk_infra::llm::create_provider;
use supportdesk_infra::secret::resolve_api_key;
use supportdesk_infra::sqlite::conversation::SqliteConversationRepository;
use supportdesk_infra::sqlite::pool::DatabasePool;
use supportdesk_types::config::AppConfig;

/// Concrete type alias for the chat service pinned to the SQLite repository.
pub type ConcreteChatService = ChatService<SqliteConversationRepository>;

/// Shared application state.
///
/// Used by both CLI commands and HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub config: Arc<AppConfig>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        Self::init_in(resolve_data_dir()).await
    }

    /// Same as [`AppState::init`] with an explicit data directory.
    pub async fn init_in(data_dir: PathBuf) -> anyhow::Result<Self> {
        ensure_data_dir(&data_dir)
            .await
            .with_context(|| format!("failed to create data dir {}", data_dir.display()))?;

        let config = load_config(&data_dir).await;

        let db_url = resolve_database_url(&config, &data_dir);
        let db_pool = DatabasePool::new(&db_url)
            .await
            .with_context(|| format!("failed to open database {db_url}"))?;

        let provider = build_provider(&config)?;

        Ok(Self::from_parts(config, data_dir, db_pool, provider))
    }

    /// Wire the chat service from already-built parts.
    pub fn from_parts(
        config: AppConfig,
        data_dir: PathBuf,
        db_pool: DatabasePool,
        provider: Option<BoxLlmProvider>,
    ) -> Self {
        let repo = SqliteConversationRepository::new(db_pool.clone());
        let chat_service = ChatService::new(repo, provider, ChatSettings::from(&config));

        Self {
            chat_service: Arc::new(chat_service),
            config: Arc::new(config),
            data_dir,
            db_pool,
        }
    }
}

/// Build the completion provider, or `None` when its API key is not set.
///
/// A missing key is not fatal: history reads and the CLI keep working, and
/// the message endpoint reports `NOT_CONFIGURED`.
fn build_provider(config: &AppConfig) -> anyhow::Result<Option<BoxLlmProvider>> {
    let env_var = config.provider.resolved_api_key_env();
    let Some(api_key) = resolve_api_key(env_var) else {
        tracing::warn!(
            env_var,
            "Completion API key not set; messages will be rejected until it is"
        );
        return Ok(None);
    };

    let provider = create_provider(&config.provider, api_key)
        .map_err(|e| anyhow::anyhow!("invalid provider configuration: {e}"))?;
    Ok(Some(provider))
}
