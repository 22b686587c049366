//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both the CLI and
//! the REST API. `ChatService` is generic over its catalog source; AppState
//! pins it to the YAML file source from finchat-infra.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use finchat_core::catalog::ServiceCatalog;
use finchat_core::chat::service::ChatService;
use finchat_core::chat::session_store::SessionStore;
use finchat_core::chat::window::HistoryWindow;
use finchat_core::llm::completion::CompletionClient;
use finchat_core::secret::SecretService;
use finchat_infra::catalog::YamlCatalogSource;
use finchat_infra::config::{apply_env_overrides, load_config, resolve_data_dir};
use finchat_infra::llm::build_completion_client;
use finchat_infra::secret::{build_secret_chain, resolve_api_key};
use finchat_types::config::AppConfig;

/// Chat service pinned to the on-disk YAML catalog.
pub type ConcreteChatService = ChatService<YamlCatalogSource>;

/// Upper bound on how often the idle-session sweeper runs.
const SESSION_SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// Shared application state.
///
/// Cheap to clone; used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Initialize the application state: load config, resolve the API key,
    /// wire the chat service.
    ///
    /// `catalog_override` (from `--catalog`) takes precedence over the config
    /// file and `FINCHAT_CATALOG`.
    pub async fn init(catalog_override: Option<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        let mut config = load_config(&data_dir).await;
        apply_env_overrides(&mut config);
        if let Some(path) = catalog_override {
            config.catalog_path = path;
        }

        let secret_service = SecretService::new(build_secret_chain(&data_dir));
        let api_key = resolve_api_key(&secret_service).await;
        let client = build_completion_client(&config, api_key);

        tracing::debug!(
            data_dir = %data_dir.display(),
            catalog = %config.catalog_path.display(),
            online = client.is_configured(),
            "Application state initialized"
        );

        Ok(Self::from_parts(config, client))
    }

    /// Wire the state from an already-resolved config and client.
    pub fn from_parts(config: AppConfig, client: CompletionClient) -> Self {
        let catalog = ServiceCatalog::new(YamlCatalogSource::new(&config.catalog_path));
        let sessions = SessionStore::new(config.firm.clone());
        let chat_service = ChatService::new(catalog, sessions, client)
            .with_window(HistoryWindow::from_config(config.history_window))
            .with_top_k(config.top_k);

        Self {
            chat_service: Arc::new(chat_service),
            config: Arc::new(config),
        }
    }

    /// Spawn the background task that evicts idle sessions.
    ///
    /// Returns `None` when `session_idle_secs` is zero.
    pub fn spawn_session_sweeper(&self) -> Option<JoinHandle<()>> {
        if self.config.session_idle_secs == 0 {
            return None;
        }
        let max_idle = Duration::from_secs(self.config.session_idle_secs);
        let period = max_idle.min(SESSION_SWEEP_PERIOD);
        Some(tokio::spawn(sweep_idle_sessions(
            Arc::clone(&self.chat_service),
            max_idle,
            period,
        )))
    }
}

/// Evict sessions idle for longer than `max_idle`, once per `period`,
/// until the task is aborted.
pub async fn sweep_idle_sessions(
    chat_service: Arc<ConcreteChatService>,
    max_idle: Duration,
    period: Duration,
) {
    let max_idle = match chrono::Duration::from_std(max_idle) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(error = %e, "Session idle limit out of range, eviction disabled");
            return;
        }
    };

    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        let evicted = chat_service.sessions().evict_idle(max_idle);
        if evicted > 0 {
            tracing::info!(
                evicted,
                remaining = chat_service.sessions().len(),
                "Evicted idle sessions"
            );
        }
    }
}
