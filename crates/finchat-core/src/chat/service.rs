//! Chat service orchestrating one user turn.
//!
//! ChatService coordinates the catalog cache, the matcher, the session store
//! and the completion client. A turn appends the user message, computes the
//! display-only shortlist, sends the windowed history with fresh guidance,
//! and appends whatever reply comes back (including offline and error text).

use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use finchat_types::chat::{ChatTurn, FirmSettings, FirmSettingsPatch, SessionInfo};
use finchat_types::config::DEFAULT_TOP_K;
use finchat_types::error::SessionError;
use finchat_types::llm::Message;
use finchat_types::service::ServiceRecord;

use crate::catalog::{CatalogSource, ServiceCatalog};
use crate::llm::completion::CompletionClient;
use crate::matcher::match_services;

use super::guidance::SystemGuidance;
use super::session_store::{SessionHandle, SessionStore};
use super::window::HistoryWindow;

/// Orchestrates chat turns across sessions.
///
/// Generic over `CatalogSource` so finchat-core never depends on
/// finchat-infra.
pub struct ChatService<S: CatalogSource> {
    catalog: ServiceCatalog<S>,
    sessions: SessionStore,
    client: CompletionClient,
    window: HistoryWindow,
    top_k: usize,
}

impl<S: CatalogSource> ChatService<S> {
    pub fn new(catalog: ServiceCatalog<S>, sessions: SessionStore, client: CompletionClient) -> Self {
        Self {
            catalog,
            sessions,
            client,
            window: HistoryWindow::unbounded(),
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_window(mut self, window: HistoryWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn client(&self) -> &CompletionClient {
        &self.client
    }

    pub fn catalog(&self) -> &ServiceCatalog<S> {
        &self.catalog
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn window(&self) -> HistoryWindow {
        self.window
    }

    // --- Catalog ---

    /// The full service catalog (loaded on first use).
    pub async fn services(&self) -> Arc<[ServiceRecord]> {
        self.catalog.load_services().await
    }

    /// Rank the catalog against `query`. Uses the configured `top_k` when
    /// none is given.
    pub async fn shortlist(&self, query: &str, top_k: Option<usize>) -> Vec<ServiceRecord> {
        let catalog = self.catalog.load_services().await;
        match_services(query, &catalog, top_k.unwrap_or(self.top_k))
    }

    // --- Turns ---

    /// Run one user turn.
    ///
    /// With no `session_id` a new session is created; an unknown id creates
    /// a session under that id. The conversation always grows by exactly
    /// two messages.
    #[instrument(skip_all, fields(session_id = tracing::field::Empty))]
    pub async fn send_message(&self, session_id: Option<Uuid>, text: &str) -> ChatTurn {
        let id = session_id.unwrap_or_else(|| self.sessions.create());
        tracing::Span::current().record("session_id", tracing::field::display(id));

        let catalog = self.catalog.load_services().await;
        let handle = self.sessions.get_or_create(id);
        let mut state = handle.lock().await;
        state.touch();

        state.conversation.append(Message::user(text));

        let shortlist = match_services(text, &catalog, self.top_k);
        debug!(
            matched = ?shortlist.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            "Service shortlist"
        );

        let guidance = SystemGuidance::for_settings(&state.settings);
        let history = state.conversation.outbound_history(&self.window);
        let model = state.settings.model.clone();

        let outcome = self.client.complete(&history, &guidance, &model).await;

        state
            .conversation
            .append(Message::assistant(outcome.content.clone()));
        state.touch();

        info!(
            status = %outcome.status,
            messages = state.conversation.len(),
            "Turn completed"
        );

        ChatTurn {
            session_id: id,
            reply: outcome.content,
            status: outcome.status,
            shortlist,
        }
    }

    // --- Session lifecycle ---

    pub fn create_session(&self) -> Uuid {
        self.sessions.create()
    }

    /// Tear down a session. Returns whether it existed.
    pub fn end_session(&self, id: &Uuid) -> bool {
        self.sessions.remove(id)
    }

    fn handle(&self, id: &Uuid) -> Result<SessionHandle, SessionError> {
        self.sessions.get(id).ok_or(SessionError::NotFound(*id))
    }

    /// User and assistant messages in order; the seed system message is omitted.
    pub async fn transcript(&self, id: &Uuid) -> Result<Vec<Message>, SessionError> {
        let handle = self.handle(id)?;
        let state = handle.lock().await;
        Ok(state.conversation.visible().cloned().collect())
    }

    pub async fn session_info(&self, id: &Uuid) -> Result<SessionInfo, SessionError> {
        let handle = self.handle(id)?;
        let state = handle.lock().await;
        Ok(state.info())
    }

    pub async fn settings(&self, id: &Uuid) -> Result<FirmSettings, SessionError> {
        let handle = self.handle(id)?;
        let state = handle.lock().await;
        Ok(state.settings.clone())
    }

    /// Apply a settings patch; takes effect from the next turn.
    pub async fn update_settings(
        &self,
        id: &Uuid,
        patch: FirmSettingsPatch,
    ) -> Result<FirmSettings, SessionError> {
        let handle = self.handle(id)?;
        let mut state = handle.lock().await;
        state.settings.apply(patch);
        info!(session_id = %id, firm = %state.settings.firm_name, model = %state.settings.model, "Session settings updated");
        Ok(state.settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use finchat_types::chat::TurnStatus;
    use finchat_types::llm::MessageRole;

    use crate::catalog::tests::{StaticSource, sample_records};
    use crate::llm::box_provider::BoxLlmProvider;
    use crate::llm::completion::tests::{FailingProvider, RecordingProvider};
    use crate::llm::completion::OFFLINE_REPLY;

    fn service_with(client: CompletionClient) -> ChatService<StaticSource> {
        ChatService::new(
            ServiceCatalog::new(StaticSource::new(sample_records())),
            SessionStore::default(),
            client,
        )
    }

    #[tokio::test]
    async fn offline_turn_appends_sentinel() {
        let service = service_with(CompletionClient::offline());

        let turn = service.send_message(None, "Hello").await;

        assert_eq!(turn.reply, OFFLINE_REPLY);
        assert_eq!(turn.status, TurnStatus::Offline);
        let transcript = service.transcript(&turn.session_id).await.unwrap();
        assert_eq!(transcript, vec![Message::user("Hello"), Message::assistant(OFFLINE_REPLY)]);
        let info = service.session_info(&turn.session_id).await.unwrap();
        assert_eq!(info.message_count, 3);
    }

    #[tokio::test]
    async fn failing_endpoint_grows_conversation_by_two() {
        let client =
            CompletionClient::new(BoxLlmProvider::new(FailingProvider), Duration::from_secs(5));
        let service = service_with(client);
        let id = service.create_session();

        let turn = service.send_message(Some(id), "Can you help?").await;

        assert_eq!(turn.session_id, id);
        assert_eq!(turn.status, TurnStatus::Failed);
        assert!(turn.reply.contains("Error reaching the model"));
        let info = service.session_info(&id).await.unwrap();
        assert_eq!(info.message_count, 3);
    }

    #[tokio::test]
    async fn shortlist_is_returned_but_not_sent() {
        let provider = RecordingProvider::new("Happy to help.");
        let requests = provider.requests.clone();
        let client = CompletionClient::new(BoxLlmProvider::new(provider), Duration::from_secs(5));
        let service = service_with(client);

        let turn = service
            .send_message(None, "I need help with my 1040 tax form")
            .await;

        let names: Vec<&str> = turn.shortlist.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Tax Prep"]);
        assert_eq!(turn.reply, "Happy to help.");

        let sent = requests.lock().unwrap();
        let request = &sent[0];
        let system = request.system.as_deref().unwrap_or_default();
        assert!(!system.contains("Tax Prep"));
        assert!(!system.contains("file your taxes"));
        assert_eq!(request.messages, vec![Message::user("I need help with my 1040 tax form")]);
    }

    #[tokio::test]
    async fn second_turn_sends_prior_exchange() {
        let provider = RecordingProvider::new("ok");
        let requests = provider.requests.clone();
        let client = CompletionClient::new(BoxLlmProvider::new(provider), Duration::from_secs(5));
        let service = service_with(client);

        let first = service.send_message(None, "q1").await;
        service.send_message(Some(first.session_id), "q2").await;

        let sent = requests.lock().unwrap();
        assert_eq!(sent.len(), 2);
        let roles: Vec<MessageRole> = sent[1].messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::User, MessageRole::Assistant, MessageRole::User]
        );
    }

    #[tokio::test]
    async fn window_limits_outbound_history() {
        let provider = RecordingProvider::new("ok");
        let requests = provider.requests.clone();
        let client = CompletionClient::new(BoxLlmProvider::new(provider), Duration::from_secs(5));
        let service = service_with(client).with_window(HistoryWindow::last(2));
        let id = service.create_session();

        for i in 0..3 {
            service.send_message(Some(id), &format!("q{i}")).await;
        }

        let sent = requests.lock().unwrap();
        let last = &sent[2];
        assert_eq!(last.messages.len(), 2);
        assert_eq!(last.messages[0], Message::assistant("ok"));
        assert_eq!(last.messages[1], Message::user("q2"));
        drop(sent);

        let info = service.session_info(&id).await.unwrap();
        assert_eq!(info.message_count, 7);
    }

    #[tokio::test]
    async fn updated_settings_apply_to_next_request() {
        let provider = RecordingProvider::new("ok");
        let requests = provider.requests.clone();
        let client = CompletionClient::new(BoxLlmProvider::new(provider), Duration::from_secs(5));
        let service = service_with(client);
        let id = service.create_session();

        let updated = service
            .update_settings(
                &id,
                FirmSettingsPatch {
                    firm_name: Some("Acme CPA".to_string()),
                    contact_email: None,
                    model: Some("gpt-4o".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.firm_name, "Acme CPA");

        service.send_message(Some(id), "hi").await;

        let sent = requests.lock().unwrap();
        assert_eq!(sent[0].model, "gpt-4o");
        assert!(sent[0].system.as_deref().unwrap().contains("Acme CPA"));
    }

    #[tokio::test]
    async fn unknown_session_is_created_on_first_turn() {
        let service = service_with(CompletionClient::offline());
        let id = Uuid::now_v7();
        assert!(service.transcript(&id).await.is_err());

        let turn = service.send_message(Some(id), "hi").await;
        assert_eq!(turn.session_id, id);
        assert_eq!(service.transcript(&id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn ended_session_is_gone() {
        let service = service_with(CompletionClient::offline());
        let id = service.create_session();
        assert!(service.end_session(&id));
        assert!(matches!(
            service.settings(&id).await,
            Err(SessionError::NotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn shortlist_honours_explicit_top_k() {
        let service = service_with(CompletionClient::offline());
        let all = service.shortlist("weather", Some(5)).await;
        assert_eq!(all.len(), 2);
        let one = service.shortlist("weather", Some(1)).await;
        assert_eq!(one[0].name, "Tax Prep");
        assert_eq!(service.services().await.len(), 2);
    }
}
