//! Session controller
//!
//! Owns the ephemeral [`Session`] and orchestrates the two collaborators:
//! the conversation store and the inference gateway. All session mutation
//! goes through the operations here; the view layer only reads.
//!
//! A single turn moves `Idle → Sending → {Succeeded | Failed} → Idle`.
//! The busy flag is a single-flight guard: overlapping sends — and, by
//! policy, conversation switches while a send is in flight — are rejected
//! as defined no-ops, never queued or interleaved. Collaborator failures
//! never escape this layer as faults: an inference failure becomes an
//! error-role message in the visible log, a store failure becomes a
//! degraded (empty/stale/unchanged) result.

use crate::ports::conversation_store::{ConversationStore, StoreUnavailable};
use crate::ports::inference::InferenceGateway;
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tutor_domain::{
    Attachment, Conversation, ConversationSummary, Message, Model, Role, Session, derive_title,
};

/// Fixed text recorded in the conversation when generation fails.
pub const INFERENCE_FAILURE_TEXT: &str = "Failed to send message. Please try again.";

/// Result of a [`SessionController::send_message`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// A user turn and a reply (assistant or error) were appended.
    Completed {
        /// Whether the follow-up save reached the store.
        persisted: bool,
    },
    /// A send was already in flight; nothing changed.
    RejectedBusy,
    /// Empty draft and no pending attachments; nothing changed.
    NothingToSend,
}

/// Result of [`SessionController::start_new_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    Done,
    /// A send is in flight; switching now could interleave two
    /// conversations, so the call is refused.
    RejectedBusy,
}

/// Result of [`SessionController::load_session`].
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded,
    /// A send is in flight; see [`SwitchOutcome::RejectedBusy`].
    RejectedBusy,
    /// The store call failed; the session is unchanged.
    Unavailable(StoreUnavailable),
}

/// Controller owning the session and driving the chat flows.
pub struct SessionController {
    session: Session,
    store: Arc<dyn ConversationStore>,
    inference: Arc<dyn InferenceGateway>,
    transcript: Arc<dyn TranscriptLogger>,
    summaries: Vec<ConversationSummary>,
}

impl SessionController {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        inference: Arc<dyn InferenceGateway>,
        model: Model,
    ) -> Self {
        Self {
            session: Session::new(model),
            store,
            inference,
            transcript: Arc::new(NoTranscriptLogger),
            summaries: Vec::new(),
        }
    }

    /// Create with a transcript logger.
    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = logger;
        self
    }

    /// Read access for the view layer.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The most recently fetched conversation list.
    pub fn conversations(&self) -> &[ConversationSummary] {
        &self.summaries
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.session.set_draft(text);
    }

    /// Select the active model. The id is stored verbatim; whether it names
    /// a known model is a presentation concern.
    pub fn set_model(&mut self, model: Model) {
        self.session.set_model(model);
    }

    /// Append files to the pending attachments, in the order supplied.
    pub fn attach_files(&mut self, files: Vec<Attachment>) {
        self.session.attach(files);
    }

    /// Remove a not-yet-sent attachment. Out of range is a no-op.
    pub fn discard_pending_attachment(&mut self, index: usize) {
        if self.session.discard_pending(index).is_none() {
            debug!("discard of pending attachment {index} ignored: out of range");
        }
    }

    /// Remove an attachment from an already-sent message and re-save the
    /// conversation so store and display converge. Unknown id or index is
    /// a no-op. Returns whether the re-save reached the store.
    pub async fn discard_sent_attachment(&mut self, message_id: &str, index: usize) -> bool {
        if !self.session.discard_sent(message_id, index) {
            debug!("discard on message {message_id} ignored: no such attachment");
            return false;
        }
        // The originating draft is gone; seed the title from the first
        // user turn instead.
        let title_seed = self
            .session
            .visible_messages()
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.persist_visible(&title_seed).await
    }

    /// Clear the working set down to a fresh, unsaved conversation.
    /// Idempotent; refused while a send is in flight.
    pub fn start_new_session(&mut self) -> SwitchOutcome {
        if self.session.is_busy() {
            debug!("new session rejected: a send is in flight");
            return SwitchOutcome::RejectedBusy;
        }
        self.session.reset();
        SwitchOutcome::Done
    }

    /// Replace the working set with a conversation fetched from the store.
    ///
    /// On store failure the session is left untouched and the failure is
    /// returned as a value — it never becomes a message in the log, which
    /// would corrupt an unrelated conversation's history.
    pub async fn load_session(&mut self, id: &str) -> LoadOutcome {
        if self.session.is_busy() {
            debug!("load of {id} rejected: a send is in flight");
            return LoadOutcome::RejectedBusy;
        }
        match self.store.get(id).await {
            Ok(conversation) => {
                info!(
                    "loaded conversation {id} ({} messages)",
                    conversation.messages.len()
                );
                self.transcript.log(TranscriptEvent::new(
                    "conversation_loaded",
                    serde_json::json!({
                        "id": id,
                        "messages": conversation.messages.len(),
                    }),
                ));
                self.session.open(conversation);
                LoadOutcome::Loaded
            }
            Err(err) => {
                warn!("could not load conversation {id}: {err}");
                LoadOutcome::Unavailable(err)
            }
        }
    }

    /// Fetch the conversation list, keeping the previous list when the
    /// store is unavailable.
    pub async fn refresh_conversations(&mut self) -> &[ConversationSummary] {
        match self.store.list().await {
            Ok(summaries) => {
                debug!("listed {} conversations", summaries.len());
                self.summaries = summaries;
            }
            Err(err) => {
                warn!("could not list conversations, keeping previous list: {err}");
            }
        }
        &self.summaries
    }

    /// Send the current draft and pending attachments as one user turn.
    ///
    /// The user message is appended before the network exchange resolves,
    /// so it is visible immediately; the reply (assistant text or the
    /// fixed failure text) follows, and the conversation is saved
    /// best-effort. Draft and pending attachments are cleared on both
    /// paths so the input area is ready for the next turn.
    pub async fn send_message(&mut self) -> SendOutcome {
        if self.session.is_busy() {
            debug!("send rejected: a send is already in flight");
            return SendOutcome::RejectedBusy;
        }
        if !self.session.has_outgoing() {
            return SendOutcome::NothingToSend;
        }

        self.session.set_busy(true);

        let draft = self.session.draft_text().to_string();
        let attachments = self.session.take_pending_attachments();
        let model = self.session.selected_model().clone();
        let user_id = self.session.next_message_id();

        info!(
            "sending message to {model} ({} bytes, {} attachments)",
            draft.len(),
            attachments.len()
        );
        self.transcript.log(TranscriptEvent::new(
            "user_message",
            serde_json::json!({
                "id": user_id,
                "model": model.to_string(),
                "bytes": draft.len(),
                "attachments": attachments.len(),
            }),
        ));

        // Optimistic append: the user turn is visible before the exchange
        // resolves.
        self.session
            .append_message(Message::user(user_id.clone(), draft.clone(), attachments));

        let outcome = {
            let sent: &[Attachment] = self
                .session
                .visible_messages()
                .last()
                .map(|m| m.attachments.as_slice())
                .unwrap_or(&[]);
            self.inference.generate(&model, &draft, sent).await
        };

        match outcome {
            Ok(text) => {
                debug!("assistant reply received ({} bytes)", text.len());
                self.transcript.log(TranscriptEvent::new(
                    "assistant_response",
                    serde_json::json!({
                        "model": model.to_string(),
                        "bytes": text.len(),
                        "text": text,
                    }),
                ));
                self.session
                    .append_message(Message::assistant(format!("{user_id}-response"), text));
            }
            Err(err) => {
                warn!("inference failed: {err}");
                self.transcript.log(TranscriptEvent::new(
                    "inference_error",
                    serde_json::json!({
                        "model": model.to_string(),
                        "error": err.to_string(),
                    }),
                ));
                let error_id = self.session.next_message_id();
                self.session
                    .append_message(Message::error(error_id, INFERENCE_FAILURE_TEXT));
            }
        }

        let persisted = self.persist_visible(&draft).await;

        self.session.clear_input();
        self.session.set_busy(false);

        SendOutcome::Completed { persisted }
    }

    /// Best-effort save of the visible conversation. A failure is logged
    /// and reported but never rolls back the in-memory log: the session is
    /// authoritative for what the user sees.
    async fn persist_visible(&self, title_seed: &str) -> bool {
        let now = Utc::now();
        let conversation = Conversation {
            id: self.session.active_conversation_id().map(str::to_string),
            title: derive_title(title_seed),
            messages: self.session.visible_messages().to_vec(),
            created_at: self.session.conversation_created_at().unwrap_or(now),
            last_updated: now,
        };

        match self.store.save(&conversation).await {
            Ok(summary) => {
                debug!("conversation saved as {}", summary.id);
                self.transcript.log(TranscriptEvent::new(
                    "conversation_saved",
                    serde_json::json!({
                        "id": summary.id,
                        "title": summary.title,
                        "messages": summary.message_count,
                    }),
                ));
                true
            }
            Err(err) => {
                warn!("conversation save failed: {err}");
                self.transcript.log(TranscriptEvent::new(
                    "save_failed",
                    serde_json::json!({ "error": err.reason() }),
                ));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::inference::InferenceError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Test Mocks ====================

    struct MockStore {
        list_responses: Mutex<VecDeque<Result<Vec<ConversationSummary>, StoreUnavailable>>>,
        get_responses: Mutex<VecDeque<Result<Conversation, StoreUnavailable>>>,
        save_fails: bool,
        saved: Mutex<Vec<Conversation>>,
        calls: AtomicUsize,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                list_responses: Mutex::new(VecDeque::new()),
                get_responses: Mutex::new(VecDeque::new()),
                save_fails: false,
                saved: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing_save(mut self) -> Self {
            self.save_fails = true;
            self
        }

        fn push_get(self, result: Result<Conversation, StoreUnavailable>) -> Self {
            self.get_responses.lock().unwrap().push_back(result);
            self
        }

        fn push_list(
            self,
            result: Result<Vec<ConversationSummary>, StoreUnavailable>,
        ) -> Self {
            self.list_responses.lock().unwrap().push_back(result);
            self
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn saved_conversations(&self) -> Vec<Conversation> {
            self.saved.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ConversationStore for MockStore {
        async fn list(&self) -> Result<Vec<ConversationSummary>, StoreUnavailable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.list_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn get(&self, _id: &str) -> Result<Conversation, StoreUnavailable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.get_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(StoreUnavailable::transport("no scripted response")))
        }

        async fn save(
            &self,
            conversation: &Conversation,
        ) -> Result<ConversationSummary, StoreUnavailable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.save_fails {
                return Err(StoreUnavailable::transport("store down"));
            }
            self.saved.lock().unwrap().push(conversation.clone());
            Ok(ConversationSummary {
                id: conversation
                    .id
                    .clone()
                    .unwrap_or_else(|| "assigned-1".to_string()),
                title: conversation.title.clone(),
                created_at: conversation.created_at,
                message_count: conversation.messages.len(),
            })
        }
    }

    struct MockInference {
        responses: Mutex<VecDeque<Result<String, InferenceError>>>,
        calls: AtomicUsize,
    }

    impl MockInference {
        fn replying(text: &str) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(vec![Ok(text.to_string())])),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(vec![Err(InferenceError::BadStatus(500))])),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl InferenceGateway for MockInference {
        async fn generate(
            &self,
            _model: &Model,
            _prompt: &str,
            _attachments: &[Attachment],
        ) -> Result<String, InferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(InferenceError::RequestFailed("no scripted reply".into())))
        }
    }

    fn attachment(name: &str) -> Attachment {
        Attachment::new(name, "text/plain", b"data".to_vec())
    }

    fn stored_conversation(id: &str, contents: &[&str]) -> Conversation {
        Conversation {
            id: Some(id.to_string()),
            title: "Stored".to_string(),
            messages: contents
                .iter()
                .enumerate()
                .map(|(i, c)| Message::user(format!("m{i}"), *c, vec![]))
                .collect(),
            created_at: Utc::now(),
            last_updated: Utc::now(),
        }
    }

    fn controller(
        store: Arc<MockStore>,
        inference: Arc<MockInference>,
    ) -> SessionController {
        SessionController::new(store, inference, Model::default())
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn attach_files_concatenates_in_call_order() {
        let store = Arc::new(MockStore::new());
        let inference = Arc::new(MockInference::replying("ok"));
        let mut controller = controller(store, inference);

        controller.attach_files(vec![attachment("a"), attachment("b")]);
        controller.attach_files(vec![attachment("c")]);

        let names: Vec<_> = controller
            .session()
            .pending_attachments()
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn empty_send_is_a_noop_with_zero_collaborator_calls() {
        let store = Arc::new(MockStore::new());
        let inference = Arc::new(MockInference::replying("ok"));
        let mut controller = controller(store.clone(), inference.clone());

        let outcome = controller.send_message().await;

        assert_eq!(outcome, SendOutcome::NothingToSend);
        assert!(controller.session().visible_messages().is_empty());
        assert!(controller.session().draft_text().is_empty());
        assert!(controller.session().pending_attachments().is_empty());
        assert_eq!(store.call_count(), 0);
        assert_eq!(inference.call_count(), 0);
    }

    #[tokio::test]
    async fn successful_send_appends_user_then_assistant() {
        let store = Arc::new(MockStore::new());
        let inference = Arc::new(MockInference::replying("Chlorophyll absorbs light."));
        let mut controller = controller(store.clone(), inference.clone());

        controller.set_draft("Explain photosynthesis");
        let outcome = controller.send_message().await;

        assert_eq!(outcome, SendOutcome::Completed { persisted: true });

        let messages = controller.session().visible_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "Explain photosynthesis");
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "Chlorophyll absorbs light.");
        assert_eq!(messages[1].id, format!("{}-response", messages[0].id));

        assert!(controller.session().draft_text().is_empty());
        assert!(controller.session().pending_attachments().is_empty());
        assert!(!controller.session().is_busy());
        assert_eq!(inference.call_count(), 1);
    }

    #[tokio::test]
    async fn attachments_transfer_into_the_sent_message() {
        let store = Arc::new(MockStore::new());
        let inference = Arc::new(MockInference::replying("ok"));
        let mut controller = controller(store, inference);

        controller.set_draft("grade this");
        controller.attach_files(vec![attachment("essay.txt"), attachment("scan.png")]);
        controller.send_message().await;

        let user = &controller.session().visible_messages()[0];
        let names: Vec<_> = user.attachments.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["essay.txt", "scan.png"]);
        assert!(controller.session().pending_attachments().is_empty());
    }

    #[tokio::test]
    async fn failed_inference_appends_error_and_still_saves() {
        let store = Arc::new(MockStore::new());
        let inference = Arc::new(MockInference::failing());
        let mut controller = controller(store.clone(), inference);

        controller.set_draft("Explain photosynthesis");
        let outcome = controller.send_message().await;

        assert_eq!(outcome, SendOutcome::Completed { persisted: true });

        let messages = controller.session().visible_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Error);
        assert_eq!(messages[1].content, INFERENCE_FAILURE_TEXT);

        // The save attempt still happened
        assert_eq!(store.saved_conversations().len(), 1);
        assert!(controller.session().draft_text().is_empty());
        assert!(!controller.session().is_busy());
    }

    #[tokio::test]
    async fn save_failure_does_not_roll_back_the_visible_log() {
        let store = Arc::new(MockStore::new().failing_save());
        let inference = Arc::new(MockInference::replying("ok"));
        let mut controller = controller(store, inference);

        controller.set_draft("hello");
        let outcome = controller.send_message().await;

        assert_eq!(outcome, SendOutcome::Completed { persisted: false });
        assert_eq!(controller.session().visible_messages().len(), 2);
        assert!(controller.session().draft_text().is_empty());
    }

    #[tokio::test]
    async fn send_while_busy_is_rejected() {
        let store = Arc::new(MockStore::new());
        let inference = Arc::new(MockInference::replying("ok"));
        let mut controller = controller(store.clone(), inference.clone());

        controller.set_draft("first");
        controller.session.set_busy(true);

        let outcome = controller.send_message().await;

        assert_eq!(outcome, SendOutcome::RejectedBusy);
        assert!(controller.session().visible_messages().is_empty());
        assert_eq!(controller.session().draft_text(), "first");
        assert_eq!(store.call_count(), 0);
        assert_eq!(inference.call_count(), 0);
    }

    #[tokio::test]
    async fn switching_is_rejected_while_busy() {
        let store = Arc::new(
            MockStore::new().push_get(Ok(stored_conversation("c1", &["hi"]))),
        );
        let inference = Arc::new(MockInference::replying("ok"));
        let mut controller = controller(store.clone(), inference);

        controller.session.set_busy(true);

        assert_eq!(controller.start_new_session(), SwitchOutcome::RejectedBusy);
        assert!(matches!(
            controller.load_session("c1").await,
            LoadOutcome::RejectedBusy
        ));
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn repeated_load_is_last_write_wins() {
        let first = stored_conversation("c1", &["one"]);
        let second = stored_conversation("c1", &["one", "two"]);
        let store = Arc::new(
            MockStore::new()
                .push_get(Ok(first))
                .push_get(Ok(second)),
        );
        let inference = Arc::new(MockInference::replying("ok"));
        let mut controller = controller(store, inference);

        assert!(matches!(
            controller.load_session("c1").await,
            LoadOutcome::Loaded
        ));
        assert_eq!(controller.session().visible_messages().len(), 1);

        assert!(matches!(
            controller.load_session("c1").await,
            LoadOutcome::Loaded
        ));
        assert_eq!(controller.session().visible_messages().len(), 2);
        assert_eq!(controller.session().active_conversation_id(), Some("c1"));
    }

    #[tokio::test]
    async fn failed_load_leaves_session_unchanged() {
        let store = Arc::new(
            MockStore::new().push_get(Err(StoreUnavailable::transport("down"))),
        );
        let inference = Arc::new(MockInference::replying("ok"));
        let mut controller = controller(store, inference);

        controller.set_draft("keep me");
        let outcome = controller.load_session("c1").await;

        assert!(matches!(outcome, LoadOutcome::Unavailable(_)));
        assert_eq!(controller.session().draft_text(), "keep me");
        assert!(controller.session().visible_messages().is_empty());
        assert!(controller.session().active_conversation_id().is_none());
    }

    #[tokio::test]
    async fn long_draft_is_saved_with_truncated_title() {
        let store = Arc::new(MockStore::new());
        let inference = Arc::new(MockInference::replying("ok"));
        let mut controller = controller(store.clone(), inference);

        controller.set_draft("a".repeat(60));
        controller.send_message().await;

        let saved = store.saved_conversations();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].title, "a".repeat(50));
    }

    #[tokio::test]
    async fn attachment_only_send_gets_default_title() {
        let store = Arc::new(MockStore::new());
        let inference = Arc::new(MockInference::replying("ok"));
        let mut controller = controller(store.clone(), inference);

        controller.attach_files(vec![attachment("worksheet.pdf")]);
        let outcome = controller.send_message().await;

        assert_eq!(outcome, SendOutcome::Completed { persisted: true });
        let saved = store.saved_conversations();
        assert_eq!(saved[0].title, "New Conversation");
    }

    #[tokio::test]
    async fn start_new_session_clears_and_is_idempotent() {
        let store = Arc::new(
            MockStore::new().push_get(Ok(stored_conversation("c1", &["hi"]))),
        );
        let inference = Arc::new(MockInference::replying("ok"));
        let mut controller = controller(store, inference);

        controller.load_session("c1").await;
        controller.set_draft("half-typed");
        controller.attach_files(vec![attachment("a")]);

        assert_eq!(controller.start_new_session(), SwitchOutcome::Done);
        assert_eq!(controller.start_new_session(), SwitchOutcome::Done);

        assert!(controller.session().active_conversation_id().is_none());
        assert!(controller.session().visible_messages().is_empty());
        assert!(controller.session().draft_text().is_empty());
        assert!(controller.session().pending_attachments().is_empty());
    }

    #[tokio::test]
    async fn refresh_keeps_previous_list_when_store_fails() {
        let summary = ConversationSummary {
            id: "c1".to_string(),
            title: "Math Paper Analysis".to_string(),
            created_at: Utc::now(),
            message_count: 5,
        };
        let store = Arc::new(
            MockStore::new()
                .push_list(Ok(vec![summary.clone()]))
                .push_list(Err(StoreUnavailable::transport("down"))),
        );
        let inference = Arc::new(MockInference::replying("ok"));
        let mut controller = controller(store, inference);

        let listed = controller.refresh_conversations().await.to_vec();
        assert_eq!(listed, vec![summary.clone()]);

        let listed_again = controller.refresh_conversations().await.to_vec();
        assert_eq!(listed_again, vec![summary]);
    }

    #[tokio::test]
    async fn discarding_a_sent_attachment_triggers_a_resave() {
        let store = Arc::new(MockStore::new());
        let inference = Arc::new(MockInference::replying("ok"));
        let mut controller = controller(store.clone(), inference);

        controller.set_draft("grade this essay please");
        controller.attach_files(vec![attachment("essay.txt")]);
        controller.send_message().await;

        let user_id = controller.session().visible_messages()[0].id.clone();
        let resaved = controller.discard_sent_attachment(&user_id, 0).await;

        assert!(resaved);
        let saved = store.saved_conversations();
        assert_eq!(saved.len(), 2);
        assert!(saved[1].messages[0].attachments.is_empty());
        // Title re-derived from the first user turn
        assert_eq!(saved[1].title, "grade this essay please");
    }

    #[tokio::test]
    async fn discarding_out_of_range_sent_attachment_is_a_noop() {
        let store = Arc::new(MockStore::new());
        let inference = Arc::new(MockInference::replying("ok"));
        let mut controller = controller(store.clone(), inference);

        controller.set_draft("hello");
        controller.send_message().await;
        let saves_after_send = store.saved_conversations().len();

        assert!(!controller.discard_sent_attachment("missing", 0).await);
        assert_eq!(store.saved_conversations().len(), saves_after_send);
    }

    #[tokio::test]
    async fn existing_conversation_keeps_id_and_creation_time_on_save() {
        let original = stored_conversation("c1", &["earlier"]);
        let created_at = original.created_at;
        let store = Arc::new(MockStore::new().push_get(Ok(original)));
        let inference = Arc::new(MockInference::replying("ok"));
        let mut controller = controller(store.clone(), inference);

        controller.load_session("c1").await;
        controller.set_draft("follow-up");
        controller.send_message().await;

        let saved = store.saved_conversations();
        assert_eq!(saved[0].id.as_deref(), Some("c1"));
        assert_eq!(saved[0].created_at, created_at);
        assert_eq!(saved[0].messages.len(), 3);
    }
}
