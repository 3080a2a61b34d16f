//! Chat widget controller.
//!
//! DESIGN
//! ======
//! `ChatWidget` mediates between user input, the conversation store, and
//! the remote agent. A request cycle runs `Idle → Pending → Idle`:
//! `begin_cycle` appends the user message under the state lock, the agent
//! call runs with no lock held, and `finish_cycle` appends exactly one
//! assistant message. Success and failure share that last step; only the
//! content of the appended message differs.
//!
//! Visibility is independent of the cycle and may be toggled while a
//! request is in flight.
//!
//! LIFETIME
//! ========
//! A cycle holds only a weak reference to the widget. A reply that arrives
//! after every handle was dropped, or after `teardown`, is discarded.

pub mod config;
pub mod conversation;
pub mod input;
pub mod view;
pub mod visibility;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::agent::{AgentClient, AgentConfig, AgentError, AgentGenerate, AgentReply, GenerateRequest};

pub use config::WidgetConfig;
pub use conversation::{Conversation, Message, Role, SubmitRejected};
pub use input::{KeyAction, KeyPress};
pub use view::{MessageRow, PanelView, WidgetView};
pub use visibility::{ToggleCallback, VisibilityManager};

// =============================================================================
// OUTCOMES
// =============================================================================

/// How a completed request cycle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The agent's text was appended.
    Answered,
    /// The agent answered without usable text; the fallback apology was appended.
    Fallback,
    /// The request failed; the error apology was appended.
    Failed,
    /// The widget was gone when the reply arrived; nothing was appended.
    Discarded,
}

/// Result of a key press on the input field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Submitted(Result<CycleOutcome, SubmitRejected>),
    Edited,
    Ignored,
}

// =============================================================================
// STATE
// =============================================================================

struct WidgetState {
    conversation: Conversation,
    visibility: VisibilityManager,
    input: String,
    mounted: bool,
}

struct WidgetInner {
    id: Uuid,
    config: WidgetConfig,
    agent: Arc<dyn AgentGenerate>,
    state: Mutex<WidgetState>,
}

impl WidgetInner {
    fn lock_state(&self) -> MutexGuard<'_, WidgetState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn finish_cycle(&self, reply: &AgentReply) -> CycleOutcome {
        let mut state = self.lock_state();
        if !state.mounted {
            debug!(instance = %self.id, "widget: reply after teardown discarded");
            return CycleOutcome::Discarded;
        }
        let message = state.conversation.append_assistant_message(reply.content());
        debug!(instance = %self.id, message_id = %message.id, "widget: assistant message appended");
        match reply {
            AgentReply::Text(_) => CycleOutcome::Answered,
            AgentReply::MissingText => CycleOutcome::Fallback,
            AgentReply::Failed(_) => CycleOutcome::Failed,
        }
    }
}

/// One in-flight request. Owns everything the agent call needs so it can
/// run on its own task.
struct RequestCycle {
    instance: Uuid,
    agent: Arc<dyn AgentGenerate>,
    endpoint: String,
    request: GenerateRequest,
    widget: Weak<WidgetInner>,
}

impl RequestCycle {
    async fn run(self) -> CycleOutcome {
        let result = self.agent.generate(&self.endpoint, &self.request).await;
        let reply = AgentReply::from(result);
        match &reply {
            AgentReply::Failed(e) => {
                warn!(instance = %self.instance, agent = %self.endpoint, error = %e, "widget: agent request failed");
            }
            AgentReply::MissingText => {
                warn!(instance = %self.instance, agent = %self.endpoint, "widget: agent reply has no text");
            }
            AgentReply::Text(text) => {
                info!(instance = %self.instance, agent = %self.endpoint, reply_len = text.len(), "widget: agent replied");
            }
        }

        let Some(widget) = self.widget.upgrade() else {
            debug!(instance = %self.instance, "widget: dropped before reply, discarded");
            return CycleOutcome::Discarded;
        };
        widget.finish_cycle(&reply)
    }
}

// =============================================================================
// CHAT WIDGET
// =============================================================================

/// One mounted chat widget. Cloning yields another handle to the same
/// instance; separate `ChatWidget::new` calls are fully independent.
#[derive(Clone)]
pub struct ChatWidget {
    inner: Arc<WidgetInner>,
}

impl ChatWidget {
    /// Mount a widget that talks HTTP to the resolved agent server.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: WidgetConfig, agent_config: &AgentConfig) -> Result<Self, AgentError> {
        let base_url = agent_config.resolve_base_url(config.base_url.as_deref());
        let client = AgentClient::new(base_url)?;
        Ok(Self::with_agent(config, Arc::new(client)))
    }

    /// Mount a widget on any agent implementation.
    #[must_use]
    pub fn with_agent(config: WidgetConfig, agent: Arc<dyn AgentGenerate>) -> Self {
        let state = WidgetState {
            conversation: Conversation::new(&config.welcome_message),
            visibility: VisibilityManager::new(config.initially_open, config.on_toggle.clone()),
            input: String::new(),
            mounted: true,
        };
        let id = Uuid::new_v4();
        info!(instance = %id, agent = %config.agent_endpoint, controlled = state.visibility.is_controlled(), "widget: mounted");
        Self { inner: Arc::new(WidgetInner { id, config, agent, state: Mutex::new(state) }) }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.inner.config
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Snapshot of the conversation.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.inner.lock_state().conversation.messages().to_vec()
    }

    #[must_use]
    pub fn message_count(&self) -> usize {
        self.inner.lock_state().conversation.len()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.lock_state().conversation.is_pending()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.lock_state().visibility.is_open()
    }

    #[must_use]
    pub fn input(&self) -> String {
        self.inner.lock_state().input.clone()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.inner.lock_state().mounted
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Replace the input buffer, as a text field change event would. Ignored
    /// while a request is pending.
    pub fn set_input(&self, text: &str) {
        let mut state = self.inner.lock_state();
        if !state.conversation.is_pending() {
            state.input = text.to_string();
        }
    }

    /// Handle a key press on the input field. Plain Enter submits the buffer
    /// and waits for the cycle to finish.
    pub async fn key_press(&self, key: KeyPress) -> KeyOutcome {
        let action = {
            let mut state = self.inner.lock_state();
            let locked = state.conversation.is_pending();
            input::apply_key(&mut state.input, key, locked)
        };
        match action {
            KeyAction::Submit => KeyOutcome::Submitted(self.send().await),
            KeyAction::Edited => KeyOutcome::Edited,
            KeyAction::Ignored => KeyOutcome::Ignored,
        }
    }

    // -------------------------------------------------------------------------
    // Request cycle
    // -------------------------------------------------------------------------

    /// Submit the current input buffer (the send button).
    ///
    /// # Errors
    ///
    /// See [`ChatWidget::submit`].
    pub async fn send(&self) -> Result<CycleOutcome, SubmitRejected> {
        let text = self.input();
        self.submit(&text).await
    }

    /// Submit `text` and wait for the reply to be appended.
    ///
    /// Agent failures never surface here: they become an assistant message
    /// and a [`CycleOutcome::Failed`].
    ///
    /// The cycle runs on its own tokio task, so dropping this future does
    /// not strand the widget in the pending state: the reply is still
    /// appended when it arrives. Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitRejected`] for blank text, while another request is
    /// pending, or after teardown. The conversation is left unchanged.
    pub async fn submit(&self, text: &str) -> Result<CycleOutcome, SubmitRejected> {
        let handle = self.spawn_submit(text)?;
        match handle.await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                warn!(instance = %self.inner.id, error = %e, "widget: request task aborted");
                Ok(self.inner.finish_cycle(&AgentReply::Failed(AgentError::Request(e.to_string()))))
            }
        }
    }

    /// Submit `text` and run the agent call on its own tokio task.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Same as [`ChatWidget::submit`]; a rejected submission spawns nothing.
    pub fn spawn_submit(&self, text: &str) -> Result<JoinHandle<CycleOutcome>, SubmitRejected> {
        let cycle = self.begin_cycle(text)?;
        Ok(tokio::spawn(cycle.run()))
    }

    fn begin_cycle(&self, text: &str) -> Result<RequestCycle, SubmitRejected> {
        let mut state = self.inner.lock_state();
        if !state.mounted {
            return Err(SubmitRejected::Unmounted);
        }
        match state.conversation.append_user_message(text) {
            Ok(message) => {
                debug!(instance = %self.inner.id, message_id = %message.id, "widget: user message appended");
            }
            Err(reason) => {
                debug!(instance = %self.inner.id, %reason, "widget: submission rejected");
                return Err(reason);
            }
        }
        state.input.clear();

        Ok(RequestCycle {
            instance: self.inner.id,
            agent: self.inner.agent.clone(),
            endpoint: self.inner.config.agent_endpoint.clone(),
            request: GenerateRequest::user(text),
            widget: Arc::downgrade(&self.inner),
        })
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    /// Invert visibility. In controlled mode this only asks the host, through
    /// its callback, and returns the requested state.
    pub fn toggle_visibility(&self) -> bool {
        let request = self.inner.lock_state().visibility.toggle();
        let open = request.dispatch();
        debug!(instance = %self.inner.id, open, "widget: visibility toggled");
        open
    }

    /// Push the host's open flag into a controlled widget. Ignored when the
    /// widget owns its visibility.
    pub fn set_external_open(&self, open: bool) {
        self.inner.lock_state().visibility.sync(open);
    }

    // -------------------------------------------------------------------------
    // Lifetime
    // -------------------------------------------------------------------------

    /// Unmount the widget. Later submissions are rejected and replies still
    /// in flight are discarded.
    pub fn teardown(&self) {
        let mut state = self.inner.lock_state();
        if state.mounted {
            state.mounted = false;
            info!(instance = %self.inner.id, pending = state.conversation.is_pending(), "widget: torn down");
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn render(&self) -> WidgetView {
        let config = &self.inner.config;
        let state = self.inner.lock_state();
        if config.show_toggle_button && !state.visibility.is_open() {
            return WidgetView::ToggleButton;
        }
        let pending = state.conversation.is_pending();
        WidgetView::Panel(PanelView {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            show_close_button: config.show_toggle_button,
            messages: state
                .conversation
                .messages()
                .iter()
                .map(MessageRow::from)
                .collect(),
            typing: pending,
            input: state.input.clone(),
            placeholder: config.placeholder.clone(),
            input_disabled: pending,
            send_enabled: !pending && !state.input.trim().is_empty(),
        })
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
