//! # agent-chat-widget
//!
//! Embeddable chat widget core. Holds a conversation thread, forwards user
//! messages to a remote agent over HTTP, and appends the agent's reply.
//!
//! The crate renders nothing itself: hosts draw the [`widget::WidgetView`]
//! returned by [`ChatWidget::render`] and feed input events back in.

pub mod agent;
pub mod widget;

pub use agent::{AgentClient, AgentConfig, AgentError, AgentGenerate};
pub use widget::{ChatWidget, CycleOutcome, KeyOutcome, KeyPress, WidgetConfig, WidgetView};
