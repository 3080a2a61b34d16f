//! Per-instance widget options.

use std::fmt;

use crate::agent::DEFAULT_AGENT_ENDPOINT;

use super::visibility::ToggleCallback;

pub const DEFAULT_WELCOME_MESSAGE: &str = "Hi! I'm Trung's AI resume assistant. I can help you learn about his professional background, skills, and experience. What would you like to know?";
pub const DEFAULT_PLACEHOLDER: &str = "Ask about experience, skills...";
pub const DEFAULT_TITLE: &str = "AI Resume Assistant";
pub const DEFAULT_SUBTITLE: &str = "Chat with Trung's AI assistant";

/// Options for one widget instance. Every field has a default; the
/// `with_*` setters override them.
#[derive(Clone)]
pub struct WidgetConfig {
    /// Overrides the configured agent server address.
    pub base_url: Option<String>,
    pub agent_endpoint: String,
    pub welcome_message: String,
    pub placeholder: String,
    pub title: String,
    pub subtitle: String,
    pub initially_open: bool,
    /// Presence switches the widget into controlled visibility mode.
    pub on_toggle: Option<ToggleCallback>,
    /// Render a floating open button while closed instead of the panel.
    pub show_toggle_button: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            agent_endpoint: DEFAULT_AGENT_ENDPOINT.to_string(),
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            title: DEFAULT_TITLE.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
            initially_open: true,
            on_toggle: None,
            show_toggle_button: false,
        }
    }
}

impl WidgetConfig {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_agent_endpoint(mut self, agent_endpoint: impl Into<String>) -> Self {
        self.agent_endpoint = agent_endpoint.into();
        self
    }

    #[must_use]
    pub fn with_welcome_message(mut self, welcome_message: impl Into<String>) -> Self {
        self.welcome_message = welcome_message.into();
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        self.title = title.into();
        self.subtitle = subtitle.into();
        self
    }

    #[must_use]
    pub fn with_initially_open(mut self, open: bool) -> Self {
        self.initially_open = open;
        self
    }

    /// Hand visibility to the host. The widget will call `on_toggle` with the
    /// requested state and wait for the host to push it back.
    #[must_use]
    pub fn with_controlled_visibility(mut self, on_toggle: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.on_toggle = Some(std::sync::Arc::new(on_toggle));
        self
    }

    #[must_use]
    pub fn with_toggle_button(mut self, show: bool) -> Self {
        self.show_toggle_button = show;
        self
    }
}

impl fmt::Debug for WidgetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetConfig")
            .field("base_url", &self.base_url)
            .field("agent_endpoint", &self.agent_endpoint)
            .field("title", &self.title)
            .field("initially_open", &self.initially_open)
            .field("controlled", &self.on_toggle.is_some())
            .field("show_toggle_button", &self.show_toggle_button)
            .finish_non_exhaustive()
    }
}
