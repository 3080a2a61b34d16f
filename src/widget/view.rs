//! View model — a framework-neutral snapshot of what the host should draw.
//!
//! DESIGN
//! ======
//! The widget owns no rendering. `ChatWidget::render` produces a
//! `WidgetView`, and the host maps it onto whatever UI it has. The
//! `Display` impl is a plain-text rendering used by the terminal host.

use std::fmt;

use time::OffsetDateTime;
use time::macros::format_description;

use super::conversation::{Message, Role};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WidgetView {
    /// Closed in show-toggle-button mode: only the floating open button.
    ToggleButton,
    Panel(PanelView),
}

impl WidgetView {
    #[must_use]
    pub fn is_panel(&self) -> bool {
        matches!(self, Self::Panel(_))
    }

    #[must_use]
    pub fn panel(&self) -> Option<&PanelView> {
        match self {
            Self::Panel(panel) => Some(panel),
            Self::ToggleButton => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelView {
    pub title: String,
    pub subtitle: String,
    /// Close affordance in the header, present only in show-toggle-button mode.
    pub show_close_button: bool,
    pub messages: Vec<MessageRow>,
    /// Typing indicator below the last message while a request is pending.
    pub typing: bool,
    pub input: String,
    pub placeholder: String,
    pub input_disabled: bool,
    pub send_enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageRow {
    pub id: String,
    pub role: Role,
    pub content: String,
    /// `HH:MM`, UTC.
    pub time: String,
}

impl From<&Message> for MessageRow {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.clone(),
            role: message.role,
            content: message.content.clone(),
            time: format_time(message.timestamp),
        }
    }
}

/// Format a timestamp as `HH:MM`.
#[must_use]
pub fn format_time(timestamp: OffsetDateTime) -> String {
    timestamp
        .format(format_description!("[hour]:[minute]"))
        .unwrap_or_default()
}

impl fmt::Display for WidgetView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let panel = match self {
            Self::ToggleButton => return writeln!(f, "[ open chat ]"),
            Self::Panel(panel) => panel,
        };

        write!(f, "== {} ==", panel.title)?;
        if panel.show_close_button {
            write!(f, " [x]")?;
        }
        writeln!(f)?;
        writeln!(f, "   {}", panel.subtitle)?;
        for row in &panel.messages {
            let who = match row.role {
                Role::User => "you",
                Role::Assistant => "bot",
            };
            writeln!(f, "{} {who}: {}", row.time, row.content)?;
        }
        if panel.typing {
            writeln!(f, "      bot: ...")?;
        }
        if panel.input.is_empty() {
            writeln!(f, "> ({})", panel.placeholder)
        } else {
            writeln!(f, "> {}", panel.input)
        }
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
