//! Open/closed state of the widget panel.
//!
//! DESIGN
//! ======
//! Visibility is either owned by the widget (`Internal`) or by the host
//! (`Controlled`). In controlled mode the host's flag is the source of
//! truth: toggling only asks the host to change it through the callback,
//! and the host pushes the new flag back with [`VisibilityManager::sync`].
//! The mode is chosen once at construction and never switches.

use std::fmt;
use std::sync::Arc;

/// Host callback invoked with the requested open state.
pub type ToggleCallback = Arc<dyn Fn(bool) + Send + Sync>;

pub enum VisibilityManager {
    Internal { open: bool },
    Controlled { open: bool, on_toggle: ToggleCallback },
}

impl VisibilityManager {
    /// Pick the mode from the presence of a host callback.
    #[must_use]
    pub fn new(initially_open: bool, on_toggle: Option<ToggleCallback>) -> Self {
        match on_toggle {
            Some(on_toggle) => Self::Controlled { open: initially_open, on_toggle },
            None => Self::Internal { open: initially_open },
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        match self {
            Self::Internal { open } | Self::Controlled { open, .. } => *open,
        }
    }

    #[must_use]
    pub fn is_controlled(&self) -> bool {
        matches!(self, Self::Controlled { .. })
    }

    /// Request the inverse of the current state.
    ///
    /// Internal mode flips the flag at once. Controlled mode leaves the flag
    /// alone; the returned request carries the host callback so the caller
    /// can dispatch it after releasing any lock on the widget.
    pub fn toggle(&mut self) -> ToggleRequest {
        match self {
            Self::Internal { open } => {
                *open = !*open;
                ToggleRequest::Applied(*open)
            }
            Self::Controlled { open, on_toggle } => {
                ToggleRequest::Delegated { requested: !*open, on_toggle: on_toggle.clone() }
            }
        }
    }

    /// Accept the host's current flag. No-op in internal mode.
    pub fn sync(&mut self, host_open: bool) {
        if let Self::Controlled { open, .. } = self {
            *open = host_open;
        }
    }
}

/// Result of [`VisibilityManager::toggle`].
#[must_use = "a delegated toggle does nothing until dispatched"]
pub enum ToggleRequest {
    Applied(bool),
    Delegated { requested: bool, on_toggle: ToggleCallback },
}

impl ToggleRequest {
    /// Invoke the host callback if delegated. Returns the requested state.
    pub fn dispatch(self) -> bool {
        match self {
            Self::Applied(open) => open,
            Self::Delegated { requested, on_toggle } => {
                on_toggle(requested);
                requested
            }
        }
    }
}

impl fmt::Debug for VisibilityManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal { open } => f.debug_struct("Internal").field("open", open).finish(),
            Self::Controlled { open, .. } => f.debug_struct("Controlled").field("open", open).finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
#[path = "visibility_test.rs"]
mod tests;
