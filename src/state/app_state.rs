//! Application state definitions

use super::session::VerificationSession;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which kind of actor is being verified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    #[default]
    Restaurant,
    Association,
}

impl ActorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Association => "association",
        }
    }

    /// Screen title for this role
    pub fn title(&self) -> &'static str {
        match self {
            Self::Restaurant => "Restaurant verification",
            Self::Association => "Association verification",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown actor role '{0}' (expected 'restaurant' or 'association')")]
pub struct UnknownRole(pub String);

impl FromStr for ActorRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "restaurant" => Ok(Self::Restaurant),
            "association" => Ok(Self::Association),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Role-specific area the user lands in after a verified submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    RestaurantWorkspace,
    AssociationWorkspace,
}

impl Destination {
    pub fn label(&self) -> &'static str {
        match self {
            Self::RestaurantWorkspace => "Restaurant workspace",
            Self::AssociationWorkspace => "Association workspace",
        }
    }
}

/// Pick the handoff destination for a role
pub fn destination_for(role: ActorRole) -> Destination {
    match role {
        ActorRole::Restaurant => Destination::RestaurantWorkspace,
        ActorRole::Association => Destination::AssociationWorkspace,
    }
}

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Verification,
    Workspace(Destination),
}

/// Top-level application state
#[derive(Debug)]
pub struct AppState {
    pub current_view: View,
    pub session: VerificationSession,
    /// Path being typed into the document prompt, when it is open
    pub document_prompt: Option<String>,
    /// Transient feedback shown in the status bar
    pub status_message: Option<String>,
    error_queue: Vec<String>,
}

impl AppState {
    pub fn new(session: VerificationSession) -> Self {
        Self {
            current_view: View::default(),
            session,
            document_prompt: None,
            status_message: None,
            error_queue: Vec::new(),
        }
    }

    /// Replace the verification screen with `destination`. The workspace
    /// view has no route back.
    pub fn reset_navigation(&mut self, destination: Destination) {
        self.document_prompt = None;
        self.current_view = View::Workspace(destination);
    }

    pub fn push_error(&mut self, message: String) {
        self.error_queue.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.first().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        if !self.error_queue.is_empty() {
            self.error_queue.remove(0);
        }
    }
}
