use serde_json::Value;
use tracing::info;

use crate::client::Backend;
use crate::error::BackendError;
use crate::wire::{Envelope, WireGraph};

/// Opaque session handle issued by the backend at graph creation. The
/// contract leaves the representation open, so numeric and string wire
/// forms are both accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self(n.to_string())),
            Value::String(s) => Some(Self(s.clone())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owns the session id lifecycle. Exactly one session is live per
/// application instance; creating a new one replaces the previous id.
/// Everything that needs a session goes through `require_session`, which
/// fails fast instead of letting an unset id reach the wire.
#[derive(Debug, Default)]
pub struct SessionManager {
    current: Option<SessionId>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_session(&self) -> Option<&SessionId> {
        self.current.as_ref()
    }

    pub fn require_session(&self) -> Result<&SessionId, BackendError> {
        self.current.as_ref().ok_or(BackendError::NoActiveSession)
    }

    /// Create the backend-side graph and adopt the session id it returns.
    /// No dependent request may be issued until this resolves.
    pub async fn create_session<B: Backend>(
        &mut self,
        backend: &B,
        graph: &WireGraph,
    ) -> Result<Envelope, BackendError> {
        let envelope = backend.create(graph).await?;
        self.adopt(&envelope)?;
        Ok(envelope)
    }

    /// Creation through a search query instead of a seed graph.
    pub async fn create_session_from_search<B: Backend>(
        &mut self,
        backend: &B,
        query: &str,
    ) -> Result<Envelope, BackendError> {
        let envelope = backend.create_from_search(query).await?;
        self.adopt(&envelope)?;
        Ok(envelope)
    }

    fn adopt(&mut self, envelope: &Envelope) -> Result<(), BackendError> {
        let sid = envelope
            .data
            .as_ref()
            .and_then(|d| d.sid.as_ref())
            .and_then(SessionId::from_value)
            .ok_or_else(|| {
                BackendError::MalformedResponse("creation response carries no session id".into())
            })?;
        info!(%sid, "session created");
        self.current = Some(sid);
        Ok(())
    }
}
