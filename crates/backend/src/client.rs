use serde::Serialize;
use tracing::debug;

use crate::error::BackendError;
use crate::session::SessionId;
use crate::wire::{AlgorithmKind, Envelope, SelectionPayload, SyncOperator, Target, WireGraph};

/// Transport seam. The message contract is fixed; the carrier is not, so
/// tests substitute a scripted implementation.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// `creation` from a seed graph; the response carries the session id.
    async fn create(&self, graph: &WireGraph) -> Result<Envelope, BackendError>;

    /// `creation` through a search query instead of a graph.
    async fn create_from_search(&self, query: &str) -> Result<Envelope, BackendError>;

    /// `update`: the induced subgraph of a selection, replacing the same view.
    async fn update(
        &self,
        sid: &SessionId,
        selection: &SelectionPayload,
        target: Target,
    ) -> Result<Envelope, BackendError>;

    /// `algorithm`: a named layout (positions) or float (per-node scalar) run.
    async fn algorithm(
        &self,
        sid: &SessionId,
        kind: AlgorithmKind,
        name: &str,
        target: Target,
    ) -> Result<Envelope, BackendError>;

    /// `analyse` with a selection: the cross-view synchronization request.
    async fn analyse(
        &self,
        sid: &SessionId,
        selection: &SelectionPayload,
        target: Target,
        operator: SyncOperator,
    ) -> Result<Envelope, BackendError>;

    /// `analyse` without a selection: the initial whole-view analysis.
    async fn analyse_all(&self, sid: &SessionId, target: Target) -> Result<Envelope, BackendError>;
}

fn encode<T: Serialize>(value: &T) -> Result<String, BackendError> {
    serde_json::to_string(value).map_err(|e| BackendError::MalformedResponse(e.to_string()))
}

/// Form-encoded POST transport against the backend address.
///
/// Owns a small tokio runtime and bridges onto it, so callers can await
/// from whatever executor drives the interaction loop.
pub struct HttpBackend {
    address: String,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl HttpBackend {
    pub fn new(address: impl Into<String>) -> Result<Self, BackendError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        Ok(Self {
            address: address.into(),
            client: reqwest::Client::new(),
            runtime,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    async fn post_form(
        &self,
        fields: Vec<(&'static str, String)>,
    ) -> Result<Envelope, BackendError> {
        let kind = fields
            .iter()
            .find(|(name, _)| *name == "type")
            .map(|(_, value)| value.clone())
            .unwrap_or_default();
        debug!(address = %self.address, kind, "posting backend request");

        let client = self.client.clone();
        let url = self.address.clone();
        let task = self.runtime.spawn(async move {
            let response = client
                .post(&url)
                .form(&fields)
                .send()
                .await
                .map_err(|e| BackendError::Unavailable(e.to_string()))?;
            response
                .text()
                .await
                .map_err(|e| BackendError::Unavailable(e.to_string()))
        });
        let text = task
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))??;
        Envelope::parse(&text)
    }
}

impl Backend for HttpBackend {
    async fn create(&self, graph: &WireGraph) -> Result<Envelope, BackendError> {
        self.post_form(vec![
            ("type", "creation".into()),
            ("graph", encode(graph)?),
        ])
        .await
    }

    async fn create_from_search(&self, query: &str) -> Result<Envelope, BackendError> {
        self.post_form(vec![
            ("type", "creation".into()),
            ("search", query.into()),
        ])
        .await
    }

    async fn update(
        &self,
        sid: &SessionId,
        selection: &SelectionPayload,
        target: Target,
    ) -> Result<Envelope, BackendError> {
        self.post_form(vec![
            ("sid", sid.as_str().into()),
            ("type", "update".into()),
            ("graph", encode(selection)?),
            ("target", target.as_str().into()),
        ])
        .await
    }

    async fn algorithm(
        &self,
        sid: &SessionId,
        kind: AlgorithmKind,
        name: &str,
        target: Target,
    ) -> Result<Envelope, BackendError> {
        let parameters = serde_json::json!({
            "type": kind.as_str(),
            "name": name,
            "target": target.as_str(),
        });
        self.post_form(vec![
            ("sid", sid.as_str().into()),
            ("type", "algorithm".into()),
            ("parameters", encode(&parameters)?),
        ])
        .await
    }

    async fn analyse(
        &self,
        sid: &SessionId,
        selection: &SelectionPayload,
        target: Target,
        operator: SyncOperator,
    ) -> Result<Envelope, BackendError> {
        self.post_form(vec![
            ("sid", sid.as_str().into()),
            ("type", "analyse".into()),
            ("graph", encode(selection)?),
            ("target", target.as_str().into()),
            ("operator", operator.as_str().into()),
        ])
        .await
    }

    async fn analyse_all(&self, sid: &SessionId, target: Target) -> Result<Envelope, BackendError> {
        self.post_form(vec![
            ("sid", sid.as_str().into()),
            ("type", "analyse".into()),
            ("target", target.as_str().into()),
        ])
        .await
    }
}
