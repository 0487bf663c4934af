use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::BackendError;

/// Which of the two views a request is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Substrate,
    Catalyst,
}

impl Target {
    pub fn as_str(self) -> &'static str {
        match self {
            Target::Substrate => "substrate",
            Target::Catalyst => "catalyst",
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the backend combines selection criteria during catalyst analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncOperator {
    #[default]
    And,
    Or,
}

impl SyncOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            SyncOperator::And => "AND",
            SyncOperator::Or => "OR",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SyncOperator::And => SyncOperator::Or,
            SyncOperator::Or => SyncOperator::And,
        }
    }
}

/// Algorithm request flavor: new positions, or a per-node scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmKind {
    Layout,
    Float,
}

impl AlgorithmKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmKind::Layout => "layout",
            AlgorithmKind::Float => "float",
        }
    }
}

/// Node as it crosses the wire. Unknown fields are retained so a
/// configured id field can be consulted when base ids are assigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(rename = "baseID", default, skip_serializing_if = "Option::is_none")]
    pub base_id: Option<u64>,
    #[serde(rename = "viewMetric", default, skip_serializing_if = "Option::is_none")]
    pub view_metric: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Link endpoints stay loose (`Value`) on ingestion: seed files reference
/// nodes positionally or by id value. `assign_base_ids` canonicalizes them
/// to base ids, which is the only form sent or accepted afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireLink {
    pub source: Value,
    pub target: Value,
    #[serde(rename = "baseID", default, skip_serializing_if = "Option::is_none")]
    pub base_id: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireGraph {
    #[serde(default)]
    pub nodes: Vec<WireNode>,
    #[serde(default)]
    pub links: Vec<WireLink>,
}

fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn value_key(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

impl WireNode {
    fn field(&self, name: &str) -> Option<&Value> {
        match name {
            "id" => self.id.as_ref(),
            "label" => None,
            _ => self.extra.get(name),
        }
    }
}

impl WireGraph {
    /// Assign the stable identity every node and link carries from here on.
    ///
    /// With no id field configured, base ids are positional. With one, the
    /// field's integer value is used where present (positional fallback
    /// otherwise). Link endpoints are canonicalized to base ids at the same
    /// time: numeric endpoints are taken as positional node references,
    /// string endpoints are resolved through the id field.
    pub fn assign_base_ids(&mut self, id_field: Option<&str>) {
        let field = id_field.filter(|f| !f.is_empty());

        for node in &mut self.nodes {
            if node.x.is_none() {
                node.x = Some(0.0);
            }
            if node.y.is_none() {
                node.y = Some(0.0);
            }
        }

        let mut key_to_base: HashMap<String, u64> = HashMap::new();
        for (index, node) in self.nodes.iter_mut().enumerate() {
            let assigned = field
                .and_then(|f| node.field(f))
                .and_then(value_as_u64)
                .unwrap_or(index as u64);
            node.base_id = Some(assigned);
            if let Some(f) = field
                && let Some(key) = node.field(f).and_then(value_key)
            {
                key_to_base.insert(key, assigned);
            }
        }

        let positional_base: Vec<u64> = self
            .nodes
            .iter()
            .map(|n| n.base_id.unwrap_or_default())
            .collect();

        for (index, link) in self.links.iter_mut().enumerate() {
            if link.base_id.is_none() {
                let assigned = field
                    .and_then(|f| link.extra.get(f))
                    .and_then(value_as_u64)
                    .unwrap_or(index as u64);
                link.base_id = Some(assigned);
            }
            for endpoint in [&mut link.source, &mut link.target] {
                let resolved = match &*endpoint {
                    Value::Number(n) => n
                        .as_u64()
                        .and_then(|i| positional_base.get(i as usize).copied()),
                    Value::String(s) => key_to_base.get(s).copied(),
                    _ => None,
                };
                match resolved {
                    Some(base) => *endpoint = Value::from(base),
                    None => warn!(?endpoint, "link endpoint could not be resolved"),
                }
            }
        }
    }
}

/// Selection as sent to the backend: nodes reduced to base ids, nothing
/// else crosses the sync boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionPayload {
    pub nodes: Vec<SelectedNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedNode {
    #[serde(rename = "baseID")]
    pub base_id: u64,
}

impl SelectionPayload {
    pub fn new(ids: &[u64]) -> Self {
        Self {
            nodes: ids.iter().map(|&base_id| SelectedNode { base_id }).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Out-of-band block some responses carry: the session id on creation, the
/// entanglement indices on analysis.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseData {
    #[serde(default)]
    pub sid: Option<Value>,
    #[serde(rename = "entanglement intensity", default)]
    pub entanglement_intensity: Option<f64>,
    #[serde(rename = "entanglement homogeneity", default)]
    pub entanglement_homogeneity: Option<f64>,
}

/// Every backend response has this shape; absent parts default to empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub nodes: Vec<WireNode>,
    #[serde(default)]
    pub links: Vec<WireLink>,
    #[serde(default)]
    pub data: Option<ResponseData>,
}

impl Envelope {
    pub fn parse(text: &str) -> Result<Self, BackendError> {
        serde_json::from_str(text).map_err(|e| BackendError::MalformedResponse(e.to_string()))
    }

    /// Both indices, when the response carries them.
    pub fn indices(&self) -> Option<(f64, f64)> {
        let data = self.data.as_ref()?;
        Some((
            data.entanglement_intensity?,
            data.entanglement_homogeneity?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_assignment_without_id_field() {
        let mut graph: WireGraph = serde_json::from_str(
            r#"{"nodes":[{"id":"a"},{"id":"b","x":2.0},{"id":"c"}],
                "links":[{"source":0,"target":2}]}"#,
        )
        .unwrap();

        graph.assign_base_ids(None);

        let ids: Vec<u64> = graph.nodes.iter().map(|n| n.base_id.unwrap()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(graph.links[0].base_id, Some(0));
        assert_eq!(graph.links[0].source, Value::from(0u64));
        assert_eq!(graph.links[0].target, Value::from(2u64));
        // Missing coordinates land at the origin.
        assert_eq!(graph.nodes[0].x, Some(0.0));
        assert_eq!(graph.nodes[1].x, Some(2.0));
    }

    #[test]
    fn field_assignment_resolves_string_endpoints() {
        let mut graph: WireGraph = serde_json::from_str(
            r#"{"nodes":[{"uid":11},{"uid":22}],
                "links":[{"source":"11","target":"22"}]}"#,
        )
        .unwrap();

        graph.assign_base_ids(Some("uid"));

        assert_eq!(graph.nodes[0].base_id, Some(11));
        assert_eq!(graph.nodes[1].base_id, Some(22));
        assert_eq!(graph.links[0].source, Value::from(11u64));
        assert_eq!(graph.links[0].target, Value::from(22u64));
    }

    #[test]
    fn selection_payload_wire_shape() {
        let payload = SelectionPayload::new(&[0, 2]);
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"nodes":[{"baseID":0},{"baseID":2}]}"#);
    }

    #[test]
    fn envelope_parses_indices_with_spaced_keys() {
        let envelope = Envelope::parse(
            r#"{"nodes":[{"baseID":0,"x":1.0,"y":2.0}],
                "links":[],
                "data":{"entanglement intensity":0.75,
                         "entanglement homogeneity":0.5}}"#,
        )
        .unwrap();

        assert_eq!(envelope.indices(), Some((0.75, 0.5)));
        assert_eq!(envelope.nodes[0].base_id, Some(0));
    }

    #[test]
    fn envelope_without_data_has_no_indices() {
        let envelope = Envelope::parse(r#"{"nodes":[],"links":[]}"#).unwrap();
        assert_eq!(envelope.indices(), None);
    }

    #[test]
    fn garbage_is_a_malformed_response() {
        let err = Envelope::parse("<html>oops</html>").unwrap_err();
        assert!(matches!(err, BackendError::MalformedResponse(_)));
    }
}
