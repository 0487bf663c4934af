use backend::{BackendError, WireLink, WireNode};
use graphview::{Link, Node};
use serde_json::Value;

fn endpoint_base(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Turn wire nodes/links into view contents.
///
/// By this point every node must carry its base id (assigned locally before
/// the first send, round-tripped by the backend thereafter) and link
/// endpoints must be base ids; anything else is a malformed payload and
/// nothing is applied.
pub fn realize(
    wire_nodes: &[WireNode],
    wire_links: &[WireLink],
) -> Result<(Vec<Node>, Vec<Link>), BackendError> {
    let mut nodes = Vec::with_capacity(wire_nodes.len());
    for wire in wire_nodes {
        let base_id = wire
            .base_id
            .ok_or_else(|| BackendError::MalformedResponse("node without baseID".into()))?;
        let label = wire
            .label
            .clone()
            .unwrap_or_else(|| base_id.to_string());
        let mut node = Node::new(base_id, label, wire.x.unwrap_or(0.0), wire.y.unwrap_or(0.0));
        if let Some(metric) = wire.view_metric {
            node.view_metric = metric;
        }
        nodes.push(node);
    }

    let mut links = Vec::with_capacity(wire_links.len());
    for (index, wire) in wire_links.iter().enumerate() {
        let source = endpoint_base(&wire.source).ok_or_else(|| {
            BackendError::MalformedResponse(format!("link source is not a base id: {}", wire.source))
        })?;
        let target = endpoint_base(&wire.target).ok_or_else(|| {
            BackendError::MalformedResponse(format!("link target is not a base id: {}", wire.target))
        })?;
        links.push(Link::new(wire.base_id.unwrap_or(index as u64), source, target));
    }

    Ok((nodes, links))
}
