use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use thiserror::Error;
use tracing::debug;

use crate::node::{DEFAULT_VIEW_METRIC, Link, Node};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("duplicate base id {0}")]
    DuplicateBaseId(u64),
    #[error("link {link} references unknown node {endpoint}")]
    DanglingLink { link: u64, endpoint: u64 },
}

/// One of the two graph views.
///
/// Contents are created wholesale on every replacement (load, sync result,
/// layout result) and destroyed wholesale on the next one; selection and
/// display state on the nodes only survives within one such epoch. A
/// petgraph mirror is rebuilt on each replacement so link endpoints are
/// validated up front and the rendering layer can ask for neighbors and
/// degrees.
#[derive(Debug)]
pub struct GraphView {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    structure: UnGraph<u64, u64>,
    index_of: HashMap<u64, NodeIndex>,
}

impl Default for GraphView {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            structure: UnGraph::new_undirected(),
            index_of: HashMap::new(),
        }
    }
}

impl GraphView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the view's contents. Nothing is committed when the new
    /// contents are inconsistent, so a malformed result never lands half
    /// applied.
    pub fn replace(&mut self, nodes: Vec<Node>, links: Vec<Link>) -> Result<(), GraphError> {
        let mut structure = UnGraph::with_capacity(nodes.len(), links.len());
        let mut index_of = HashMap::with_capacity(nodes.len());

        for node in &nodes {
            if index_of.contains_key(&node.base_id) {
                return Err(GraphError::DuplicateBaseId(node.base_id));
            }
            index_of.insert(node.base_id, structure.add_node(node.base_id));
        }

        for link in &links {
            let source = *index_of.get(&link.source).ok_or(GraphError::DanglingLink {
                link: link.base_id,
                endpoint: link.source,
            })?;
            let target = *index_of.get(&link.target).ok_or(GraphError::DanglingLink {
                link: link.base_id,
                endpoint: link.target,
            })?;
            structure.add_edge(source, target, link.base_id);
        }

        debug!(nodes = nodes.len(), links = links.len(), "view contents replaced");
        self.nodes = nodes;
        self.links = links;
        self.structure = structure;
        self.index_of = index_of;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, base_id: u64) -> Option<&Node> {
        self.nodes.iter().find(|n| n.base_id == base_id)
    }

    pub fn node_mut(&mut self, base_id: u64) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.base_id == base_id)
    }

    pub fn neighbors(&self, base_id: u64) -> Vec<u64> {
        let Some(&index) = self.index_of.get(&base_id) else {
            return Vec::new();
        };
        self.structure
            .neighbors(index)
            .map(|i| self.structure[i])
            .collect()
    }

    pub fn degree(&self, base_id: u64) -> usize {
        self.index_of
            .get(&base_id)
            .map(|&i| self.structure.neighbors(i).count())
            .unwrap_or(0)
    }

    pub fn clear_selection(&mut self) {
        for node in &mut self.nodes {
            node.selected = false;
        }
    }

    /// Restore every node's size driver to the default metric.
    pub fn reset_metric(&mut self) {
        for node in &mut self.nodes {
            node.view_metric = DEFAULT_VIEW_METRIC;
        }
    }

    /// Label visibility policy: with labels switched off, only selected
    /// nodes keep a visible label.
    pub fn apply_label_policy(&mut self, show_all: bool) {
        for node in &mut self.nodes {
            node.label_visibility = show_all || node.selected;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Vec<Node>, Vec<Link>) {
        let nodes = vec![
            Node::new(0, "a", 0.0, 0.0),
            Node::new(1, "b", 1.0, 0.0),
            Node::new(2, "c", 0.0, 1.0),
        ];
        let links = vec![
            Link::new(0, 0, 1),
            Link::new(1, 1, 2),
            Link::new(2, 2, 0),
        ];
        (nodes, links)
    }

    #[test]
    fn replace_binds_links_and_answers_structure_queries() {
        let mut view = GraphView::new();
        let (nodes, links) = triangle();
        view.replace(nodes, links).unwrap();

        assert_eq!(view.degree(1), 2);
        let mut neighbors = view.neighbors(0);
        neighbors.sort_unstable();
        assert_eq!(neighbors, vec![1, 2]);
        assert_eq!(view.degree(99), 0);
    }

    #[test]
    fn replace_rejects_dangling_links_without_partial_application() {
        let mut view = GraphView::new();
        let (nodes, links) = triangle();
        view.replace(nodes, links).unwrap();

        let bad_nodes = vec![Node::new(0, "a", 0.0, 0.0)];
        let bad_links = vec![Link::new(0, 0, 7)];
        let err = view.replace(bad_nodes, bad_links).unwrap_err();
        assert_eq!(err, GraphError::DanglingLink { link: 0, endpoint: 7 });

        // Previous epoch untouched.
        assert_eq!(view.nodes.len(), 3);
        assert_eq!(view.links.len(), 3);
    }

    #[test]
    fn replace_rejects_duplicate_base_ids() {
        let mut view = GraphView::new();
        let nodes = vec![Node::new(5, "a", 0.0, 0.0), Node::new(5, "b", 1.0, 1.0)];
        assert_eq!(
            view.replace(nodes, vec![]).unwrap_err(),
            GraphError::DuplicateBaseId(5)
        );
    }

    #[test]
    fn replacement_drops_previous_selection_state() {
        let mut view = GraphView::new();
        let (nodes, links) = triangle();
        view.replace(nodes, links).unwrap();
        view.node_mut(1).unwrap().selected = true;

        let (nodes, links) = triangle();
        view.replace(nodes, links).unwrap();
        assert!(view.nodes.iter().all(|n| !n.selected));
    }

    #[test]
    fn reset_metric_restores_defaults() {
        let mut view = GraphView::new();
        let (nodes, links) = triangle();
        view.replace(nodes, links).unwrap();
        view.node_mut(0).unwrap().view_metric = 17.5;

        view.reset_metric();
        assert!(view.nodes.iter().all(|n| n.view_metric == DEFAULT_VIEW_METRIC));
    }

    #[test]
    fn label_policy_keeps_selected_labels_visible() {
        let mut view = GraphView::new();
        let (nodes, links) = triangle();
        view.replace(nodes, links).unwrap();
        view.node_mut(2).unwrap().selected = true;

        view.apply_label_policy(false);
        assert!(!view.node(0).unwrap().label_visibility);
        assert!(view.node(2).unwrap().label_visibility);

        view.apply_label_policy(true);
        assert!(view.nodes.iter().all(|n| n.label_visibility));
    }
}
