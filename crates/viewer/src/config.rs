use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;
use viewspace::{Margins, Viewport};

/// Viewer configuration, read from an `entwine.kdl` file:
///
/// ```kdl
/// backend address="http://localhost:8085"
/// viewport width=960 height=500
/// margins chrome=130 frame=10
/// seed file="graph.json" id-field="id"
/// search query="proteins"
/// ```
///
/// Every node is optional; a missing file yields the defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_address: String,
    pub seed_file: Option<PathBuf>,
    pub search: Option<String>,
    pub id_field: Option<String>,
    pub viewport: Viewport,
    pub margins: Margins,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_address: "http://localhost:8085".into(),
            seed_file: None,
            search: None,
            id_field: None,
            viewport: Viewport::default(),
            margins: Margins::default(),
        }
    }
}

fn string_entry(node: &kdl::KdlNode, name: &str) -> Option<String> {
    node.entries()
        .iter()
        .find(|e| e.name().map(|n| n.to_string() == name).unwrap_or(false))
        .and_then(|e| e.value().as_string())
        .map(|s| s.to_string())
}

fn float_entry(node: &kdl::KdlNode, name: &str) -> Option<f64> {
    node.entries()
        .iter()
        .find(|e| e.name().map(|n| n.to_string() == name).unwrap_or(false))
        .and_then(|e| {
            e.value()
                .as_float()
                .or_else(|| e.value().as_integer().map(|i| i as f64))
        })
}

impl Config {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let doc = kdl::KdlDocument::parse(content)
            .map_err(|e| anyhow::anyhow!("invalid config: {e}"))?;
        let mut config = Config::default();

        for node in doc.nodes() {
            match node.name().to_string().as_str() {
                "backend" => {
                    if let Some(address) = string_entry(node, "address") {
                        config.backend_address = address;
                    }
                }
                "viewport" => {
                    if let Some(width) = float_entry(node, "width") {
                        config.viewport.width = width;
                    }
                    if let Some(height) = float_entry(node, "height") {
                        config.viewport.height = height;
                    }
                }
                "margins" => {
                    if let Some(chrome) = float_entry(node, "chrome") {
                        config.margins.chrome = chrome;
                    }
                    if let Some(frame) = float_entry(node, "frame") {
                        config.margins.frame = frame;
                    }
                }
                "seed" => {
                    config.seed_file = string_entry(node, "file").map(PathBuf::from);
                    config.id_field = string_entry(node, "id-field");
                }
                "search" => {
                    config.search = string_entry(node, "query");
                }
                other => debug!(node = other, "ignoring unknown config node"),
            }
        }

        Ok(config)
    }

    /// Read a config file; a missing file is not an error.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_config() {
        let config = Config::parse(
            r#"
backend address="http://analysis:9000"
viewport width=1280 height=720
margins chrome=150 frame=12
seed file="proteins.json" id-field="uid"
"#,
        )
        .unwrap();

        assert_eq!(config.backend_address, "http://analysis:9000");
        assert_eq!(config.viewport.width, 1280.0);
        assert_eq!(config.viewport.height, 720.0);
        assert_eq!(config.margins.chrome, 150.0);
        assert_eq!(config.margins.frame, 12.0);
        assert_eq!(config.seed_file, Some(PathBuf::from("proteins.json")));
        assert_eq!(config.id_field.as_deref(), Some("uid"));
        assert_eq!(config.search, None);
    }

    #[test]
    fn empty_config_yields_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.backend_address, "http://localhost:8085");
        assert_eq!(config.viewport.width, 960.0);
        assert!(config.seed_file.is_none());
        assert!(config.id_field.is_none());
    }

    #[test]
    fn search_query_is_picked_up() {
        let config = Config::parse(r#"search query="membrane transport""#).unwrap();
        assert_eq!(config.search.as_deref(), Some("membrane transport"));
    }
}
