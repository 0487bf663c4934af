use std::path::PathBuf;

use anyhow::Context;
use backend::{HttpBackend, Target, WireGraph};
use entwine_viewer::{App, Config, TracingSurface};
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config_path = PathBuf::from("entwine.kdl");
    let mut seed_override: Option<PathBuf> = None;
    let mut search_override: Option<String> = None;
    let mut layout: Option<String> = None;
    let mut metric: Option<String> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config_path = PathBuf::from(args.next().context("--config needs a path")?);
            }
            "--file" => {
                seed_override = Some(PathBuf::from(args.next().context("--file needs a path")?));
            }
            "--search" => {
                search_override = Some(args.next().context("--search needs a query")?);
            }
            "--layout" => {
                layout = Some(args.next().context("--layout needs an algorithm name")?);
            }
            "--metric" => {
                metric = Some(args.next().context("--metric needs an algorithm name")?);
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    let mut config = Config::load(&config_path)?;
    if seed_override.is_some() {
        config.seed_file = seed_override;
        config.search = None;
    }
    if search_override.is_some() {
        config.search = search_override;
    }

    smol::block_on(run(config, layout, metric))
}

async fn run(config: Config, layout: Option<String>, metric: Option<String>) -> anyhow::Result<()> {
    let backend = HttpBackend::new(config.backend_address.clone())?;
    let mut app = App::new(backend, TracingSurface, &config);

    if let Some(query) = config.search.clone() {
        info!(query, "creating session from search");
        app.start_from_search(&query).await?;
    } else {
        let path = config
            .seed_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("graph.json"));
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading seed graph {}", path.display()))?;
        let wire: WireGraph = serde_json::from_str(&text)
            .with_context(|| format!("parsing seed graph {}", path.display()))?;
        app.start_from_graph(wire).await?;
    }

    if let Some(name) = layout {
        app.apply_layout(Target::Substrate, &name).await?;
    }
    if let Some(name) = metric {
        app.apply_metric(Target::Substrate, &name).await?;
    }

    let substrate = &app.view(Target::Substrate).graph;
    let catalyst = &app.view(Target::Catalyst).graph;
    let max_degree = substrate
        .nodes
        .iter()
        .map(|n| substrate.degree(n.base_id))
        .max()
        .unwrap_or(0);
    info!(
        substrate_nodes = substrate.nodes.len(),
        substrate_links = substrate.links.len(),
        catalyst_nodes = catalyst.nodes.len(),
        catalyst_links = catalyst.links.len(),
        max_degree,
        intensity = app.indices().intensity,
        homogeneity = app.indices().homogeneity,
        "session established"
    );
    Ok(())
}
