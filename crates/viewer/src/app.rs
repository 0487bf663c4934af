use backend::{
    AlgorithmKind, Backend, BackendError, Envelope, SelectionPayload, SessionManager, SyncOperator,
    Target, WireGraph, WireLink, WireNode,
};
use graphview::{
    DEFAULT_LABEL_SIZE, EntanglementIndices, Interactor, SelectionSet,
};
use tracing::{debug, info};
use viewspace::{Margins, Viewport, fit_to_viewport};

use crate::config::Config;
use crate::load::realize;
use crate::state::{ViewState, pair_of};
use crate::surface::ChromeSurface;

/// The application: both view records, the session, the sync operator and
/// the entanglement indices, with single-writer ownership of each.
///
/// All backend calls are async suspension points; the rest of the
/// interaction keeps running while one is outstanding. There is no request
/// queue and no cancellation: overlapping results land in arrival order,
/// best-effort last-write-wins.
pub struct App<B, S> {
    backend: B,
    pub surface: S,
    session: SessionManager,
    substrate: ViewState,
    catalyst: ViewState,
    operator: SyncOperator,
    indices: EntanglementIndices,
    viewport: Viewport,
    margins: Margins,
    id_field: Option<String>,
}

impl<B: Backend, S: ChromeSurface> App<B, S> {
    pub fn new(backend: B, surface: S, config: &Config) -> Self {
        Self {
            backend,
            surface,
            session: SessionManager::new(),
            substrate: ViewState::new(),
            catalyst: ViewState::new(),
            operator: SyncOperator::default(),
            indices: EntanglementIndices::default(),
            viewport: config.viewport,
            margins: config.margins,
            id_field: config.id_field.clone(),
        }
    }

    pub fn view(&self, target: Target) -> &ViewState {
        match target {
            Target::Substrate => &self.substrate,
            Target::Catalyst => &self.catalyst,
        }
    }

    pub fn view_mut(&mut self, target: Target) -> &mut ViewState {
        match target {
            Target::Substrate => &mut self.substrate,
            Target::Catalyst => &mut self.catalyst,
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn operator(&self) -> SyncOperator {
        self.operator
    }

    pub fn indices(&self) -> EntanglementIndices {
        self.indices
    }

    /// Realize wire contents into a view, optionally through the rescaler
    /// (backend layouts are in an unrelated scale). Nothing lands when the
    /// payload is inconsistent.
    fn install_wire(
        &mut self,
        target: Target,
        wire_nodes: &[WireNode],
        wire_links: &[WireLink],
        rescale: bool,
    ) -> Result<(), BackendError> {
        let (mut nodes, links) = realize(wire_nodes, wire_links)?;
        if rescale {
            fit_to_viewport(&mut nodes, &self.viewport, &self.margins);
        }
        self.view_mut(target)
            .graph
            .replace(nodes, links)
            .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;
        self.surface.render(target);
        Ok(())
    }

    fn absorb_indices(&mut self, envelope: &Envelope) {
        if let Some((intensity, homogeneity)) = envelope.indices() {
            self.indices = EntanglementIndices::new(intensity, homogeneity);
            self.refresh_feedback();
        }
    }

    fn refresh_feedback(&mut self) {
        let style = self.indices.style();
        self.surface.apply_feedback(style);
        for target in [Target::Substrate, Target::Catalyst] {
            if self.view(target).lasso_active {
                self.surface.set_lasso_fill(target, style.color);
            }
        }
    }

    fn rebuild_all_chrome(&mut self) {
        self.surface.rebuild_chrome(Target::Substrate);
        self.surface.rebuild_chrome(Target::Catalyst);
        self.refresh_feedback();
    }

    // ----- session and loading -----

    /// Seed the substrate from a local graph, create the backend session
    /// with it, then run the initial analysis into the catalyst. Nothing
    /// else may hit the backend before the session id is in hand, so this
    /// runs strictly in sequence.
    pub async fn start_from_graph(&mut self, mut wire: WireGraph) -> Result<(), BackendError> {
        wire.assign_base_ids(self.id_field.as_deref());
        self.install_wire(Target::Substrate, &wire.nodes, &wire.links, true)?;

        let envelope = self.session.create_session(&self.backend, &wire).await?;
        self.install_wire(Target::Substrate, &envelope.nodes, &envelope.links, true)?;
        self.initial_analyse().await
    }

    /// Seed through a backend search query instead of a local graph.
    pub async fn start_from_search(&mut self, query: &str) -> Result<(), BackendError> {
        let envelope = self
            .session
            .create_session_from_search(&self.backend, query)
            .await?;
        let mut wire = WireGraph {
            nodes: envelope.nodes,
            links: envelope.links,
        };
        wire.assign_base_ids(self.id_field.as_deref());
        self.install_wire(Target::Substrate, &wire.nodes, &wire.links, true)?;
        self.initial_analyse().await
    }

    /// Whole-substrate analysis; the result becomes the catalyst view.
    pub async fn initial_analyse(&mut self) -> Result<(), BackendError> {
        let sid = self.session.require_session()?.clone();
        let envelope = self.backend.analyse_all(&sid, Target::Substrate).await?;
        self.install_wire(Target::Catalyst, &envelope.nodes, &envelope.links, true)?;
        self.absorb_indices(&envelope);
        Ok(())
    }

    // ----- synchronization -----

    /// Lasso/marquee gesture tick: re-derive the selection and synchronize
    /// only when it actually changed since the last observation.
    pub async fn selection_tick(&mut self, target: Target) -> Result<(), BackendError> {
        let changed = {
            let view = self.view_mut(target);
            view.tracker.observe(&view.graph)
        };
        match changed {
            Some(selection) => self.synchronize(target, selection).await,
            None => Ok(()),
        }
    }

    /// Send a selection for analysis and replace the paired view with the
    /// derived subgraph. An empty selection carries no synchronization
    /// signal: selection styling is reset and the paired view's sizes go
    /// back to the default metric, without a backend call.
    pub async fn synchronize(
        &mut self,
        source: Target,
        selection: SelectionSet,
    ) -> Result<(), BackendError> {
        if selection.is_empty() {
            debug!(%source, "empty selection, resetting styling without a backend call");
            self.surface.reset_selection_styling(Target::Substrate);
            self.surface.reset_selection_styling(Target::Catalyst);
            let paired = pair_of(source);
            self.view_mut(paired).graph.reset_metric();
            self.surface.render(paired);
            return Ok(());
        }

        let sid = self.session.require_session()?.clone();
        let payload = SelectionPayload::new(selection.ids());
        info!(%source, count = selection.len(), operator = self.operator.as_str(), "synchronizing selection");
        let envelope = self
            .backend
            .analyse(&sid, &payload, source, self.operator)
            .await?;
        self.install_wire(pair_of(source), &envelope.nodes, &envelope.links, false)?;
        self.absorb_indices(&envelope);
        Ok(())
    }

    // ----- layout and metric dispatch -----

    pub async fn apply_layout(&mut self, target: Target, name: &str) -> Result<(), BackendError> {
        let sid = self.session.require_session()?.clone();
        info!(%target, name, "applying layout");
        let envelope = self
            .backend
            .algorithm(&sid, AlgorithmKind::Layout, name, target)
            .await?;
        self.install_wire(target, &envelope.nodes, &envelope.links, true)
    }

    pub async fn apply_metric(&mut self, target: Target, name: &str) -> Result<(), BackendError> {
        let sid = self.session.require_session()?.clone();
        info!(%target, name, "applying metric");
        let envelope = self
            .backend
            .algorithm(&sid, AlgorithmKind::Float, name, target)
            .await?;
        self.install_wire(target, &envelope.nodes, &envelope.links, true)?;
        // metric results change node sizing, which shifts the chrome around
        // both views
        self.rebuild_all_chrome();
        Ok(())
    }

    /// Replace a view with the induced subgraph of its current selection.
    pub async fn induced_subgraph(&mut self, target: Target) -> Result<(), BackendError> {
        let selection = SelectionSet::from_view(&self.view(target).graph);
        let sid = self.session.require_session()?.clone();
        let payload = SelectionPayload::new(selection.ids());
        info!(%target, count = selection.len(), "requesting induced subgraph");
        let envelope = self.backend.update(&sid, &payload, target).await?;
        self.install_wire(target, &envelope.nodes, &envelope.links, false)
    }

    // ----- interaction -----

    /// Swap a view between select (lasso) and move (pan/zoom) input. The
    /// two interactors are exclusive; the swap is refused mid-drag.
    pub fn toggle_mode(&mut self, target: Target) {
        let Some(transition) = self.view_mut(target).modes.toggle() else {
            return;
        };
        if transition.detach == Interactor::Lasso {
            self.view_mut(target).lasso_active = false;
        }
        self.surface.detach_interactor(target, transition.detach);
        if transition.attach == Interactor::Lasso {
            self.view_mut(target).lasso_active = true;
        }
        self.surface.attach_interactor(target, transition.attach);
        if let Some(cursor) = transition.cursor {
            self.surface.set_cursor(target, cursor);
        }
    }

    /// Pan/zoom gesture tick. Ignored unless the view is in move mode;
    /// otherwise the accumulated transform is projected onto the display
    /// coordinates and the chrome (which shares the coordinate space) is
    /// rebuilt. Logical coordinates are never touched.
    pub fn pan_zoom_tick(&mut self, target: Target, scale: f64, translate_x: f64, translate_y: f64) {
        {
            let view = self.view_mut(target);
            if !view.modes.is_move() {
                return;
            }
            view.transform.set(scale, translate_x, translate_y);
            let transform = view.transform;
            transform.apply(&mut view.graph.nodes);
        }
        let size = self.view(target).transform.label_font_size(DEFAULT_LABEL_SIZE);
        self.surface.set_label_size(target, size);
        self.rebuild_all_chrome();
    }

    /// Drop the accumulated transform and snap display coordinates back to
    /// the logical layout.
    pub fn reset_view(&mut self, target: Target) {
        {
            let view = self.view_mut(target);
            let mut transform = view.transform;
            transform.reset(&mut view.graph.nodes);
            view.transform = transform;
        }
        self.surface.set_label_size(target, DEFAULT_LABEL_SIZE);
        self.rebuild_all_chrome();
    }

    /// Restore a view's node sizes to the default metric.
    pub fn reset_size(&mut self, target: Target) {
        self.view_mut(target).graph.reset_metric();
        self.surface.render(target);
    }

    pub fn toggle_operator(&mut self) {
        self.operator = self.operator.toggled();
        // the operator caption lives in the catalyst chrome
        self.surface.rebuild_chrome(Target::Catalyst);
    }

    pub fn toggle_labels(&mut self, target: Target) {
        let show = {
            let view = self.view_mut(target);
            view.show_labels = !view.show_labels;
            view.graph.apply_label_policy(view.show_labels);
            view.show_labels
        };
        debug!(%target, show, "label visibility toggled");
        self.surface.render(target);
    }

    pub fn toggle_links(&mut self, target: Target) {
        let view = self.view_mut(target);
        view.show_links = !view.show_links;
        self.surface.render(target);
    }
}
