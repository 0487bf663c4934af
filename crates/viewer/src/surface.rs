use backend::Target;
use graphview::{FeedbackStyle, Interactor};
use tracing::debug;

/// Seam towards the rendering collaborator.
///
/// The interaction core only signals what changed; drawing nodes, buttons,
/// the feedback frame and the lasso is owned by the embedding layer. Chrome
/// elements share the views' coordinate space, which is why transforms and
/// metric updates ask for a chrome rebuild.
pub trait ChromeSurface {
    /// The view's contents changed; redraw it.
    fn render(&mut self, target: Target);

    /// Buttons/overlays around a view need repositioning.
    fn rebuild_chrome(&mut self, target: Target);

    /// New entanglement style for the feedback frame.
    fn apply_feedback(&mut self, style: FeedbackStyle);

    /// Recolor an attached lasso so the gesture matches the last-known
    /// similarity score.
    fn set_lasso_fill(&mut self, target: Target, color: &'static str);

    /// Drop selection highlighting in a view.
    fn reset_selection_styling(&mut self, target: Target);

    fn attach_interactor(&mut self, target: Target, interactor: Interactor);
    fn detach_interactor(&mut self, target: Target, interactor: Interactor);
    fn set_cursor(&mut self, target: Target, cursor: &'static str);
    fn set_label_size(&mut self, target: Target, size: f64);
}

/// Headless surface: every signal becomes a debug log line. Used by the
/// CLI driver, where nothing is actually drawn.
#[derive(Debug, Default)]
pub struct TracingSurface;

impl ChromeSurface for TracingSurface {
    fn render(&mut self, target: Target) {
        debug!(%target, "render");
    }

    fn rebuild_chrome(&mut self, target: Target) {
        debug!(%target, "rebuild chrome");
    }

    fn apply_feedback(&mut self, style: FeedbackStyle) {
        debug!(
            color = style.color,
            intensity = style.intensity,
            homogeneity = style.homogeneity,
            "feedback"
        );
    }

    fn set_lasso_fill(&mut self, target: Target, color: &'static str) {
        debug!(%target, color, "lasso fill");
    }

    fn reset_selection_styling(&mut self, target: Target) {
        debug!(%target, "reset selection styling");
    }

    fn attach_interactor(&mut self, target: Target, interactor: Interactor) {
        debug!(%target, ?interactor, "attach");
    }

    fn detach_interactor(&mut self, target: Target, interactor: Interactor) {
        debug!(%target, ?interactor, "detach");
    }

    fn set_cursor(&mut self, target: Target, cursor: &'static str) {
        debug!(%target, cursor, "cursor");
    }

    fn set_label_size(&mut self, target: Target, size: f64) {
        debug!(%target, size, "label size");
    }
}
