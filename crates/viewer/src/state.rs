use backend::Target;
use graphview::{GraphView, ModeController, SelectionTracker};
use viewspace::ViewTransform;

/// Everything one view owns: its graph contents, interaction mode,
/// accumulated transform, last-synchronized selection and the local
/// visibility toggles. The two records never reference each other; pairing
/// goes through `pair_of`.
#[derive(Debug, Default)]
pub struct ViewState {
    pub graph: GraphView,
    pub modes: ModeController,
    pub transform: ViewTransform,
    pub tracker: SelectionTracker,
    pub show_labels: bool,
    pub show_links: bool,
    pub lasso_active: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            show_labels: true,
            show_links: true,
            ..Default::default()
        }
    }
}

/// The other half of the pair: a selection in one view drives the contents
/// of this one.
pub fn pair_of(target: Target) -> Target {
    match target {
        Target::Substrate => Target::Catalyst,
        Target::Catalyst => Target::Substrate,
    }
}
