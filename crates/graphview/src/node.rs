use viewspace::{Position, Spatial};

/// Node size driver when no metric has been applied (or after a size reset).
pub const DEFAULT_VIEW_METRIC: f64 = 3.0;

/// Base label font size before zoom compensation.
pub const DEFAULT_LABEL_SIZE: f64 = 12.0;

/// One node of a graph view.
///
/// `base_id` is the stable identity: assigned once at ingestion, unique
/// within its view, never reused. `x`/`y` are the backend-assigned logical
/// coordinates, `current_x`/`current_y` the display projection under
/// pan/zoom. Selection, label visibility and the metric are view-local
/// display state that lives only within one epoch of the view's contents.
#[derive(Debug, Clone)]
pub struct Node {
    pub base_id: u64,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub current_x: f64,
    pub current_y: f64,
    pub selected: bool,
    pub label_visibility: bool,
    pub view_metric: f64,
}

impl Node {
    pub fn new(base_id: u64, label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            base_id,
            label: label.into(),
            x,
            y,
            current_x: x,
            current_y: y,
            selected: false,
            label_visibility: true,
            view_metric: DEFAULT_VIEW_METRIC,
        }
    }
}

impl Spatial for Node {
    fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    fn set_position(&mut self, pos: Position) {
        self.x = pos.x;
        self.y = pos.y;
    }

    fn set_display_position(&mut self, pos: Position) {
        self.current_x = pos.x;
        self.current_y = pos.y;
    }
}

/// Undirected connection between two nodes of the same view, referenced by
/// their base ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub base_id: u64,
    pub source: u64,
    pub target: u64,
}

impl Link {
    pub fn new(base_id: u64, source: u64, target: u64) -> Self {
        Self {
            base_id,
            source,
            target,
        }
    }
}
