//! View-local graph model for the substrate/catalyst pair.
//!
//! Each view owns an ordered node/link collection that is replaced wholesale
//! whenever a load, synchronization or layout result lands. On top of that
//! sit the pieces the interaction loop needs: selection snapshots and
//! change detection, the per-view move/select mode machine, and the
//! entanglement feedback mapping.

mod feedback;
mod mode;
mod node;
mod selection;
mod view;

pub use feedback::{
    DISPLAY_DIGITS, EntanglementIndices, FeedbackStyle, PALETTE, bucket, round_to,
};
pub use mode::{Interactor, ModeController, ModeTransition, ViewMode, transition_into};
pub use node::{DEFAULT_LABEL_SIZE, DEFAULT_VIEW_METRIC, Link, Node};
pub use selection::{SelectionSet, SelectionTracker};
pub use view::{GraphError, GraphView};
