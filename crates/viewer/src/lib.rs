//! The application core: two graph views kept entangled through the
//! analysis backend.
//!
//! `App` owns the per-view state records, the session, the sync operator
//! and the entanglement indices, and drives every interaction: selection
//! ticks from the lasso, mode toggles, pan/zoom gestures, layout and
//! metric dispatch. Rendering and the lasso geometry are external
//! collaborators reached through the `ChromeSurface` seam.

mod app;
mod config;
mod load;
mod state;
mod surface;

pub use app::App;
pub use config::Config;
pub use load::realize;
pub use state::{ViewState, pair_of};
pub use surface::{ChromeSurface, TracingSurface};
