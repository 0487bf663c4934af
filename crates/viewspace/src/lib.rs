//! Coordinate spaces for the paired graph views.
//!
//! Backend-computed layouts arrive in an arbitrary coordinate scale; this
//! crate maps them into the fixed viewport (`fit_to_viewport`) and projects
//! logical coordinates into display coordinates under pan/zoom
//! (`ViewTransform`). No I/O and no rendering happen here.

mod rescale;
mod transform;
mod types;

pub use rescale::{EPSILON, fit_to_viewport};
pub use transform::{MAX_SCALE, MIN_SCALE, ViewTransform};
pub use types::{Margins, Position, Spatial, Viewport};
