//! Message contract and session lifecycle for the analysis backend.
//!
//! The backend computes everything this application cannot: induced
//! subgraphs, layouts, per-node metrics and the entanglement indices
//! between the two views. This crate pins the request/response shapes,
//! owns the session id every request depends on, and provides the
//! `Backend` seam plus its HTTP implementation. Backend algorithms stay
//! opaque; only the contract lives here.

mod client;
mod error;
mod session;
mod wire;

pub use client::{Backend, HttpBackend};
pub use error::BackendError;
pub use session::{SessionId, SessionManager};
pub use wire::{
    AlgorithmKind, Envelope, ResponseData, SelectedNode, SelectionPayload, SyncOperator, Target,
    WireGraph, WireLink, WireNode,
};
