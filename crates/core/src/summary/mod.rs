//! Summary projection and the renderer payload.
//!
//! - [`summary_model`] - `Summary`, equivalencies, view-keyed payload types
//! - [`projector_service`] - pure projection and payload assembly

pub mod projector_service;
pub mod summary_model;

#[cfg(test)]
mod projector_tests;

pub use projector_service::{build_dashboard_payload, project};
pub use summary_model::{
    DashboardPayload, Equivalency, EquivalencyBenchmarks, RunDelta, Summary, ViewData, ViewMode,
};
