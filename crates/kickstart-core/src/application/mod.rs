//! Application layer - the scaffolding pipeline and its collaborators.
//!
//! This layer owns every filesystem effect of provisioning and defines the
//! driven ports implemented by `kickstart-adapters`. It depends on the
//! domain layer, never the other way around.

pub mod error;
pub mod guard;
pub mod manifest;
pub mod pipeline;
pub mod ports;
pub mod reconcile;

pub use error::PipelineError;
pub use guard::PathGuard;
pub use manifest::ManifestPatcher;
pub use pipeline::{CancelFlag, ScaffoldPipeline, ScaffoldReport, ScaffoldRequest, Stage};
pub use reconcile::{FileMove, ReconciliationPlan, TreeReconciler};
