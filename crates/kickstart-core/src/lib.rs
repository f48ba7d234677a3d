//! Kickstart Core - Scaffolding Pipeline Implementation
//!
//! This crate provides the domain and application layers for the Kickstart
//! provisioning tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         kickstart-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          ScaffoldPipeline               │
//! │   Guard → Fetch → Extract → Reconcile   │
//! │        → Patch → Report / Rollback      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (ArchiveFetcher, ArchiveExtractor,      │
//! │         PackageManagerPrompt)           │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   kickstart-adapters (Infrastructure)   │
//! │   (HttpArchiveFetcher, TarGzExtractor)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (TemplateLayout, TargetState, naming)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kickstart_core::{
//!     application::{ScaffoldPipeline, ScaffoldRequest},
//!     domain::TemplateLayout,
//! };
//!
//! // Build the pipeline with injected adapters.
//! let pipeline = ScaffoldPipeline::new(fetcher, extractor, prompt);
//!
//! let request = ScaffoldRequest::new("./my-app", "https://example.com/template.tar.gz");
//! let report = pipeline.run(&request)?;
//! println!("scaffolded {} files", report.files.len());
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (pipeline and ports)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CancelFlag, ScaffoldPipeline, ScaffoldReport, ScaffoldRequest,
        ports::{ArchiveExtractor, ArchiveFetcher, PackageManagerPrompt, PromptOutcome},
    };
    pub use crate::domain::{PackageManager, TargetState, TemplateLayout};
    pub use crate::error::{ScaffoldError, ScaffoldResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
