//! Domain layer - pure scaffolding logic with no I/O dependencies.
//!
//! Everything here is deterministic: template layout naming, target-state
//! classification, project-name validation, and the package-manager value
//! object. Filesystem effects live in the application layer.

pub mod error;
pub mod layout;
pub mod target;
pub mod validation;
pub mod value_objects;

pub use error::{DomainError, ErrorCategory};
pub use layout::TemplateLayout;
pub use target::TargetState;
pub use validation::{validate_archive_source, validate_project_name};
pub use value_objects::PackageManager;
