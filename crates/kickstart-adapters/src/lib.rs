//! Infrastructure adapters for Kickstart.
//!
//! This crate implements the driven ports defined in
//! `kickstart_core::application::ports`. It contains all network and
//! archive-format dependencies; the core stays free of them.

pub mod extractor;
pub mod fetcher;

// Re-export commonly used adapters
pub use extractor::TarGzExtractor;
pub use fetcher::{HttpArchiveFetcher, LocalArchiveFetcher};
