//! Archive fetcher adapters.

mod http;
mod local;

pub use http::HttpArchiveFetcher;
pub use local::LocalArchiveFetcher;
