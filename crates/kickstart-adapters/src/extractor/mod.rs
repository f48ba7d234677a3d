//! Archive extractor adapters.

mod targz;

pub use targz::TarGzExtractor;
