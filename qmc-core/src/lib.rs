#![forbid(unsafe_code)]

pub mod error;
pub mod keystream;
pub mod logger;
pub mod suffix;
pub mod transcode;

pub mod distribute;
pub mod report;

// Re-exports: stable API surface
pub use distribute::{DistributeOptions, distribute};
pub use keystream::{Keystream, QmcSeed};
pub use logger::{Logger, TracingLogger, WriterLogger};
pub use report::{RunReport, Summary};
pub use transcode::{QmcTranscoder, Transcoder};
