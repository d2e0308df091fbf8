pub mod cli;
pub mod config;
pub mod plugin;
pub mod probe;
pub mod remux;
pub mod stream;
pub mod utils;

pub use config::{Config, ProcessingConfig, RemuxSettings};
pub use plugin::{FileTestRequest, FileTestResponse, RemuxPlugin, WorkerRequest, WorkerResponse};
pub use probe::{MediaProber, ProbeAdapter, ProbeResult, StreamRecord, StreamType};
pub use remux::{BuiltCommand, CommandBuilder, MappingDecision, SkipReason};
pub use stream::{Classification, StreamClassifier, StreamPolicy};
pub use utils::{Error, FfmpegWrapper, Result};
