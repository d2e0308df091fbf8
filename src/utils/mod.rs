pub mod error;
pub mod ffmpeg;
pub mod filesystem;
pub mod logging;
pub mod tool_runner;

pub use error::{Error, Result};
pub use ffmpeg::FfmpegWrapper;
pub use filesystem::{find_media_files, has_extension};
pub use logging::setup_logging;
pub use tool_runner::ToolRunner;
