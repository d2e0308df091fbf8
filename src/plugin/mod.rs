//! Host-facing entry points.
//!
//! The host calls the file-test pass while scanning its library and the worker
//! pass when a queued task runs. Both take an immutable request and return a
//! fresh response; a skipped file comes back exactly as it went in.

pub mod progress;
pub mod runner;

pub use progress::{Progress, ProgressParser};
pub use runner::{PipelineState, RemuxPlugin};

use crate::probe::SharedInfo;
use crate::remux::SkipReason;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileTestRequest {
    pub path: PathBuf,
    pub library_id: Option<u32>,
    pub shared_info: Option<SharedInfo>,
    /// Flag as set by earlier runners; never cleared here.
    pub add_file_to_pending_tasks: bool,
}

impl FileTestRequest {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileTestResponse {
    pub add_file_to_pending_tasks: bool,
    pub shared_info: Option<SharedInfo>,
    pub skip: Option<SkipReason>,
}

impl FileTestResponse {
    pub(crate) fn unchanged(request: &FileTestRequest, reason: SkipReason) -> Self {
        Self {
            add_file_to_pending_tasks: request.add_file_to_pending_tasks,
            shared_info: request.shared_info.clone(),
            skip: Some(reason),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkerRequest {
    pub file_in: PathBuf,
    /// Proposed destination, may equal `file_in`.
    pub file_out: PathBuf,
    pub original_file_path: Option<PathBuf>,
    pub library_id: Option<u32>,
    pub shared_info: Option<SharedInfo>,
}

impl WorkerRequest {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(file_in: P, file_out: Q) -> Self {
        Self {
            file_in: file_in.into(),
            file_out: file_out.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkerResponse {
    /// Empty unless a remux is planned.
    pub exec_command: Vec<String>,
    pub file_out: PathBuf,
    /// Always false, one run is enough.
    pub repeat: bool,
    pub command_progress_parser: Option<ProgressParser>,
    pub skip: Option<SkipReason>,
}

impl WorkerResponse {
    pub(crate) fn unchanged(request: &WorkerRequest, reason: SkipReason) -> Self {
        Self {
            exec_command: Vec::new(),
            file_out: request.file_out.clone(),
            repeat: false,
            command_progress_parser: None,
            skip: Some(reason),
        }
    }

    pub fn is_planned(&self) -> bool {
        !self.exec_command.is_empty()
    }
}
