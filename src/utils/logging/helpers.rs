//! Logging helpers for decision events

use crate::remux::{BuiltCommand, SkipReason};
use std::path::Path;

/// Logs the verdict for a file that will be remuxed
pub fn log_decision(path: &Path, matched_indices: &[u32], output_ext: &str) {
    tracing::info!(
        "Remux planned for {}: stream(s) {:?} matched, target container {}",
        path.display(),
        matched_indices,
        output_ext
    );
}

/// Logs why a file is left untouched
pub fn log_skip(path: &Path, reason: &SkipReason) {
    match reason {
        SkipReason::ProbeFailure(_) | SkipReason::EmptyTargetExtension => {
            tracing::warn!("Skipping {}: {}", path.display(), reason)
        }
        _ => tracing::debug!("Skipping {}: {}", path.display(), reason),
    }
}

pub fn log_command(command: &BuiltCommand) {
    tracing::debug!(
        "Command for {}: {}",
        command.output_path.display(),
        command.args.join(" ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    // These only make sure the helpers run without a subscriber installed

    #[test]
    fn test_log_decision() {
        log_decision(Path::new("movie.avi"), &[1, 3], "mkv");
    }

    #[test]
    fn test_log_skip() {
        log_skip(Path::new("movie.mkv"), &SkipReason::NoMatchingCodec);
        log_skip(
            Path::new("movie.mkv"),
            &SkipReason::ProbeFailure("unreadable".to_string()),
        );
    }

    #[test]
    fn test_log_command() {
        log_command(&BuiltCommand {
            args: vec!["-i".to_string(), "movie.avi".to_string()],
            output_path: PathBuf::from("movie.mkv"),
        });
    }
}
