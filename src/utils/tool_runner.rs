use crate::utils::{Error, Result};
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error};

/// Runs a planned command line to completion with a timeout.
#[derive(Debug, Clone)]
pub struct ToolRunner {
    timeout: Duration,
}

impl ToolRunner {
    pub fn new(timeout_seconds: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    /// `command[0]` is the executable. Succeeds only if it exits cleanly and,
    /// when given, `output_file` exists afterwards.
    pub async fn run(&self, command: &[String], output_file: Option<&Path>) -> Result<String> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| Error::Tool("Empty command".to_string()))?;

        debug!("Running: {}", command.join(" "));

        let mut cmd = Command::new(program);
        cmd.args(args).kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| {
                Error::Tool(format!(
                    "{} timed out after {} seconds",
                    program,
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| Error::Tool(format!("Failed to run {}: {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);

            error!("{} failed with exit code {}", program, output.status);
            error!("Stderr: {}", stderr.trim());

            return Err(Error::Tool(format!(
                "{} failed with exit code {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }

        if let Some(file) = output_file {
            if !file.exists() {
                return Err(Error::Tool(format!(
                    "{} completed but {} was not written",
                    program,
                    file.display()
                )));
            }
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_command() {
        let runner = ToolRunner::new(5);
        assert!(matches!(runner.run(&[], None).await, Err(Error::Tool(_))));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let runner = ToolRunner::new(5);
        let command = vec!["/nonexistent/ffmpeg".to_string(), "-version".to_string()];
        assert!(runner.run(&command, None).await.is_err());
    }
}
