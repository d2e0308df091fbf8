use crate::probe::{MediaProber, ProbeResult};
use crate::utils::{Error, Result};
use std::path::Path;
use tokio::process::Command as TokioCommand;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FfmpegWrapper {
    ffmpeg_path: String,
    ffprobe_path: String,
}

impl FfmpegWrapper {
    pub fn new(ffmpeg_path: String, ffprobe_path: String) -> Self {
        Self {
            ffmpeg_path,
            ffprobe_path,
        }
    }

    pub async fn check_availability(&self) -> Result<()> {
        for tool in [&self.ffmpeg_path, &self.ffprobe_path] {
            let output = TokioCommand::new(tool)
                .arg("-version")
                .output()
                .await
                .map_err(|e| Error::ffmpeg(format!("Failed to run {}: {}", tool, e)))?;

            if !output.status.success() {
                return Err(Error::ffmpeg(format!(
                    "{} -version exited with {}",
                    tool, output.status
                )));
            }
        }
        Ok(())
    }

    pub async fn run_ffprobe(&self, args: &[&str]) -> Result<String> {
        let output = TokioCommand::new(&self.ffprobe_path)
            .args(args)
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ffmpeg(format!("ffprobe failed: {}", error_msg.trim())));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl MediaProber for FfmpegWrapper {
    async fn probe(&self, path: &Path) -> Result<ProbeResult> {
        let input_path = path.to_string_lossy();
        debug!("Probing streams: {}", input_path);

        let output = self
            .run_ffprobe(&[
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
                &input_path,
            ])
            .await
            .map_err(|e| Error::probe(e.to_string()))?;

        let probe = ProbeResult::from_ffprobe_json(&output)?;
        debug!(
            "Probe found {} stream(s), format {:?}",
            probe.streams.len(),
            probe.format.format_name
        );
        Ok(probe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_ffprobe_is_a_probe_error() {
        let ffmpeg = FfmpegWrapper::new(
            "/nonexistent/ffmpeg".to_string(),
            "/nonexistent/ffprobe".to_string(),
        );

        let result = ffmpeg.probe(Path::new("movie.mkv")).await;
        assert!(matches!(result, Err(Error::Probe { .. })));
        assert!(ffmpeg.check_availability().await.is_err());
    }
}
