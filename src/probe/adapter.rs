use super::ProbeResult;
use crate::utils::{Error, Result};
use std::collections::BTreeMap;
use std::future::Future;
use std::path::Path;
use tracing::debug;

/// Key under which the probe payload travels between host stages.
pub const FFPROBE_KEY: &str = "ffprobe";

/// Opaque key/value bag the host forwards from one stage to the next.
pub type SharedInfo = BTreeMap<String, serde_json::Value>;

/// Something that can inspect a media file.
pub trait MediaProber {
    fn probe(&self, path: &Path) -> impl Future<Output = Result<ProbeResult>>;
}

/// Validates and normalizes probe data before the decision pipeline sees it.
///
/// A payload left behind by an earlier stage always wins over a fresh probe so
/// that both passes decide on the same snapshot.
pub struct ProbeAdapter<'a, P> {
    prober: &'a P,
    allowed_mimetypes: Vec<String>,
}

impl<'a, P: MediaProber> ProbeAdapter<'a, P> {
    pub fn new(prober: &'a P, allowed_mimetypes: &[&str]) -> Self {
        Self {
            prober,
            allowed_mimetypes: allowed_mimetypes.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Adapter accepting only `video/*` containers.
    pub fn video(prober: &'a P) -> Self {
        Self::new(prober, &["video"])
    }

    pub async fn resolve(
        &self,
        path: &Path,
        shared_info: Option<&SharedInfo>,
    ) -> Result<ProbeResult> {
        match shared_info.and_then(|info| info.get(FFPROBE_KEY)) {
            Some(payload) => self.from_shared(payload, path),
            None => self.probe_file(path).await,
        }
    }

    pub fn from_shared(&self, payload: &serde_json::Value, path: &Path) -> Result<ProbeResult> {
        let probe = ProbeResult::from_payload(payload)?;
        let probed_name = probe
            .format
            .filename
            .as_deref()
            .map(Path::new)
            .unwrap_or(path);
        self.check_mimetype(probed_name)?;
        if probe.describes(path) {
            debug!("Reusing shared probe for {}", path.display());
        } else {
            debug!(
                "Shared probe was taken from {}, reusing it for {}",
                probed_name.display(),
                path.display()
            );
        }
        Ok(probe)
    }

    pub async fn probe_file(&self, path: &Path) -> Result<ProbeResult> {
        self.check_mimetype(path)?;
        let mut probe = self.prober.probe(path).await?;
        if probe.format.filename.is_none() {
            probe.format.filename = Some(path.to_string_lossy().to_string());
        }
        Ok(probe)
    }

    fn check_mimetype(&self, path: &Path) -> Result<()> {
        let mime = mime_guess::from_path(path).first().ok_or_else(|| {
            Error::probe(format!("Unable to determine mimetype of {}", path.display()))
        })?;

        if self
            .allowed_mimetypes
            .iter()
            .any(|allowed| allowed == mime.type_().as_str())
        {
            Ok(())
        } else {
            Err(Error::probe(format!(
                "Mimetype {} of {} is not one of: {}",
                mime,
                path.display(),
                self.allowed_mimetypes.join(", ")
            )))
        }
    }
}
