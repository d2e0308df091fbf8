use super::{FileTestRequest, FileTestResponse, ProgressParser, WorkerRequest, WorkerResponse};
use crate::config::{Config, ProcessingConfig};
use crate::probe::{MediaProber, ProbeAdapter, ProbeResult, SharedInfo, StreamType, FFPROBE_KEY};
use crate::remux::{derive_output_path, extension_of, CommandBuilder, MappingDecision, SkipReason};
use crate::stream::{Classification, StreamClassifier, StreamPolicy};
use crate::utils::logging::{log_command, log_decision, log_skip};
use std::fmt;
use std::path::Path;
use tracing::{debug, info_span, trace, Instrument};
use uuid::Uuid;

/// Where one file's decision currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Untested,
    Probed,
    Classified,
    Skip(SkipReason),
    RemuxPlanned,
    CommandBuilt,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Untested => write!(f, "untested"),
            Self::Probed => write!(f, "probed"),
            Self::Classified => write!(f, "classified"),
            Self::Skip(reason) => write!(f, "skip ({})", reason),
            Self::RemuxPlanned => write!(f, "remux planned"),
            Self::CommandBuilt => write!(f, "command built"),
        }
    }
}

struct Evaluation {
    probe: Option<ProbeResult>,
    state: PipelineState,
    classification: Classification,
}

/// The remux planner as the host sees it.
///
/// Holds the configuration and the prober; every invocation resolves its
/// settings and builds its classifier from scratch.
pub struct RemuxPlugin<P> {
    config: Config,
    prober: P,
}

impl<P: MediaProber> RemuxPlugin<P> {
    pub fn new(config: Config, prober: P) -> Self {
        Self { config, prober }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn prober(&self) -> &P {
        &self.prober
    }

    /// File-test pass: flags files that need a remux and leaves the probe in
    /// `shared_info` for later stages.
    pub async fn on_library_management_file_test(
        &self,
        request: FileTestRequest,
    ) -> FileTestResponse {
        let span = info_span!(
            "file_test",
            invocation = %Uuid::new_v4(),
            path = %request.path.display()
        );

        async {
            let settings = self.config.settings_for(request.library_id).resolve();
            let evaluation = self
                .evaluate(&request.path, &settings, request.shared_info.as_ref())
                .await;

            let Some(probe) = evaluation.probe else {
                let reason = skip_reason_of(&evaluation.state);
                log_skip(&request.path, &reason);
                return FileTestResponse::unchanged(&request, reason);
            };

            let mut shared_info = request.shared_info.clone().unwrap_or_default();
            match probe.to_payload() {
                Ok(payload) => {
                    shared_info.insert(FFPROBE_KEY.to_string(), payload);
                }
                Err(e) => debug!("Probe not shared: {}", e),
            }

            match evaluation.state {
                PipelineState::RemuxPlanned => {
                    log_decision(
                        &request.path,
                        &evaluation.classification.matched_indices,
                        &settings.output_ext,
                    );
                    FileTestResponse {
                        add_file_to_pending_tasks: true,
                        shared_info: Some(shared_info),
                        skip: None,
                    }
                }
                state => {
                    let reason = skip_reason_of(&state);
                    log_skip(&request.path, &reason);
                    FileTestResponse {
                        add_file_to_pending_tasks: request.add_file_to_pending_tasks,
                        shared_info: Some(shared_info),
                        skip: Some(reason),
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Worker pass: builds the remux command when the same decision still holds.
    pub async fn on_worker_process(&self, request: WorkerRequest) -> WorkerResponse {
        let span = info_span!(
            "worker",
            invocation = %Uuid::new_v4(),
            path = %request.file_in.display()
        );

        async {
            if let Some(original) = &request.original_file_path {
                debug!("Original file: {}", original.display());
            }

            let settings = self.config.settings_for(request.library_id).resolve();
            let evaluation = self
                .evaluate(&request.file_in, &settings, request.shared_info.as_ref())
                .await;

            let probe = match (evaluation.probe, &evaluation.state) {
                (Some(probe), PipelineState::RemuxPlanned) => probe,
                (_, state) => {
                    let reason = skip_reason_of(state);
                    log_skip(&request.file_in, &reason);
                    return WorkerResponse::unchanged(&request, reason);
                }
            };

            let output = derive_output_path(&request.file_out, &settings.output_ext);
            let command = CommandBuilder::new(StreamPolicy::CopyAll)
                .with_main_options(settings.main_options.clone())
                .with_advanced_options(settings.advanced_options.clone())
                .build(&request.file_in, &output, &probe.streams);
            trace!("State: {}", PipelineState::CommandBuilt);
            log_command(&command);

            WorkerResponse {
                exec_command: command.exec_command(&self.config.tools.ffmpeg),
                file_out: command.output_path,
                repeat: false,
                command_progress_parser: Some(ProgressParser::new(probe.duration())),
                skip: None,
            }
        }
        .instrument(span)
        .await
    }

    /// Runs the shared part of both passes, up to the remux verdict.
    async fn evaluate(
        &self,
        path: &Path,
        settings: &ProcessingConfig,
        shared_info: Option<&SharedInfo>,
    ) -> Evaluation {
        let mut state = PipelineState::Untested;
        trace!("State: {}", state);

        let current_ext = extension_of(path);
        if !settings.accepts_extension(&current_ext) {
            return Evaluation {
                probe: None,
                state: PipelineState::Skip(SkipReason::ExtensionNotEligible(current_ext)),
                classification: Classification::default(),
            };
        }

        let adapter = ProbeAdapter::video(&self.prober);
        let probe = match adapter.resolve(path, shared_info).await {
            Ok(probe) => probe,
            Err(e) => {
                return Evaluation {
                    probe: None,
                    state: PipelineState::Skip(SkipReason::ProbeFailure(e.to_string())),
                    classification: Classification::default(),
                };
            }
        };
        debug!(
            "Probed {} stream(s), {} audio",
            probe.streams.len(),
            probe.count_of(&StreamType::Audio)
        );
        state = advance(state, PipelineState::Probed);

        let classification = StreamClassifier::audio(settings.audio_codecs.clone())
            .classify(&probe.streams);
        state = advance(state, PipelineState::Classified);

        let decision =
            MappingDecision::evaluate(&classification, &current_ext, &settings.output_ext);
        let next = match decision.skip_reason(&current_ext, &settings.output_ext) {
            None => PipelineState::RemuxPlanned,
            Some(reason) => PipelineState::Skip(reason),
        };
        state = advance(state, next);

        Evaluation {
            probe: Some(probe),
            state,
            classification,
        }
    }
}

fn advance(from: PipelineState, to: PipelineState) -> PipelineState {
    trace!("State: {} -> {}", from, to);
    to
}

fn skip_reason_of(state: &PipelineState) -> SkipReason {
    match state {
        PipelineState::Skip(reason) => reason.clone(),
        other => SkipReason::ProbeFailure(format!("pipeline stopped while {}", other)),
    }
}
