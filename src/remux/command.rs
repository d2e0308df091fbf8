use super::decision::normalize_extension;
use crate::probe::StreamRecord;
use crate::stream::{Disposition, StreamPolicy};
use std::path::{Path, PathBuf};

const GENERIC_OPTIONS: &[&str] = &["-hide_banner", "-loglevel", "info"];

/// Ready-to-run FFmpeg arguments plus the file they write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltCommand {
    pub args: Vec<String>,
    pub output_path: PathBuf,
}

impl BuiltCommand {
    /// Full command line with the executable in front.
    pub fn exec_command(&self, program: &str) -> Vec<String> {
        let mut command = Vec::with_capacity(self.args.len() + 1);
        command.push(program.to_string());
        command.extend(self.args.iter().cloned());
        command
    }
}

/// Builds remux command lines.
///
/// Raw `main_options` go in front of the input, raw `advanced_options` after the
/// stream mapping. Neither is validated.
#[derive(Debug, Clone, Default)]
pub struct CommandBuilder {
    policy: StreamPolicy,
    main_options: Vec<String>,
    advanced_options: Vec<String>,
}

impl CommandBuilder {
    pub fn new(policy: StreamPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn with_main_options(mut self, tokens: Vec<String>) -> Self {
        self.main_options = tokens;
        self
    }

    pub fn with_advanced_options(mut self, tokens: Vec<String>) -> Self {
        self.advanced_options = tokens;
        self
    }

    pub fn build(&self, input: &Path, output: &Path, streams: &[StreamRecord]) -> BuiltCommand {
        let mut args: Vec<String> = GENERIC_OPTIONS.iter().map(|s| s.to_string()).collect();
        args.extend(self.main_options.iter().cloned());

        args.push("-i".to_string());
        args.push(input.to_string_lossy().to_string());

        args.extend(self.mapping_args(streams));
        args.extend(self.advanced_options.iter().cloned());

        let target_ext = output
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .unwrap_or_default();
        args.extend(container_flags(&target_ext));

        args.push("-y".to_string());
        args.push(output.to_string_lossy().to_string());

        BuiltCommand {
            args,
            output_path: output.to_path_buf(),
        }
    }

    fn mapping_args(&self, streams: &[StreamRecord]) -> Vec<String> {
        let mut args = Vec::new();
        let plan = self.policy.plan(streams);

        if streams.is_empty() {
            // Nothing probed, let ffmpeg take every input stream.
            args.push("-map".to_string());
            args.push("0".to_string());
        } else if plan.is_empty() {
            // Policy kept nothing, the output must stay empty.
            args.push("-map".to_string());
            args.push("-0".to_string());
        }

        for mapped in &plan {
            args.push("-map".to_string());
            args.push(format!("0:{}", mapped.input_index));
        }

        args.push("-c".to_string());
        args.push("copy".to_string());

        for mapped in &plan {
            if let Disposition::Encode(codec) = &mapped.disposition {
                args.push(format!("-c:{}", mapped.output_index));
                args.push(codec.clone());
            }
        }

        args
    }
}

/// Muxer flags for a target extension.
pub fn container_flags(ext: &str) -> Vec<String> {
    let ext = normalize_extension(ext);
    let muxer = match ext.as_str() {
        "mkv" | "mka" => Some("matroska"),
        "mp4" | "m4v" => Some("mp4"),
        "mov" => Some("mov"),
        "webm" => Some("webm"),
        "avi" => Some("avi"),
        "ts" | "m2ts" => Some("mpegts"),
        _ => None,
    };

    let mut flags = Vec::new();
    if matches!(ext.as_str(), "mp4" | "m4v" | "mov") {
        // truehd and dts are still flagged experimental in the mp4 muxer
        flags.push("-strict".to_string());
        flags.push("-2".to_string());
    }
    if let Some(muxer) = muxer {
        flags.push("-f".to_string());
        flags.push(muxer.to_string());
    }
    flags
}

/// Swaps the extension of `file_out` for `output_ext`; the rest of the path is kept.
pub fn derive_output_path(file_out: &Path, output_ext: &str) -> PathBuf {
    let ext = output_ext.trim().trim_start_matches('.');
    file_out.with_extension(ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::StreamType;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn movie_streams() -> Vec<StreamRecord> {
        vec![
            StreamRecord::new(0, StreamType::Video, Some("h264")),
            StreamRecord::new(1, StreamType::Audio, Some("dts")),
        ]
    }

    fn tokens(parts: &[&str]) -> Vec<String> {
        parts
            .iter()
            .flat_map(|part| part.split_whitespace())
            .map(str::to_string)
            .collect()
    }

    fn build(builder: &CommandBuilder, streams: &[StreamRecord]) -> BuiltCommand {
        builder.build(Path::new("in.avi"), Path::new("out.mkv"), streams)
    }

    fn maps(command: &BuiltCommand) -> Vec<&str> {
        command
            .args
            .windows(2)
            .filter(|pair| pair[0] == "-map")
            .map(|pair| pair[1].as_str())
            .collect()
    }

    #[test]
    fn test_copy_all_command() {
        let builder = CommandBuilder::new(StreamPolicy::CopyAll);
        let input = Path::new("/m/movie.avi");
        let output = Path::new("/m/movie.mkv");
        let command = builder.build(input, output, &movie_streams());

        assert_eq!(
            command.args,
            tokens(&[
                "-hide_banner -loglevel info -i /m/movie.avi",
                "-map 0:0 -map 0:1 -c copy -f matroska -y /m/movie.mkv",
            ])
        );
        assert_eq!(command.output_path, PathBuf::from("/m/movie.mkv"));
    }

    #[test]
    fn test_raw_options_placement() {
        let builder = CommandBuilder::new(StreamPolicy::CopyAll)
            .with_main_options(tokens(&["-threads 2"]))
            .with_advanced_options(tokens(&["-max_muxing_queue_size 4096"]));
        let command = build(&builder, &movie_streams());

        let pos = |token: &str| command.args.iter().position(|a| a == token).unwrap();
        assert!(pos("-threads") < pos("-i"));
        assert!(pos("-c") < pos("-max_muxing_queue_size"));
        assert!(pos("-max_muxing_queue_size") < pos("-y"));
    }

    #[test]
    fn test_unprobed_input_maps_everything() {
        let command = build(&CommandBuilder::default(), &[]);
        assert_eq!(maps(&command), vec!["0"]);
    }

    #[test]
    fn test_filter_by_index_keeps_listed_streams() {
        let builder = CommandBuilder::new(StreamPolicy::FilterByIndex(BTreeSet::from([1])));
        let command = build(&builder, &movie_streams());
        assert_eq!(maps(&command), vec!["0:1"]);
    }

    #[test]
    fn test_filter_keeping_nothing_never_maps_all_streams() {
        let empty = CommandBuilder::new(StreamPolicy::FilterByIndex(BTreeSet::new()));
        let unknown = CommandBuilder::new(StreamPolicy::FilterByIndex(BTreeSet::from([7])));

        for builder in [empty, unknown] {
            let command = build(&builder, &movie_streams());
            assert_eq!(maps(&command), vec!["-0"]);
        }
    }

    #[test]
    fn test_remap_adds_per_stream_codec() {
        let policy = StreamPolicy::Remap {
            indices: BTreeSet::from([1]),
            codec: "flac".to_string(),
        };
        let command = build(&CommandBuilder::new(policy), &movie_streams());

        let pos = command.args.iter().position(|a| a == "-c:1").unwrap();
        assert_eq!(command.args[pos + 1], "flac");
    }

    #[test]
    fn test_container_flags() {
        assert_eq!(container_flags("mkv"), tokens(&["-f matroska"]));
        assert_eq!(container_flags(".MP4"), tokens(&["-strict -2 -f mp4"]));
        assert!(container_flags("xyz").is_empty());
    }

    #[test]
    fn test_derive_output_path() {
        assert_eq!(
            derive_output_path(Path::new("/lib/movie.avi"), "mkv"),
            PathBuf::from("/lib/movie.mkv")
        );
        assert_eq!(
            derive_output_path(Path::new("/lib.v2/movie"), ".mkv"),
            PathBuf::from("/lib.v2/movie.mkv")
        );
        assert_eq!(
            derive_output_path(Path::new("/tmp/cache/file-1.tar.avi"), "mp4"),
            PathBuf::from("/tmp/cache/file-1.tar.mp4")
        );
    }

    #[test]
    fn test_exec_command() {
        let command = BuiltCommand {
            args: tokens(&["-i a"]),
            output_path: PathBuf::from("b"),
        };
        assert_eq!(command.exec_command("ffmpeg"), tokens(&["ffmpeg -i a"]));
    }
}
