use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg: String,
    pub ffprobe: String,
    /// Upper bound for one ffmpeg run when the CLI executes a plan.
    pub timeout_seconds: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
            timeout_seconds: 6 * 60 * 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub show_timestamps: bool,
    pub colored_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            show_timestamps: true,
            colored_output: true,
        }
    }
}

/// Plugin settings as stored by the host, free text included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemuxSettings {
    /// Comma separated audio codec names.
    pub audio_codecs: String,
    /// Comma separated extensions a file must have to be tested.
    pub input_file_ext: String,
    pub output_ext: String,
    /// Enables `main_options` and `advanced_options`.
    pub advanced: bool,
    pub main_options: String,
    pub advanced_options: String,
}

impl Default for RemuxSettings {
    fn default() -> Self {
        Self {
            audio_codecs: String::new(),
            input_file_ext: String::new(),
            output_ext: "mkv".to_string(),
            advanced: false,
            main_options: String::new(),
            advanced_options: String::new(),
        }
    }
}

impl RemuxSettings {
    /// Boolean value of a settings key, used by the form visibility rules.
    pub fn flag(&self, key: &str) -> bool {
        match key {
            "advanced" => self.advanced,
            _ => false,
        }
    }

    pub fn resolve(&self) -> ProcessingConfig {
        let (main_options, advanced_options) = if self.advanced {
            (
                split_tokens(&self.main_options),
                split_tokens(&self.advanced_options),
            )
        } else {
            (Vec::new(), Vec::new())
        };

        ProcessingConfig {
            audio_codecs: split_list(&self.audio_codecs),
            input_file_ext: split_list(&self.input_file_ext)
                .into_iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .filter(|ext| !ext.is_empty())
                .collect(),
            output_ext: self.output_ext.trim().trim_start_matches('.').to_string(),
            main_options,
            advanced_options,
        }
    }
}

/// Settings resolved for one decision. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingConfig {
    pub audio_codecs: BTreeSet<String>,
    pub input_file_ext: BTreeSet<String>,
    pub output_ext: String,
    pub main_options: Vec<String>,
    pub advanced_options: Vec<String>,
}

impl ProcessingConfig {
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.input_file_ext.contains(ext)
    }
}

fn split_list(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}

fn split_tokens(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_lists() {
        let settings = RemuxSettings {
            audio_codecs: " DTS, truehd,,".to_string(),
            input_file_ext: "avi,.MOV, ".to_string(),
            output_ext: ".mkv".to_string(),
            ..RemuxSettings::default()
        };

        let config = settings.resolve();
        assert_eq!(
            config.audio_codecs,
            BTreeSet::from(["dts".to_string(), "truehd".to_string()])
        );
        assert!(config.accepts_extension("avi"));
        assert!(config.accepts_extension("mov"));
        assert!(!config.accepts_extension(""));
        assert_eq!(config.output_ext, "mkv");
    }

    #[test]
    fn test_empty_lists_match_nothing() {
        let config = RemuxSettings::default().resolve();
        assert!(config.audio_codecs.is_empty());
        assert!(config.input_file_ext.is_empty());
        assert!(!config.accepts_extension(""));
    }

    #[test]
    fn test_raw_options_need_advanced() {
        let mut settings = RemuxSettings {
            main_options: "-threads  4".to_string(),
            advanced_options: "-max_muxing_queue_size 9999\n-map_metadata 0".to_string(),
            ..RemuxSettings::default()
        };
        assert!(settings.resolve().main_options.is_empty());
        assert!(settings.resolve().advanced_options.is_empty());

        settings.advanced = true;
        let config = settings.resolve();
        assert_eq!(config.main_options, vec!["-threads", "4"]);
        assert_eq!(
            config.advanced_options,
            vec!["-max_muxing_queue_size", "9999", "-map_metadata", "0"]
        );
    }
}
