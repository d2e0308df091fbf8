use crate::utils::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(name = "remux-audio")]
#[command(about = "Moves media files with selected audio codecs into another container")]
#[command(long_about = "
Probes media files, looks for audio streams in a configured list of codecs and
plans a stream-copy remux into the configured output container. Nothing is
re-encoded; files without a matching stream or already in the target container
are left alone.

EXAMPLES:
  # Show what would be done for a single file
  remux-audio -i movie.avi

  # Remux a whole directory with library specific settings
  remux-audio -i ~/Videos/Movies/ --library-id 2 --execute

  # Check a configuration file
  remux-audio --config remux.yaml --validate-config
")]
pub struct CliArgs {
    /// Input media file or directory (can be specified multiple times)
    #[arg(short, long, value_name = "PATH", action = clap::ArgAction::Append)]
    pub input: Vec<PathBuf>,

    /// Configuration file path (defaults to ./remux.yaml, then the user config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use the settings of this library instead of the global section
    #[arg(long, value_name = "ID")]
    pub library_id: Option<u32>,

    /// Run the planned commands instead of only printing them
    #[arg(long)]
    pub execute: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print the effective settings and the form fields they show
    #[arg(long)]
    pub show_settings: bool,

    /// Validate configuration file
    #[arg(long)]
    pub validate_config: bool,
}

impl CliArgs {
    pub fn get_log_level<'a>(&self, config_level: &'a str) -> &'a str {
        if self.debug {
            "debug"
        } else {
            config_level
        }
    }

    pub fn should_use_color(&self) -> bool {
        !self.no_color && console::Term::stdout().features().colors_supported()
    }

    pub fn is_info_command(&self) -> bool {
        self.show_settings || self.validate_config
    }

    pub fn should_process(&self) -> bool {
        !self.is_info_command() && !self.input.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.should_process() {
            for input in &self.input {
                if !input.exists() {
                    return Err(crate::utils::Error::validation(format!(
                        "Input path does not exist: {}",
                        input.display()
                    )));
                }
            }
        }

        if let Some(config) = &self.config {
            if !config.exists() {
                return Err(crate::utils::Error::validation(format!(
                    "Configuration file does not exist: {}",
                    config.display()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inputs_and_flags() {
        let args = CliArgs::parse_from([
            "remux-audio",
            "-i",
            "a.avi",
            "--input",
            "movies",
            "--library-id",
            "4",
            "--execute",
        ]);

        assert_eq!(
            args.input,
            vec![PathBuf::from("a.avi"), PathBuf::from("movies")]
        );
        assert_eq!(args.library_id, Some(4));
        assert!(args.execute);
        assert!(args.should_process());
    }

    #[test]
    fn test_info_commands_skip_processing() {
        let args = CliArgs::parse_from(["remux-audio", "-i", "a.avi", "--show-settings"]);
        assert!(args.is_info_command());
        assert!(!args.should_process());
    }

    #[test]
    fn test_debug_overrides_config_level() {
        let args = CliArgs::parse_from(["remux-audio", "--debug"]);
        assert_eq!(args.get_log_level("warn"), "debug");

        let args = CliArgs::parse_from(["remux-audio"]);
        assert_eq!(args.get_log_level("warn"), "warn");
    }

    #[test]
    fn test_missing_config_file_is_rejected() {
        let args = CliArgs::parse_from(["remux-audio", "--config", "/nonexistent/remux.yaml"]);
        assert!(args.validate().is_err());
    }
}
