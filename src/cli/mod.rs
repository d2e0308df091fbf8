pub mod args;
pub mod commands;

pub use args::CliArgs;
pub use commands::{handle_commands, process_inputs};
