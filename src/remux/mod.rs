pub mod command;
pub mod decision;

pub use command::{container_flags, derive_output_path, BuiltCommand, CommandBuilder};
pub use decision::{decide, extension_of, normalize_extension, MappingDecision, SkipReason};
