use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("FFmpeg error: {message}")]
    Ffmpeg { message: String },

    #[error("Probe error: {message}")]
    Probe { message: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Tool error: {0}")]
    Tool(String),
}

impl Error {
    pub fn ffmpeg<T: Into<String>>(message: T) -> Self {
        Self::Ffmpeg {
            message: message.into(),
        }
    }

    pub fn probe<T: Into<String>>(message: T) -> Self {
        Self::Probe {
            message: message.into(),
        }
    }

    pub fn parse<T: Into<String>>(message: T) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
