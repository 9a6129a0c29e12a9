use std::path::PathBuf;
use thiserror::Error;

use super::plugin::OpenMode;
use super::status::CaptureStatus;

#[derive(Debug, Error)]
pub enum GeFileError {
    #[error("GeWriter does not support opening a file in {0:?} mode")]
    UnsupportedMode(OpenMode),
    #[error("GeWriter failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("GeWriter was asked to write {requested} events but the frame payload only holds {available}")]
    PayloadTooShort { requested: usize, available: usize },
    #[error("GeWriter was given a negative event count: {0}")]
    BadEventCount(i32),
    #[error("GeWriter requires a contiguous standard-layout frame payload")]
    NonContiguousPayload,
    #[error("GeWriter does not support reading Ge files")]
    ReadUnsupported,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration as file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Config failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Config failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Processor failed due to GeWriter error: {0}")]
    GeFileError(#[from] GeFileError),
    #[error("Processor failed due to Config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Processor failed due to Send error: {0}")]
    SendError(#[from] std::sync::mpsc::SendError<CaptureStatus>),
    #[error("Processor failed due to IO error: {0}")]
    IoError(#[from] std::io::Error),
}
