use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrainerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Presentation not ready: {0}")]
    NotReady(String),
    #[error("Card art error in {path}: {reason}")]
    CardArt { path: PathBuf, reason: String },
    #[error("Invalid configuration: {0}")]
    Config(String),
}
