use thiserror::Error;

#[derive(Debug, Error)]
#[error("unable to encode card message: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

#[derive(Debug, Error)]
#[error("invalid card message JSON: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// A button object with neither `textButton` nor `imageButton` set.
#[derive(Debug, Error)]
#[error("button sets neither textButton nor imageButton")]
pub struct EmptyButton;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid message type: {0} (expected one of yes, info, warning, error)")]
    UnknownSeverity(String),
    #[error("no webhook provided and {0} is not set")]
    MissingWebhook(&'static str),
    #[error("unable to read images file {path}: {source}")]
    ImagesFile {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid images file: {0}")]
    Images(#[from] serde_json5::Error),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
