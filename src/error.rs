use crate::classify::ClassifyError;

/// Failure taxonomy for the relay. Per-event variants are logged and the
/// event dropped; `ConfigMissing` and `Connection` are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("missing required configuration value: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Classification(#[from] ClassifyError),

    #[error("media download failed: {0}")]
    Fetch(anyhow::Error),

    #[error("discord delivery failed: {0}")]
    Send(anyhow::Error),

    #[error("connection failed: {0}")]
    Connection(anyhow::Error),
}
