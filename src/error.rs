use thiserror::Error;

/// Errors surfaced by the vitalboard library.
///
/// Mid-stream telemetry failures are deliberately not represented here: per
/// the channel contract they are logged and the feed goes quiet, they never
/// propagate as errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid telemetry endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("websocket connection failed: {0}")]
    Connect(#[from] tungstenite::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
