use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("no subscriber on topic {topic}")]
    NoSubscribers { topic: &'static str },
    #[error("transport closed")]
    Closed,
    #[error("failed to encode {topic} message: {source}")]
    Encode {
        topic: &'static str,
        source: serde_json::Error,
    },
    #[error("transport send failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tick period must be greater than zero")]
    ZeroTickPeriod,
    #[error("invalid socket address for {key}: {value}")]
    InvalidAddress { key: &'static str, value: String },
    #[error("warmup must be at least one tick")]
    ZeroWarmup,
}
