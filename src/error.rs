use thiserror::Error;

/// Failures reported by the engine boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("limit reached ({count})")]
    LimitReached { count: i32 },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("{0}")]
    Other(String),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum AppearanceError {
    #[error("engine request failed: {0}")]
    Engine(#[from] EngineError),
    #[error("boost level {level} is below the required {required}")]
    BoostRequired { level: u32, required: u32 },
    #[error("premium subscription required")]
    PremiumRequired,
}
