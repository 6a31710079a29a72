use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings record is corrupt: {0}")]
    Settings(#[from] listcore::SettingsError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
