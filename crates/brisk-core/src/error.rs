use thiserror::Error;

/// Errors raised while loading fonts.
#[derive(Error, Debug)]
pub enum FontError {
    #[error("Invalid font data: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FontError>;
