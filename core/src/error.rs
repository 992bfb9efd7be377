use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Save record could not be decoded")]
    MalformedSave,
    #[error("Unsupported save version {0}")]
    UnsupportedVersion(u32),
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Color index {0} is outside the palette")]
    InvalidColorIndex(i8),
    #[error("Preview does not hold a full spawn batch")]
    InvalidPreview,
    #[error("High score is lower than the current score")]
    InconsistentScore,
}

pub type Result<T> = core::result::Result<T, GameError>;
