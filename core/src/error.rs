use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Mine layout must contain at least one mine")]
    NoMines,
}

pub type Result<T> = core::result::Result<T, GameError>;
