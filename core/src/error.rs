use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Hole index out of range")]
    InvalidHole,
    #[error("Round already ended, no new moles are accepted")]
    RoundOver,
}

pub type Result<T> = core::result::Result<T, GameError>;
