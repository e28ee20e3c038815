use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid comic id: {0:?}")]
    InvalidComicId(String),
    #[error("invalid user id: {0:?}")]
    InvalidUserId(String),
    #[error("comic {id} has a frame count of zero")]
    ZeroFrameCount { id: String },
    #[error("comic {id} has an empty title")]
    EmptyTitle { id: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
