#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("serialization failed: {0}")]
    Serialization(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CreateError {
    #[error("at least one named exercise is required")]
    NoExercises,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    #[error("not found")]
    NotFound,
    #[error("at least one named exercise is required")]
    NoExercises,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DeleteError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
