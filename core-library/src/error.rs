use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Entry not found: {id}")]
    NotFound { id: String },

    #[error("Duplicate entry id: {id}")]
    DuplicateId { id: String },

    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, LibraryError>;
