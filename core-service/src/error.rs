use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Video/lyric/image search returned no usable result or an inaccurate
    /// match; the add-song workflow fails and no entry is created.
    #[error("Resolution failed: {reason}")]
    Resolution { reason: String },

    #[error("Library error: {0}")]
    Library(#[from] core_library::LibraryError),

    #[error("Metadata error: {0}")]
    Metadata(#[from] core_metadata::MetadataError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
