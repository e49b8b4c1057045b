use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Video search failed: {0}")]
    VideoSearchFailed(String),

    #[error("Lyrics fetch failed: {0}")]
    LyricsFetchFailed(String),

    #[error("Image generation failed: {0}")]
    ImageGenerationFailed(String),
}

pub type Result<T> = std::result::Result<T, MetadataError>;
