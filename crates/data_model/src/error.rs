use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidArgument,
    OutOfRange,
    InvalidSeed,
    Io,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("only 'AllGroups' is supported as a collection of groups, got '{0}'")]
    UnsupportedCollection(String),
    #[error("index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("{field} must be a positive integer, got {value}")]
    InvalidSpan { field: &'static str, value: u32 },
    #[error("image base '{base}' is not an absolute url: {source}")]
    InvalidImageBase {
        base: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid seed catalog: {0}")]
    InvalidSeed(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedCollection(_)
            | Self::InvalidSpan { .. }
            | Self::InvalidImageBase { .. } => ErrorCode::InvalidArgument,
            Self::IndexOutOfRange { .. } => ErrorCode::OutOfRange,
            Self::InvalidSeed(_) => ErrorCode::InvalidSeed,
            Self::Io(_) => ErrorCode::Io,
        }
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(value: toml::de::Error) -> Self {
        Self::InvalidSeed(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

