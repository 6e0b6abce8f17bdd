use crate::DocId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("invalid document id {0}: ids must be non-negative")]
    InvalidDocumentId(DocId),

    #[error("document id {0} is already indexed")]
    DuplicateDocumentId(DocId),

    #[error("word {0:?} contains control characters")]
    InvalidWord(String),

    #[error("query word {0:?} is invalid")]
    InvalidQueryWord(String),

    #[error("stop word {0:?} is invalid")]
    InvalidStopWord(String),

    #[error("document {0} not found")]
    DocumentNotFound(DocId),
}

impl SearchError {
    /// Everything except a lookup of a missing document is a caller-side argument error.
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, SearchError::DocumentNotFound(_))
    }
}
