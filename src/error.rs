use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the storage layer, the aggregation functions and the
/// interactive session. Storage failures are classified here at the
/// store/registry boundary; callers decide how to present them.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad input: empty name or title, out-of-range rating or year.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The user already owns a movie with this title.
    #[error("movie '{0}' is already saved")]
    DuplicateTitle(String),

    /// Unknown user id or movie title.
    #[error("{0} not found")]
    NotFound(String),

    /// An aggregation was requested over an empty collection.
    #[error("no movies in the collection")]
    EmptyCollection,

    /// Underlying storage failure not otherwise classified.
    #[error("storage failure: {0}")]
    Persistence(#[from] rusqlite::Error),

    /// Terminal input could not be read.
    #[error("input error: {0}")]
    Input(String),

    /// A generated file (histogram, website) could not be written.
    #[error("could not write {path}: {source}")]
    Output {
        path: String,
        source: std::io::Error,
    },
}

impl From<rustyline::error::ReadlineError> for Error {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        Error::Input(err.to_string())
    }
}
