use thiserror::Error;

/// Error type returned by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A referenced place or category does not exist.
    #[error("{entity} with id {id} does not exist")]
    MissingReference { entity: &'static str, id: i32 },
    /// A query or transaction failed; transactions roll back in full.
    #[error("database query failed: {0}")]
    Query(#[from] diesel::result::Error),
    /// No connection could be drawn from the pool.
    #[error("database connection unavailable: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// A stored value violated a domain constraint on the way out.
    #[error("invalid stored value: {0}")]
    Validation(String),
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
