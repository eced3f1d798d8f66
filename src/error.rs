use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the outer boundaries of the particle engine.
///
/// The physics step itself never fails; these variants are produced only by
/// validated constructors, config checks and index-based host operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Particle index not present in the collection.
    #[error("out of bounds: {0}")]
    OutOfBounds(String),
}
