use crate::location::LocationId;

/// Alias for `Result<T, FwError>`.
pub type FwResult<T> = Result<T, FwError>;

/// Errors that can occur when manipulating a world.
#[derive(Debug, thiserror::Error)]
pub enum FwError {
    /// A location with the same name already exists.
    #[error("location already exists: \"{0}\"")]
    DuplicateName(String),

    /// The requested location ID does not exist in the world.
    #[error("location not found: {0}")]
    LocationNotFound(LocationId),

    /// The world contains no locations, so no session can start.
    #[error("world has no start location")]
    NoStartLocation,
}
