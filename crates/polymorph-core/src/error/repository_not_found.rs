use super::Error;

/// Error when a type token names no repository.
///
/// Raised by repository resolution when neither a custom handle is
/// registered for the token nor a generic handle can be constructed for it,
/// usually because the token names a model that was never registered. This
/// is a configuration error and is never retried.
#[derive(Debug)]
pub(super) struct RepositoryNotFound {
    model: Box<str>,
}

impl std::error::Error for RepositoryNotFound {}

impl core::fmt::Display for RepositoryNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "repository not found: {}", self.model)
    }
}

impl Error {
    /// Creates a repository not found error for the given type token.
    pub fn repository_not_found(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::RepositoryNotFound(RepositoryNotFound {
            model: model.into().into(),
        }))
    }

    /// Returns `true` if this error is a repository not found error.
    pub fn is_repository_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RepositoryNotFound(_))
    }
}
