/// Result alias used across the crate.
pub type KeepResult<T> = Result<T, KeepError>;

#[derive(thiserror::Error, Debug)]
pub enum KeepError {
    /// Malformed time string, unparsable numeric config or undecodable asset.
    #[error("format error: {0}")]
    Format(String),

    /// Missing local asset or font file.
    #[error("not found: {0}")]
    NotFound(String),

    /// Network failure or timeout while fetching a remote asset.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Input outside the domain of a derived computation.
    #[error("domain error: {0}")]
    Domain(String),

    /// Canvas operation invoked before a base image was loaded.
    #[error("state error: {0}")]
    State(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KeepError {
    /// Build a [`KeepError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build a [`KeepError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`KeepError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`KeepError::Domain`] value.
    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    /// Build a [`KeepError::State`] value.
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    pub(crate) fn no_base_image() -> Self {
        Self::state("no base image loaded")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
