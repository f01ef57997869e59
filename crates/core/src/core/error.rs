use thiserror::Error;

/// Everything that can go wrong while resolving or mounting a view.
#[derive(Debug, Error)]
pub enum NavError {
    /// The path has no entry in the route table (after `/` substitution).
    #[error("no route for path `{0}`")]
    UnknownPath(String),

    /// A view tried to bind a trigger to an element its markup does not contain.
    #[error("element `#{0}` not found in mounted content")]
    MissingElement(String),

    /// The host environment refused an operation (history, DOM, listeners).
    #[error("host error: {0}")]
    Host(String),

    #[error("invalid runtime config: {0}")]
    Config(#[from] serde_json::Error),
}

impl NavError {
    pub fn host(msg: impl Into<String>) -> Self {
        NavError::Host(msg.into())
    }

    /// True for lookup failures, the only error a caller can provoke with a bad path.
    pub fn is_unknown_path(&self) -> bool {
        matches!(self, NavError::UnknownPath(_))
    }
}
