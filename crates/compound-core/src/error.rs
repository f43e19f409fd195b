use thiserror::Error;

/// Failure reading a typed value out of [`Props`](crate::Props).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropError {
    #[error("property `{0}` is not set")]
    Missing(String),
    #[error("property `{key}` holds a {found}, expected a {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Every pass left the composition dirty again (a component keeps
    /// mutating state while it renders).
    #[error("composition still dirty after {passes} render passes")]
    Unsettled { passes: usize },
}
