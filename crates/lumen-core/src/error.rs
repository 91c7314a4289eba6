//! Resolution error types

use std::sync::Arc;

use thiserror::Error;

/// Errors produced while turning a source descriptor into a reference
///
/// Cheap to clone so it can travel inside UI messages.
#[derive(Error, Debug, Clone)]
pub enum ResolveError {
    /// The dynamic resolver returned an error
    #[error("source resolver rejected: {0:#}")]
    Rejected(Arc<anyhow::Error>),
}

impl ResolveError {
    /// Wrap a resolver's rejection cause
    pub fn rejected(cause: anyhow::Error) -> Self {
        Self::Rejected(Arc::new(cause))
    }

    /// The original error returned by the resolver
    pub fn cause(&self) -> &anyhow::Error {
        match self {
            Self::Rejected(cause) => cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_keeps_cause_chain() {
        let cause = anyhow::anyhow!("connection reset").context("network error");
        let err = ResolveError::rejected(cause);

        assert_eq!(err.cause().to_string(), "network error");
        assert_eq!(
            err.to_string(),
            "source resolver rejected: network error: connection reset"
        );
    }
}
