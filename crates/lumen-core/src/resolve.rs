//! Resolution routine: source descriptor -> reference or failure
//!
//! Literal sources resolve on the spot. Dynamic sources hand back a future
//! that the embedder drives on its own event loop. Rejections are turned
//! into [`Outcome::Failed`]; nothing is raised to the caller.

use crate::error::ResolveError;
use crate::source::{BoxFuture, SourceDescriptor};

/// Result of one resolution
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The reference to hand to the rendering primitive
    Resolved(String),
    /// The resolver rejected
    Failed(ResolveError),
}

impl Outcome {
    /// Resolved reference, if any
    pub fn reference(&self) -> Option<&str> {
        match self {
            Self::Resolved(reference) => Some(reference),
            Self::Failed(_) => None,
        }
    }
}

/// Either an immediate outcome or one that still has to be awaited
pub enum Resolution {
    /// Literal source, no suspension
    Ready(Outcome),
    /// Dynamic source, the resolver has been invoked
    Pending(BoxFuture<Outcome>),
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(outcome) => f.debug_tuple("Ready").field(outcome).finish(),
            Self::Pending(_) => f.write_str("Pending(<future>)"),
        }
    }
}

/// Start resolving a descriptor
pub fn begin(descriptor: &SourceDescriptor) -> Resolution {
    match descriptor {
        SourceDescriptor::Literal(reference) => {
            Resolution::Ready(Outcome::Resolved(reference.clone()))
        }
        SourceDescriptor::Dynamic(resolver) => {
            let produce = resolver.invoke();
            Resolution::Pending(Box::pin(async move {
                match produce.await {
                    Ok(reference) => Outcome::Resolved(reference),
                    Err(cause) => Outcome::Failed(ResolveError::rejected(cause)),
                }
            }))
        }
    }
}

/// Resolve a descriptor to completion
pub async fn resolve(descriptor: &SourceDescriptor) -> Outcome {
    match begin(descriptor) {
        Resolution::Ready(outcome) => outcome,
        Resolution::Pending(future) => future.await,
    }
}
