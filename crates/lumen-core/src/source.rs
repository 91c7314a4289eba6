//! Source descriptors
//!
//! A source is either a reference that is known up front or a resolver
//! that produces one asynchronously (network lookup, storage, signed URL...).
//! How a resolver gets its value is opaque here.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed `Send` future used for resolver and attempt futures
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

type ResolveFn = dyn Fn() -> BoxFuture<anyhow::Result<String>> + Send + Sync;

/// Zero-argument asynchronous producer of an image reference
///
/// Cloning shares the underlying function, and clones compare equal.
#[derive(Clone)]
pub struct Resolver {
    func: Arc<ResolveFn>,
}

impl Resolver {
    /// Wrap an async closure as a resolver
    pub fn new<F, Fut>(func: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<String>> + Send + 'static,
    {
        Self {
            func: Arc::new(move || -> BoxFuture<anyhow::Result<String>> { Box::pin(func()) }),
        }
    }

    /// Start the producer. The returned future does the actual work.
    pub fn invoke(&self) -> BoxFuture<anyhow::Result<String>> {
        (self.func)()
    }
}

impl PartialEq for Resolver {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl Eq for Resolver {}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resolver({:p})", Arc::as_ptr(&self.func))
    }
}

/// Where an image element gets its reference from
///
/// Equality follows binding identity: literals compare by value, dynamic
/// sources only equal clones of the same resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDescriptor {
    /// Reference usable as-is
    Literal(String),
    /// Reference produced by an async resolver
    Dynamic(Resolver),
}

impl SourceDescriptor {
    /// Literal source from anything string-like
    pub fn literal(reference: impl Into<String>) -> Self {
        Self::Literal(reference.into())
    }

    /// Dynamic source from an async closure
    ///
    /// ```ignore
    /// let src = SourceDescriptor::dynamic(|| async { Ok(fetch_signed_url().await?) });
    /// ```
    pub fn dynamic<F, Fut>(func: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<String>> + Send + 'static,
    {
        Self::Dynamic(Resolver::new(func))
    }

    /// True when resolution needs no suspension
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl From<String> for SourceDescriptor {
    fn from(reference: String) -> Self {
        Self::Literal(reference)
    }
}

impl From<&str> for SourceDescriptor {
    fn from(reference: &str) -> Self {
        Self::Literal(reference.to_string())
    }
}

impl From<Resolver> for SourceDescriptor {
    fn from(resolver: Resolver) -> Self {
        Self::Dynamic(resolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_equality_by_value() {
        assert_eq!(SourceDescriptor::literal("a.png"), SourceDescriptor::from("a.png"));
        assert_ne!(SourceDescriptor::literal("a.png"), SourceDescriptor::literal("b.png"));
    }

    #[test]
    fn test_dynamic_equality_by_identity() {
        let resolver = Resolver::new(|| async { Ok("a.png".to_string()) });
        let same = SourceDescriptor::Dynamic(resolver.clone());
        assert_eq!(SourceDescriptor::Dynamic(resolver), same);

        // Same body, different allocation: a new binding
        let a = SourceDescriptor::dynamic(|| async { Ok("a.png".to_string()) });
        let b = SourceDescriptor::dynamic(|| async { Ok("a.png".to_string()) });
        assert_ne!(a, b);
        assert!(!a.is_literal());
    }
}
