//! Authentication token acquisition.
//!
//! The auth provider is external; the reader only needs "give me a bearer
//! token, or tell me there is none". A fresh token is requested for every
//! underlying network attempt so short-lived tokens stay valid.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

/// Source of bearer tokens for the read endpoint.
///
/// `None` means the caller is unauthenticated; the reader surfaces that as
/// [`ReadError::Unauthenticated`](crate::error::ReadError::Unauthenticated).
pub trait TokenProvider: Send + Sync {
    /// Produce the current bearer token, if any.
    fn bearer_token(&self) -> BoxFuture<'_, Option<String>>;
}

/// A fixed token, for tests and simple embedders.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
    fn bearer_token(&self) -> BoxFuture<'_, Option<String>> {
        let token = self.0.clone();
        async move { Some(token) }.boxed()
    }
}

/// A provider that never has a token. Useful for exercising the
/// unauthenticated path in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
    fn bearer_token(&self) -> BoxFuture<'_, Option<String>> {
        async { None }.boxed()
    }
}

/// Adapter turning a closure into a [`TokenProvider`], for embedders whose
/// auth SDK exposes a plain async getter.
pub struct TokenFn<F>(pub F);

impl<F> TokenProvider for TokenFn<F>
where
    F: Fn() -> BoxFuture<'static, Option<String>> + Send + Sync,
{
    fn bearer_token(&self) -> BoxFuture<'_, Option<String>> {
        (self.0)()
    }
}
