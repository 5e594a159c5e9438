//! Sessions issue requests against the game server.
//!
//! Login and session upkeep live outside this crate; a [`Session`] is
//! whatever can take a [`GameRequest`] and hand back the response page.

mod config;
mod http;

use std::future::Future;

use kolmail_protocol::GameRequest;

use crate::error::Result;

pub use config::SessionConfig;
pub use http::HttpSession;

/// An authenticated connection to the game server.
pub trait Session: Send + Sync {
    /// Issues one request and returns the response text.
    ///
    /// Requests must not overlap: callers await each one before building
    /// the next.
    fn request(&self, request: &GameRequest) -> impl Future<Output = Result<String>> + Send;
}

impl<S: Session> Session for &S {
    fn request(&self, request: &GameRequest) -> impl Future<Output = Result<String>> + Send {
        (**self).request(request)
    }
}

impl<S: Session> Session for std::sync::Arc<S> {
    fn request(&self, request: &GameRequest) -> impl Future<Output = Result<String>> + Send {
        self.as_ref().request(request)
    }
}
