//! Browsing session boundary
//!
//! The crawl drives exactly one rendering session at a time. Everything the
//! extractors need from it is captured by [`PageSession`]: navigate, wait for
//! an element, pause, read the rendered document, click, probe for an
//! optional element and close.
//!
//! [`BrowserSession`] implements it on top of a headless Chromium driven
//! through `chromiumoxide`.

mod browser;

pub use browser::BrowserSession;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a browsing session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("timed out after {waited:?} waiting for `{selector}`")]
    Timeout { selector: String, waited: Duration },

    #[error("no element matches `{selector}`")]
    ElementNotFound { selector: String },

    #[error("interaction failed: {0}")]
    Interaction(String),

    #[error("session already closed")]
    Closed,

    #[error("driver error: {0}")]
    Driver(String),
}

/// One logical browsing session with a single current document
///
/// Calls are strictly sequential: a session holds mutable single-document
/// state and is never shared between concurrent tasks.
#[async_trait]
pub trait PageSession: Send {
    /// Loads `url` as the current document
    async fn navigate(&mut self, url: &str) -> Result<(), SessionError>;

    /// Waits until an element matching `selector` is present
    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), SessionError>;

    /// Rendered HTML of the current document
    async fn content(&mut self) -> Result<String, SessionError>;

    /// Clicks the first element matching `selector`
    async fn click(&mut self, selector: &str) -> Result<(), SessionError>;

    /// Returns whether an element matching `selector` is currently present
    async fn query_selector(&mut self, selector: &str) -> Result<bool, SessionError>;

    /// Fixed pause letting the page settle after an interaction
    async fn settle(&mut self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }

    /// Releases the session; further calls fail with [`SessionError::Closed`]
    async fn close(&mut self) -> Result<(), SessionError>;
}
