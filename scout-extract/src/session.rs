//! The contract this crate consumes from the browser layer.
//!
//! Everything the extractor knows about a browser fits in these traits. The
//! concrete WebDriver-backed implementations live in `scout-drivers`; tests
//! substitute scripted fakes.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

/// Condition a session can be suspended on, bounded by a timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadyCondition {
    /// An element matching the CSS selector is present in the document.
    ElementPresent(String),
    /// `document.readyState` has reached `"complete"`.
    DocumentComplete,
}

/// Raised when a browser session cannot be constructed at all.
///
/// This is the one failure class that propagates out of the extraction
/// operations: before a session exists there is no meaningful sentinel
/// result to fall back to.
#[derive(Debug, thiserror::Error)]
#[error("session setup failed: {0}")]
pub struct SetupError(#[from] pub anyhow::Error);

/// A live page loaded in a browser session.
///
/// One session backs exactly one extraction call. Faults from any method are
/// operational: the caller downgrades them rather than letting them escape.
#[async_trait]
pub trait PageSession: Send + Sync {
    /// Begin loading `url`. Does not itself block until the page is usable;
    /// pair with [`PageSession::wait_until`].
    async fn open(&self, url: &str) -> Result<()>;

    /// Suspend until `condition` holds, or fail once `timeout` elapses.
    async fn wait_until(&self, condition: ReadyCondition, timeout: Duration) -> Result<()>;

    /// Every element matching the CSS selector, in document order. An empty
    /// vector is a normal outcome, not a fault.
    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn PageNode>>>;

    /// The document title.
    async fn title(&self) -> Result<String>;

    /// The address the browser currently reports.
    async fn location(&self) -> Result<String>;

    /// Release everything the session holds. Idempotent and infallible by
    /// contract; implementations swallow teardown faults.
    async fn close(self: Box<Self>);
}

/// A handle to one element within a [`PageSession`].
///
/// Each read is independently faultable; a fault on one node must not
/// poison reads on its siblings.
#[async_trait]
pub trait PageNode: Send + Sync {
    /// The element's rendered text.
    async fn text(&self) -> Result<String>;

    /// An attribute value, or `None` when the attribute is absent.
    async fn attribute(&self, name: &str) -> Result<Option<String>>;
}

/// Produces fresh [`PageSession`]s, one per extraction call.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn connect(&self) -> std::result::Result<Box<dyn PageSession>, SetupError>;
}

/// A session that can also drive a page: locate single elements, type into
/// them, click them. Used by the login probe; the plain extractor never
/// needs this surface.
#[async_trait]
pub trait InteractiveSession: Send + Sync {
    async fn open(&self, url: &str) -> Result<()>;

    async fn wait_until(&self, condition: ReadyCondition, timeout: Duration) -> Result<()>;

    /// The first element matching the CSS selector. Unlike
    /// [`PageSession::find_all`], no match is a fault here: the flows that
    /// use this expect the element to exist.
    async fn find_one(&self, selector: &str) -> Result<Box<dyn InteractiveNode>>;

    async fn location(&self) -> Result<String>;

    async fn close(self: Box<Self>);
}

/// An element that can be driven, not just read.
#[async_trait]
pub trait InteractiveNode: Send + Sync {
    async fn text(&self) -> Result<String>;

    async fn click(&self) -> Result<()>;

    async fn type_text(&self, text: &str) -> Result<()>;

    async fn clear(&self) -> Result<()>;
}

/// Produces fresh [`InteractiveSession`]s for the driving flows.
#[async_trait]
pub trait InteractiveSessionFactory: Send + Sync {
    async fn connect(&self) -> std::result::Result<Box<dyn InteractiveSession>, SetupError>;
}
