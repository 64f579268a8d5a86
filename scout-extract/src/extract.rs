//! Tolerant page extraction over a scoped browser session.
//!
//! Each operation acquires one session, performs one traversal, and releases
//! the session on every exit path. Operational faults (timeouts, transport
//! errors, per-node read failures) never escape: they are logged and
//! downgraded to the operation's documented empty result, so a caller can
//! treat "page had no heading" and "page timed out" identically. Only
//! session construction failures propagate, as [`SetupError`].

use std::time::Duration;

use anyhow::Result;
use scout_common::ScoutConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::session::{PageSession, ReadyCondition, SessionFactory, SetupError};

/// One anchor found during a link scan.
///
/// `text` is always non-empty; anchors whose trimmed text is blank are
/// dropped at the source. `href` floors at the empty string and is never
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub text: String,
    pub href: String,
}

/// Title and address of a loaded page.
///
/// `url` is never empty: when the browser cannot report a location it falls
/// back to the address that was requested. `title` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub title: String,
    pub url: String,
}

/// Extracts normalized results from live pages.
///
/// Owns no state across calls; each operation runs against a fresh session
/// from the factory and tears it down unconditionally.
pub struct PageExtractor<F> {
    factory: F,
    wait_timeout: Duration,
    heading_tags: Vec<String>,
}

impl<F: SessionFactory> PageExtractor<F> {
    /// Build an extractor with the stock wait bound (10 s) and heading
    /// preference list (`h1`, `h2`, `h3`).
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            wait_timeout: Duration::from_secs(10),
            heading_tags: vec!["h1".to_string(), "h2".to_string(), "h3".to_string()],
        }
    }

    /// Build an extractor honoring the workspace configuration.
    pub fn from_config(factory: F, config: &ScoutConfig) -> Self {
        Self {
            factory,
            wait_timeout: Duration::from_secs(config.wait_timeout_secs),
            heading_tags: config.heading_tags.clone(),
        }
    }

    /// Replace the wait bound applied to every readiness suspension.
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    /// Replace the ordered list of heading tags tried in sequence.
    pub fn with_heading_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.heading_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Text of the first heading on the page, trying each preferred tag in
    /// order. `None` when no preferred tag matches — a normal outcome — and
    /// also when the page times out or the session faults.
    pub async fn heading(&self, url: &str) -> std::result::Result<Option<String>, SetupError> {
        let session = self.factory.connect().await?;
        let outcome = self.heading_in(session.as_ref(), url).await;
        session.close().await;

        match outcome {
            Ok(found) => Ok(found),
            Err(fault) => {
                warn!(
                    target: "scout.extract",
                    %url,
                    error = %fault,
                    "heading extraction degraded to absent"
                );
                Ok(None)
            }
        }
    }

    async fn heading_in(&self, session: &dyn PageSession, url: &str) -> Result<Option<String>> {
        session.open(url).await?;
        session
            .wait_until(
                ReadyCondition::ElementPresent("body".to_string()),
                self.wait_timeout,
            )
            .await?;

        for tag in &self.heading_tags {
            if let Some(node) = session.find_all(tag).await?.into_iter().next() {
                return Ok(Some(node.text().await?));
            }
        }
        Ok(None)
    }

    /// Every anchor on the page with non-blank text, in document order.
    /// Anchors missing an `href` are kept with `href == ""`; a fault reading
    /// one anchor skips only that anchor. An empty vector is a valid result,
    /// and also the sentinel when the page times out or the session faults.
    pub async fn links(&self, url: &str) -> std::result::Result<Vec<LinkRecord>, SetupError> {
        let session = self.factory.connect().await?;
        let outcome = self.links_in(session.as_ref(), url).await;
        session.close().await;

        match outcome {
            Ok(records) => Ok(records),
            Err(fault) => {
                warn!(
                    target: "scout.extract",
                    %url,
                    error = %fault,
                    "link extraction degraded to empty"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn links_in(&self, session: &dyn PageSession, url: &str) -> Result<Vec<LinkRecord>> {
        session.open(url).await?;
        session
            .wait_until(
                ReadyCondition::ElementPresent("body".to_string()),
                self.wait_timeout,
            )
            .await?;

        let mut records = Vec::new();
        for (index, node) in session.find_all("a").await?.into_iter().enumerate() {
            let text = match node.text().await {
                Ok(text) => text,
                Err(fault) => {
                    debug!(target: "scout.extract", index, error = %fault, "skipping unreadable anchor");
                    continue;
                }
            };
            let href = match node.attribute("href").await {
                Ok(href) => href.unwrap_or_default(),
                Err(fault) => {
                    debug!(target: "scout.extract", index, error = %fault, "skipping unreadable anchor");
                    continue;
                }
            };

            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            records.push(LinkRecord {
                text: text.to_string(),
                href,
            });
        }
        Ok(records)
    }

    /// Title and current address of the page once its document is complete.
    /// Neither field propagates a missing value: the title floors at `""`
    /// and the url falls back to the requested address — on per-field
    /// faults and on whole-page ones alike.
    pub async fn page_info(&self, url: &str) -> std::result::Result<PageInfo, SetupError> {
        let session = self.factory.connect().await?;
        let outcome = self.page_info_in(session.as_ref(), url).await;
        session.close().await;

        match outcome {
            Ok(info) => Ok(info),
            Err(fault) => {
                warn!(
                    target: "scout.extract",
                    %url,
                    error = %fault,
                    "page info degraded to fallback record"
                );
                Ok(PageInfo {
                    title: String::new(),
                    url: url.to_string(),
                })
            }
        }
    }

    async fn page_info_in(&self, session: &dyn PageSession, url: &str) -> Result<PageInfo> {
        session.open(url).await?;
        session
            .wait_until(ReadyCondition::DocumentComplete, self.wait_timeout)
            .await?;

        let title = match session.title().await {
            Ok(title) => title,
            Err(fault) => {
                debug!(target: "scout.extract", error = %fault, "title unavailable, substituting empty");
                String::new()
            }
        };
        let location = match session.location().await {
            Ok(location) if !location.is_empty() => location,
            Ok(_) => url.to_string(),
            Err(fault) => {
                debug!(target: "scout.extract", error = %fault, "location unavailable, substituting requested url");
                url.to_string()
            }
        };

        Ok(PageInfo {
            title,
            url: location,
        })
    }
}
