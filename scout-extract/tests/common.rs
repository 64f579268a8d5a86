//! Scripted fakes for the session contract, shared by the extractor and
//! login probe tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use scout_extract::session::{
    PageNode, PageSession, ReadyCondition, SessionFactory, SetupError,
};

/// One scripted read: either a value or a per-call fault.
#[derive(Clone)]
pub enum Read<T> {
    Value(T),
    Fault,
}

impl<T> Read<T> {
    fn resolve(&self, what: &str) -> Result<T>
    where
        T: Clone,
    {
        match self {
            Read::Value(v) => Ok(v.clone()),
            Read::Fault => Err(anyhow!("{what} read failed: stale element reference")),
        }
    }
}

#[derive(Clone)]
pub struct FakeNode {
    pub text: Read<String>,
    pub href: Read<Option<String>>,
}

impl FakeNode {
    pub fn link(text: &str, href: Option<&str>) -> Self {
        Self {
            text: Read::Value(text.to_string()),
            href: Read::Value(href.map(str::to_string)),
        }
    }

    pub fn heading(text: &str) -> Self {
        Self {
            text: Read::Value(text.to_string()),
            href: Read::Value(None),
        }
    }

    pub fn unreadable_text() -> Self {
        Self {
            text: Read::Fault,
            href: Read::Value(Some("/broken".to_string())),
        }
    }

    pub fn unreadable_href(text: &str) -> Self {
        Self {
            text: Read::Value(text.to_string()),
            href: Read::Fault,
        }
    }
}

#[async_trait]
impl PageNode for FakeNode {
    async fn text(&self) -> Result<String> {
        self.text.resolve("text")
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        match name {
            "href" => self.href.resolve("href"),
            _ => Ok(None),
        }
    }
}

/// The scripted page state one fake session serves.
#[derive(Clone)]
pub struct FakePage {
    pub nodes: HashMap<String, Vec<FakeNode>>,
    pub title: Read<String>,
    pub location: Read<String>,
    pub open_fault: bool,
    pub wait_times_out: bool,
}

impl Default for FakePage {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            title: Read::Value(String::new()),
            location: Read::Value(String::new()),
            open_fault: false,
            wait_times_out: false,
        }
    }
}

impl FakePage {
    pub fn with_nodes(mut self, selector: &str, nodes: Vec<FakeNode>) -> Self {
        self.nodes.insert(selector.to_string(), nodes);
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Read::Value(title.to_string());
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Read::Value(location.to_string());
        self
    }
}

pub struct FakeSession {
    page: FakePage,
    closes: Arc<AtomicUsize>,
}

#[async_trait]
impl PageSession for FakeSession {
    async fn open(&self, url: &str) -> Result<()> {
        if self.page.open_fault {
            return Err(anyhow!("net::ERR_NAME_NOT_RESOLVED loading {url}"));
        }
        Ok(())
    }

    async fn wait_until(&self, condition: ReadyCondition, timeout: Duration) -> Result<()> {
        if self.page.wait_times_out {
            return Err(anyhow!("{condition:?} not satisfied within {timeout:?}"));
        }
        Ok(())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn PageNode>>> {
        Ok(self
            .page
            .nodes
            .get(selector)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|n| Box::new(n) as Box<dyn PageNode>)
            .collect())
    }

    async fn title(&self) -> Result<String> {
        self.page.title.resolve("title")
    }

    async fn location(&self) -> Result<String> {
        self.page.location.resolve("location")
    }

    async fn close(self: Box<Self>) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Hands out fresh sessions serving the same scripted page, and counts how
/// many sessions were opened and released.
pub struct FakeFactory {
    page: FakePage,
    refuse: bool,
    pub connects: Arc<AtomicUsize>,
    pub closes: Arc<AtomicUsize>,
}

impl FakeFactory {
    pub fn serving(page: FakePage) -> Self {
        Self {
            page,
            refuse: false,
            connects: Arc::new(AtomicUsize::new(0)),
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A factory whose driver endpoint is unreachable: every connect fails.
    pub fn refusing() -> Self {
        Self {
            page: FakePage::default(),
            refuse: true,
            connects: Arc::new(AtomicUsize::new(0)),
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

}

#[async_trait]
impl SessionFactory for FakeFactory {
    async fn connect(&self) -> std::result::Result<Box<dyn PageSession>, SetupError> {
        if self.refuse {
            return Err(SetupError(anyhow!(
                "could not reach WebDriver at http://localhost:9515"
            )));
        }
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            page: self.page.clone(),
            closes: self.closes.clone(),
        }))
    }
}
