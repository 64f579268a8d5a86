//! Concrete session implementations backed by the fantoccini driver layer.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use scout_common::ScoutConfig;
use scout_drivers::browser::{BrowserOptions, ScoutDriver, ScoutElement, ScoutPage};

use crate::session::{
    InteractiveNode, InteractiveSession, InteractiveSessionFactory, PageNode, PageSession,
    ReadyCondition, SessionFactory, SetupError,
};

/// Opens one fresh WebDriver session per extraction call.
pub struct WebDriverSessionFactory {
    options: BrowserOptions,
    endpoint: String,
}

impl WebDriverSessionFactory {
    pub fn new(config: &ScoutConfig) -> Self {
        let endpoint = std::env::var("SCOUT_WEBDRIVER_URL")
            .unwrap_or_else(|_| config.webdriver_url.clone());
        Self {
            options: BrowserOptions::from_config(config),
            endpoint,
        }
    }

    async fn start(&self) -> std::result::Result<WebDriverSession, SetupError> {
        let driver = ScoutDriver::connect(&self.options, &self.endpoint)
            .await
            .map_err(SetupError)?;
        let page = driver.page();
        Ok(WebDriverSession { driver, page })
    }
}

#[async_trait]
impl SessionFactory for WebDriverSessionFactory {
    async fn connect(&self) -> std::result::Result<Box<dyn PageSession>, SetupError> {
        Ok(Box::new(self.start().await?))
    }
}

#[async_trait]
impl InteractiveSessionFactory for WebDriverSessionFactory {
    async fn connect(&self) -> std::result::Result<Box<dyn InteractiveSession>, SetupError> {
        Ok(Box::new(self.start().await?))
    }
}

/// One live browser session serving one extraction call.
pub struct WebDriverSession {
    driver: ScoutDriver,
    page: ScoutPage,
}

impl WebDriverSession {
    async fn await_condition(
        &self,
        condition: ReadyCondition,
        timeout: Duration,
    ) -> Result<()> {
        match condition {
            ReadyCondition::ElementPresent(selector) => {
                self.page.wait_for_css(&selector, timeout).await?;
                Ok(())
            }
            ReadyCondition::DocumentComplete => {
                self.page.wait_for_document_complete(timeout).await
            }
        }
    }

    async fn release(self) {
        // Teardown is best effort; a failed close must never replace the
        // primary result.
        let _ = self.driver.close().await;
    }
}

#[async_trait]
impl PageSession for WebDriverSession {
    async fn open(&self, url: &str) -> Result<()> {
        self.page.goto(url).await
    }

    async fn wait_until(&self, condition: ReadyCondition, timeout: Duration) -> Result<()> {
        self.await_condition(condition, timeout).await
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn PageNode>>> {
        let elements = self.page.find_all_css(selector).await?;
        Ok(elements
            .into_iter()
            .map(|e| Box::new(e) as Box<dyn PageNode>)
            .collect())
    }

    async fn title(&self) -> Result<String> {
        self.page.title().await
    }

    async fn location(&self) -> Result<String> {
        self.page.current_url().await
    }

    async fn close(self: Box<Self>) {
        self.release().await;
    }
}

#[async_trait]
impl PageNode for ScoutElement {
    async fn text(&self) -> Result<String> {
        ScoutElement::text(self).await
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.attr(name).await
    }
}

#[async_trait]
impl InteractiveSession for WebDriverSession {
    async fn open(&self, url: &str) -> Result<()> {
        self.page.goto(url).await
    }

    async fn wait_until(&self, condition: ReadyCondition, timeout: Duration) -> Result<()> {
        self.await_condition(condition, timeout).await
    }

    async fn find_one(&self, selector: &str) -> Result<Box<dyn InteractiveNode>> {
        let element = self.page.find_css(selector).await?;
        Ok(Box::new(element))
    }

    async fn location(&self) -> Result<String> {
        self.page.current_url().await
    }

    async fn close(self: Box<Self>) {
        self.release().await;
    }
}

#[async_trait]
impl InteractiveNode for ScoutElement {
    async fn text(&self) -> Result<String> {
        ScoutElement::text(self).await
    }

    async fn click(&self) -> Result<()> {
        ScoutElement::click(self).await
    }

    async fn type_text(&self, text: &str) -> Result<()> {
        self.type_paced(text).await
    }

    async fn clear(&self) -> Result<()> {
        ScoutElement::clear(self).await
    }
}
