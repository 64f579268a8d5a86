use crate::browser::{
    options::{build_capabilities, BrowserOptions},
    pacing::Pacing,
    page::ScoutPage,
};
use anyhow::Result;
use fantoccini::ClientBuilder;
use scout_common::ScoutConfig;
use tracing::info;

/// Thin wrapper around a `fantoccini` WebDriver client.
///
/// One driver owns one browser session; acquire it at the top of a task and
/// [`close`](ScoutDriver::close) it when the task is done.
pub struct ScoutDriver {
    client: fantoccini::Client,
    pacing: Pacing,
}

impl ScoutDriver {
    /// Create a new driver connected to a running WebDriver service.
    ///
    /// Default: connects to `http://localhost:9515` (Chromedriver); the
    /// `SCOUT_WEBDRIVER_URL` environment variable overrides the configured
    /// endpoint to support Gecko or remote services.
    pub async fn connect(options: &BrowserOptions, endpoint: &str) -> Result<Self> {
        let caps = build_capabilities(options);
        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(endpoint)
            .await?;
        info!(target: "browser.session", %endpoint, headless = options.headless, "browser session started");

        let pacing = if options.headless {
            Pacing::disabled()
        } else {
            Pacing::new()
        };
        Ok(Self { client, pacing })
    }

    /// Connect using the workspace configuration, honoring the env override.
    pub async fn from_config(config: &ScoutConfig) -> Result<Self> {
        let endpoint = std::env::var("SCOUT_WEBDRIVER_URL")
            .unwrap_or_else(|_| config.webdriver_url.clone());
        Self::connect(&BrowserOptions::from_config(config), &endpoint).await
    }

    /// A page handle over this session without navigating anywhere yet.
    pub fn page(&self) -> ScoutPage {
        ScoutPage::new(self.client.clone(), self.pacing.clone())
    }

    /// Navigate to `url` and return the page handle.
    pub async fn goto(&self, url: &str) -> Result<ScoutPage> {
        let page = self.page();
        page.goto(url).await?;
        Ok(page)
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}
