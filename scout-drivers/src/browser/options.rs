use scout_common::ScoutConfig;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use webdriver::capabilities::Capabilities;

/// How the browser window is presented.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum WindowMode {
    /// Start maximized, the default for watchable demo runs.
    Maximized,
    /// Fixed size in CSS pixels.
    Sized(u32, u32),
}

/// Chrome session options assembled into WebDriver capabilities.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub headless: bool,
    pub window: WindowMode,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: false,
            window: WindowMode::Maximized,
        }
    }
}

impl BrowserOptions {
    pub fn from_config(config: &ScoutConfig) -> Self {
        Self {
            headless: config.headless,
            ..Self::default()
        }
    }
}

/// Construct Chrome command-line arguments for the given options.
///
/// The automation-banner suppression flags keep the demo pages rendering the
/// way the tutorials show them, without the "controlled by automated test
/// software" infobar.
pub fn build_browser_arguments(options: &BrowserOptions) -> Vec<String> {
    let mut args = vec![
        "--disable-blink-features=AutomationControlled".to_string(),
        "--disable-infobars".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--no-sandbox".to_string(),
    ];
    match options.window {
        WindowMode::Maximized => args.push("--start-maximized".to_string()),
        WindowMode::Sized(width, height) => {
            args.push(format!("--window-size={},{}", width, height))
        }
    }
    if options.headless {
        args.push("--headless=new".to_string());
        args.push("--disable-gpu".to_string());
    }
    args
}

/// Assemble the `goog:chromeOptions` capability payload.
pub fn build_capabilities(options: &BrowserOptions) -> Capabilities {
    let mut caps = Capabilities::new();
    let mut chrome_opts = HashMap::new();
    chrome_opts.insert("args".to_string(), json!(build_browser_arguments(options)));
    chrome_opts.insert(
        "excludeSwitches".to_string(),
        json!(["enable-automation"]),
    );
    caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));
    caps
}
