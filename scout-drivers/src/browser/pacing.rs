use anyhow::Result;
use fantoccini::elements::Element;
use rand::rngs::OsRng;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

/// Produces watchable delays and typing so a viewer can follow a demo run.
///
/// Disabled pacing turns every pause into a no-op, which is what the
/// extraction paths and headless runs want.
#[derive(Debug, Clone)]
pub struct Pacing {
    enabled: bool,
}

impl Pacing {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Sleep for a random duration between `min` and `max` milliseconds.
    pub async fn pause(&self, min: u64, max: u64) {
        if !self.enabled {
            return;
        }
        let mut rng = OsRng;
        let ms = rng.gen_range(min..=max);
        sleep(Duration::from_millis(ms)).await;
    }

    /// Type the provided text with small random delays between characters.
    pub async fn type_text(&self, element: &Element, text: &str) -> Result<()> {
        if !self.enabled {
            element.send_keys(text).await?;
            return Ok(());
        }
        for ch in text.chars() {
            element.send_keys(&ch.to_string()).await?;
            self.pause(30, 150).await;
        }
        Ok(())
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new()
    }
}
