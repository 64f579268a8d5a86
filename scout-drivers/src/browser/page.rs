use crate::browser::pacing::Pacing;
use anyhow::{Context, Result};
use fantoccini::elements::Element;
use fantoccini::wd::WindowHandle;
use fantoccini::{Client, Locator};
use scout_common::ScoutError;
use std::time::Duration;
use tokio::time::sleep;

const READY_STATE_POLL: Duration = Duration::from_millis(250);
const NEW_WINDOW_POLL: Duration = Duration::from_millis(250);

/// High-level page wrapper providing navigation, waits, element queries,
/// frame/window switching, alert handling, and script execution.
pub struct ScoutPage {
    pub(crate) client: Client,
    pacing: Pacing,
}

impl ScoutPage {
    /// Construct a page wrapper around an existing WebDriver client.
    pub fn new(client: Client, pacing: Pacing) -> Self {
        Self { client, pacing }
    }

    /// Navigate to `url`.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.client.goto(url).await.map_err(anyhow::Error::from)
    }

    /// Return the page title.
    pub async fn title(&self) -> Result<String> {
        self.client.title().await.map_err(anyhow::Error::from)
    }

    /// Return the current page URL.
    pub async fn current_url(&self) -> Result<String> {
        self.client
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(anyhow::Error::from)
    }

    /// Return the full page HTML source.
    pub async fn source(&self) -> Result<String> {
        self.client.source().await.map_err(anyhow::Error::from)
    }

    /// Find a single element.
    pub async fn find(&self, locator: Locator<'_>) -> Result<ScoutElement> {
        let element = self.client.find(locator).await?;
        Ok(ScoutElement::new(element, &self.pacing))
    }

    /// Find a single element by CSS selector.
    pub async fn find_css(&self, selector: &str) -> Result<ScoutElement> {
        self.find(Locator::Css(selector)).await
    }

    /// Find zero or more elements by CSS selector, in document order.
    pub async fn find_all_css(&self, selector: &str) -> Result<Vec<ScoutElement>> {
        self.find_all(Locator::Css(selector)).await
    }

    /// Suspend until an element matching the CSS selector is present.
    pub async fn wait_for_css(&self, selector: &str, timeout: Duration) -> Result<ScoutElement> {
        self.wait_for_element(Locator::Css(selector), timeout).await
    }

    /// Find zero or more elements, in document order.
    pub async fn find_all(&self, locator: Locator<'_>) -> Result<Vec<ScoutElement>> {
        let elements = self.client.find_all(locator).await?;
        Ok(elements
            .into_iter()
            .map(|element| ScoutElement::new(element, &self.pacing))
            .collect())
    }

    /// Suspend until an element matching `locator` is present, bounded by
    /// `timeout`.
    pub async fn wait_for_element(
        &self,
        locator: Locator<'_>,
        timeout: Duration,
    ) -> Result<ScoutElement> {
        let element = self
            .client
            .wait()
            .at_most(timeout)
            .for_element(locator)
            .await?;
        Ok(ScoutElement::new(element, &self.pacing))
    }

    /// Suspend until `document.readyState` reaches `"complete"`, bounded by
    /// `timeout`.
    pub async fn wait_for_document_complete(&self, timeout: Duration) -> Result<()> {
        let deadline = async {
            loop {
                let state = self
                    .client
                    .execute("return document.readyState;", vec![])
                    .await?;
                if state.as_str() == Some("complete") {
                    return Ok::<(), anyhow::Error>(());
                }
                sleep(READY_STATE_POLL).await;
            }
        };
        tokio::time::timeout(timeout, deadline)
            .await
            .map_err(|_| ScoutError::Timeout)
            .with_context(|| format!("document not complete within {timeout:?}"))?
    }

    /// Go back one step in the browser history.
    pub async fn back(&self) -> Result<()> {
        self.client.back().await.map_err(anyhow::Error::from)
    }

    /// Go forward one step in the browser history.
    pub async fn forward(&self) -> Result<()> {
        self.client.forward().await.map_err(anyhow::Error::from)
    }

    /// Reload the current page.
    pub async fn refresh(&self) -> Result<()> {
        self.client.refresh().await.map_err(anyhow::Error::from)
    }

    /// Resize the window to `width`×`height` CSS pixels.
    pub async fn set_window_size(&self, width: u32, height: u32) -> Result<()> {
        self.client
            .set_window_rect(0, 0, width, height)
            .await
            .map_err(anyhow::Error::from)
    }

    /// Handle of the window this session currently drives.
    pub async fn current_window(&self) -> Result<WindowHandle> {
        self.client.window().await.map_err(anyhow::Error::from)
    }

    /// Handles of every open window/tab.
    pub async fn windows(&self) -> Result<Vec<WindowHandle>> {
        self.client.windows().await.map_err(anyhow::Error::from)
    }

    /// Direct subsequent commands at the given window.
    pub async fn switch_to_window(&self, handle: WindowHandle) -> Result<()> {
        self.client
            .switch_to_window(handle)
            .await
            .map_err(anyhow::Error::from)
    }

    /// Suspend until a window not in `known` opens, and return its handle.
    pub async fn wait_for_new_window(
        &self,
        known: &[WindowHandle],
        timeout: Duration,
    ) -> Result<WindowHandle> {
        let deadline = async {
            loop {
                for handle in self.client.windows().await? {
                    if !known.contains(&handle) {
                        return Ok::<WindowHandle, anyhow::Error>(handle);
                    }
                }
                sleep(NEW_WINDOW_POLL).await;
            }
        };
        tokio::time::timeout(timeout, deadline)
            .await
            .map_err(|_| ScoutError::Timeout)
            .with_context(|| format!("no new window opened within {timeout:?}"))?
    }

    /// Direct subsequent commands inside the given frame element.
    pub async fn enter_frame(&self, frame: ScoutElement) -> Result<()> {
        // The returned client is the same session handle, now scoped to the
        // frame; switching is session state, so ours follows along.
        frame.element.enter_frame().await?;
        Ok(())
    }

    /// Return from the current frame to its parent document.
    pub async fn leave_frame(&self) -> Result<()> {
        self.client.clone().enter_parent_frame().await?;
        Ok(())
    }

    /// Text of the currently open alert/confirm/prompt dialog.
    pub async fn alert_text(&self) -> Result<String> {
        self.client
            .get_alert_text()
            .await
            .map_err(anyhow::Error::from)
    }

    /// Accept the currently open dialog.
    pub async fn accept_alert(&self) -> Result<()> {
        self.client.accept_alert().await.map_err(anyhow::Error::from)
    }

    /// Dismiss the currently open dialog.
    pub async fn dismiss_alert(&self) -> Result<()> {
        self.client
            .dismiss_alert()
            .await
            .map_err(anyhow::Error::from)
    }

    /// Type into the currently open prompt dialog and accept it.
    pub async fn answer_alert(&self, text: &str) -> Result<()> {
        self.client.send_alert_text(text).await?;
        self.client.accept_alert().await.map_err(anyhow::Error::from)
    }

    /// Execute a script in the page and return its value.
    pub async fn execute(
        &self,
        script: &str,
        args: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value> {
        self.client
            .execute(script, args)
            .await
            .map_err(anyhow::Error::from)
    }

    /// Execute a script with `element` bound as `arguments[0]`.
    pub async fn execute_on(
        &self,
        element: &ScoutElement,
        script: &str,
    ) -> Result<serde_json::Value> {
        let handle = serde_json::to_value(&element.element)?;
        self.execute(script, vec![handle]).await
    }

    /// Scroll the given element into view.
    pub async fn scroll_into_view(&self, element: &ScoutElement) -> Result<()> {
        self.execute_on(element, "arguments[0].scrollIntoView(true);")
            .await?;
        Ok(())
    }

    /// Scroll to the bottom of the document.
    pub async fn scroll_to_bottom(&self) -> Result<()> {
        self.execute("window.scrollTo(0, document.body.scrollHeight);", vec![])
            .await?;
        Ok(())
    }

    /// Scroll back to the top of the document.
    pub async fn scroll_to_top(&self) -> Result<()> {
        self.execute("window.scrollTo(0, 0);", vec![]).await?;
        Ok(())
    }

    /// PNG screenshot of the viewport.
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        self.client.screenshot().await.map_err(anyhow::Error::from)
    }
}

// =========================
// ScoutElement
// =========================

/// Wrapper for DOM elements that provides typed helpers consistent with
/// [`ScoutPage`].
#[derive(Clone)]
pub struct ScoutElement {
    pub element: Element,
    pacing: Pacing,
}

impl ScoutElement {
    /// Construct an element wrapper.
    pub fn new(element: Element, pacing: &Pacing) -> Self {
        Self {
            element,
            pacing: pacing.clone(),
        }
    }

    /// Return the element's visible text.
    pub async fn text(&self) -> Result<String> {
        self.element.text().await.map_err(anyhow::Error::from)
    }

    /// Read an attribute value.
    pub async fn attr(&self, attribute: &str) -> Result<Option<String>> {
        self.element
            .attr(attribute)
            .await
            .map_err(anyhow::Error::from)
    }

    /// Read a live DOM property value.
    pub async fn prop(&self, property: &str) -> Result<Option<String>> {
        self.element
            .prop(property)
            .await
            .map_err(anyhow::Error::from)
    }

    /// Return the element's inner HTML.
    pub async fn inner_html(&self) -> Result<String> {
        self.element.html(true).await.map_err(anyhow::Error::from)
    }

    /// Click the element, with a short pre-click pause when pacing is on.
    pub async fn click(&self) -> Result<()> {
        self.pacing.pause(100, 300).await;
        self.element.click().await.map_err(anyhow::Error::from)
    }

    /// Clear a text input.
    pub async fn clear(&self) -> Result<()> {
        self.element.clear().await.map_err(anyhow::Error::from)
    }

    /// Send the whole string at once.
    pub async fn send_keys(&self, text: &str) -> Result<()> {
        self.element
            .send_keys(text)
            .await
            .map_err(anyhow::Error::from)
    }

    /// Type character by character with watchable delays.
    pub async fn type_paced(&self, text: &str) -> Result<()> {
        self.pacing.type_text(&self.element, text).await
    }

    /// Whether a checkbox or radio input is currently checked.
    pub async fn is_checked(&self) -> Result<bool> {
        let checked = self.prop("checked").await?;
        Ok(matches!(checked.as_deref(), Some("true")))
    }

    /// Select the `<option>` with the given value attribute.
    pub async fn select_by_value(&self, value: &str) -> Result<()> {
        self.element
            .select_by_value(value)
            .await
            .map_err(anyhow::Error::from)
    }

    /// Select the `<option>` at the given zero-based index.
    pub async fn select_by_index(&self, index: usize) -> Result<()> {
        self.element
            .select_by_index(index)
            .await
            .map_err(anyhow::Error::from)
    }

    /// PNG screenshot cropped to this element.
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        self.element.screenshot().await.map_err(anyhow::Error::from)
    }

    /// Find a child element.
    pub async fn find(&self, locator: Locator<'_>) -> Result<ScoutElement> {
        let element = self.element.find(locator).await?;
        Ok(ScoutElement::new(element, &self.pacing))
    }

    /// Find zero or more child elements.
    pub async fn find_all(&self, locator: Locator<'_>) -> Result<Vec<ScoutElement>> {
        let elements = self.element.find_all(locator).await?;
        Ok(elements
            .into_iter()
            .map(|element| ScoutElement::new(element, &self.pacing))
            .collect())
    }
}
