//! Live browser tests. They need a running Chromedriver on localhost:9515
//! (or `SCOUT_WEBDRIVER_URL`) plus network access, so every test is ignored
//! by default:
//!
//!   cargo test -p scout-drivers -- --ignored

use std::time::Duration;

use anyhow::Result;
use fantoccini::Locator;
use scout_common::ScoutConfig;
use scout_drivers::browser::ScoutDriver;

const WAIT: Duration = Duration::from_secs(10);

fn demo_config() -> ScoutConfig {
    ScoutConfig {
        headless: true,
        ..ScoutConfig::default()
    }
}

#[tokio::test]
#[ignore = "requires a running chromedriver and network access"]
async fn navigate_and_read_heading() -> Result<()> {
    let driver = ScoutDriver::from_config(&demo_config()).await?;

    let page = driver.goto("https://www.example.com").await?;
    let heading = page.wait_for_css("h1", WAIT).await?;
    assert_eq!(heading.text().await?, "Example Domain");
    assert!(page.title().await?.contains("Example Domain"));

    driver.close().await
}

#[tokio::test]
#[ignore = "requires a running chromedriver and network access"]
async fn login_flow_succeeds_with_demo_credentials() -> Result<()> {
    let config = demo_config();
    let driver = ScoutDriver::from_config(&config).await?;

    let page = driver
        .goto("https://the-internet.herokuapp.com/login")
        .await?;
    let username = page.wait_for_css("#username", WAIT).await?;
    let password = page.find_css("#password").await?;
    let submit = page.find_css("button.radius").await?;

    username.clear().await?;
    username.send_keys(&config.demo.username).await?;
    password.send_keys(&config.demo.password).await?;
    submit.click().await?;

    let flash = page.wait_for_css("#flash", WAIT).await?;
    assert!(flash.text().await?.contains("You logged into a secure area!"));
    assert!(page.current_url().await?.contains("/secure"));

    driver.close().await
}

#[tokio::test]
#[ignore = "requires a running chromedriver and network access"]
async fn login_flow_reports_invalid_password() -> Result<()> {
    let driver = ScoutDriver::from_config(&demo_config()).await?;

    let page = driver
        .goto("https://the-internet.herokuapp.com/login")
        .await?;
    page.wait_for_css("#username", WAIT).await?.send_keys("tomsmith").await?;
    page.find_css("#password").await?.send_keys("not-the-password").await?;
    page.find_css("button.radius").await?.click().await?;

    let flash = page.wait_for_css("#flash", WAIT).await?;
    assert!(flash.text().await?.contains("Your password is invalid!"));

    driver.close().await
}

#[tokio::test]
#[ignore = "requires a running chromedriver and network access"]
async fn checkboxes_toggle() -> Result<()> {
    let driver = ScoutDriver::from_config(&demo_config()).await?;

    let page = driver
        .goto("https://the-internet.herokuapp.com/checkboxes")
        .await?;
    let boxes = page.find_all_css("input[type='checkbox']").await?;
    assert_eq!(boxes.len(), 2);

    let first = &boxes[0];
    let was_checked = first.is_checked().await?;
    first.click().await?;
    assert_ne!(first.is_checked().await?, was_checked);

    driver.close().await
}

#[tokio::test]
#[ignore = "requires a running chromedriver and network access"]
async fn dropdown_selection() -> Result<()> {
    let driver = ScoutDriver::from_config(&demo_config()).await?;

    let page = driver
        .goto("https://the-internet.herokuapp.com/dropdown")
        .await?;
    let dropdown = page.wait_for_css("#dropdown", WAIT).await?;
    dropdown.select_by_value("2").await?;

    let selected = page
        .find_css("#dropdown option[value='2']")
        .await?
        .prop("selected")
        .await?;
    assert_eq!(selected.as_deref(), Some("true"));

    driver.close().await
}

#[tokio::test]
#[ignore = "requires a running chromedriver and network access"]
async fn alert_round_trip() -> Result<()> {
    let driver = ScoutDriver::from_config(&demo_config()).await?;

    let page = driver
        .goto("https://the-internet.herokuapp.com/javascript_alerts")
        .await?;
    page.wait_for_css("button[onclick='jsAlert()']", WAIT)
        .await?
        .click()
        .await?;

    assert_eq!(page.alert_text().await?, "I am a JS Alert");
    page.accept_alert().await?;

    let result = page.find_css("#result").await?.text().await?;
    assert!(result.contains("You successfully clicked an alert"));

    driver.close().await
}

#[tokio::test]
#[ignore = "requires a running chromedriver and network access"]
async fn prompt_dialog_accepts_typed_answer() -> Result<()> {
    let driver = ScoutDriver::from_config(&demo_config()).await?;

    let page = driver
        .goto("https://the-internet.herokuapp.com/javascript_alerts")
        .await?;
    page.wait_for_css("button[onclick='jsPrompt()']", WAIT)
        .await?
        .click()
        .await?;
    page.answer_alert("hello from scout").await?;

    let result = page.find_css("#result").await?.text().await?;
    assert!(result.contains("hello from scout"));

    driver.close().await
}

#[tokio::test]
#[ignore = "requires a running chromedriver and network access"]
async fn frames_switch_in_and_out() -> Result<()> {
    let driver = ScoutDriver::from_config(&demo_config()).await?;

    let page = driver.goto("https://the-internet.herokuapp.com/iframe").await?;
    let frame = page.wait_for_css("#mce_0_ifr", WAIT).await?;
    page.enter_frame(frame).await?;

    let editor = page.wait_for_css("#tinymce", WAIT).await?;
    assert!(!editor.text().await?.is_empty());

    page.leave_frame().await?;
    // Back in the top document the editor id no longer resolves.
    assert!(page.find_css("#tinymce").await.is_err());

    driver.close().await
}

#[tokio::test]
#[ignore = "requires a running chromedriver and network access"]
async fn new_window_opens_and_switches() -> Result<()> {
    let driver = ScoutDriver::from_config(&demo_config()).await?;

    let page = driver
        .goto("https://the-internet.herokuapp.com/windows")
        .await?;
    let known = page.windows().await?;

    page.wait_for_element(Locator::LinkText("Click Here"), WAIT)
        .await?
        .click()
        .await?;

    let fresh = page.wait_for_new_window(&known, WAIT).await?;
    page.switch_to_window(fresh).await?;
    let heading = page.wait_for_css("h3", WAIT).await?;
    assert_eq!(heading.text().await?, "New Window");

    driver.close().await
}

#[tokio::test]
#[ignore = "requires a running chromedriver and network access"]
async fn history_navigation_round_trip() -> Result<()> {
    let driver = ScoutDriver::from_config(&demo_config()).await?;

    let page = driver.goto("https://www.example.com").await?;
    page.goto("https://the-internet.herokuapp.com").await?;

    page.back().await?;
    assert!(page.current_url().await?.contains("example.com"));

    page.forward().await?;
    assert!(page.current_url().await?.contains("the-internet"));

    page.refresh().await?;
    assert!(!page.source().await?.is_empty());

    driver.close().await
}

#[tokio::test]
#[ignore = "requires a running chromedriver and network access"]
async fn scripts_read_page_state_and_scroll() -> Result<()> {
    let driver = ScoutDriver::from_config(&demo_config()).await?;

    let page = driver.goto("https://the-internet.herokuapp.com/large").await?;
    let title = page.execute("return document.title;", vec![]).await?;
    assert!(title.as_str().is_some());

    let table = page.wait_for_css("#large-table", WAIT).await?;
    page.scroll_into_view(&table).await?;
    page.scroll_to_bottom().await?;
    page.scroll_to_top().await?;

    driver.close().await
}

#[tokio::test]
#[ignore = "requires a running chromedriver and network access"]
async fn screenshots_capture_page_and_element() -> Result<()> {
    let driver = ScoutDriver::from_config(&demo_config()).await?;

    let page = driver
        .goto("https://the-internet.herokuapp.com/login")
        .await?;
    page.wait_for_css("form", WAIT).await?;

    let full = page.screenshot().await?;
    assert!(!full.is_empty());

    let form = page.find_css("form").await?.screenshot().await?;
    assert!(!form.is_empty());
    assert!(form.len() < full.len());

    driver.close().await
}
