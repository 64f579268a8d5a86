//! Tolerant extraction of normalized results from live web pages.
//!
//! The extractor sees the browser only through the session traits in
//! [`session`]; [`webdriver`] implements that contract over the
//! `scout-drivers` fantoccini wrappers, and tests run against scripted
//! fakes.
//!
//! - [`PageExtractor`]: heading / link / page-info extraction with the
//!   sentinel fallback policy
//! - [`LoginProbe`]: drives the demo login form and reports the outcome
//! - [`session`]: the contract consumed from the browser layer
//! - [`webdriver`]: the fantoccini-backed session factory
pub mod extract;
pub mod login;
pub mod session;
pub mod webdriver;

pub use extract::{LinkRecord, PageExtractor, PageInfo};
pub use login::{LoginProbe, LoginReport};
pub use webdriver::WebDriverSessionFactory;
pub use session::{
    InteractiveNode, InteractiveSession, InteractiveSessionFactory, PageNode, PageSession,
    ReadyCondition, SessionFactory, SetupError,
};
