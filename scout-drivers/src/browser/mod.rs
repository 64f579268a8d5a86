pub mod driver;
pub mod options;
pub mod pacing;
pub mod page;

pub use driver::ScoutDriver;
pub use options::{BrowserOptions, WindowMode};
pub use pacing::Pacing;
pub use page::{ScoutElement, ScoutPage};
