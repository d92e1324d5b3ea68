// src/core/gui/mod.rs

//! The results-view model the bridge drives. No window is drawn here; the
//! views hold exactly the state a front-end window would display.

pub mod mode;
pub mod registry;
pub mod results_view;

pub use mode::GuiMode;
pub use registry::{GuiHandle, GuiKey, GuiRegistry};
pub use results_view::{AutograderGui, TestCounts, TestEntry, TestResult};
