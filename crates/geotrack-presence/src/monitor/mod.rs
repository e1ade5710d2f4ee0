//! Presence Subscriber/Renderer: keeps one map marker per publishing alias.

mod session;

pub use session::{MonitorOptions, MonitorSession};
