//! Settings view for the bookmark index
//!
//! [`SettingsWidget`] is the display widget a host asks the index for. It is a ratatui
//! [`StatefulWidget`](ratatui::widgets::StatefulWidget) rendering a [`SettingsView`] snapshot,
//! so one widget instance can be created lazily and reused for every redraw.

pub mod settings;
pub mod timestamps;

pub use settings::{SettingsView, SettingsWidget};
pub use timestamps::format_timestamp;
