// Headless HUD widget state and its change notifications

pub mod signal;
pub mod widget;

pub use signal::{ListenerId, Signal};
pub use widget::HudWidget;
