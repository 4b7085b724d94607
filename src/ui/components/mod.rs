//! Shared UI building blocks.

mod icons;
mod panel;

pub use icons::{Icon, IconKind};
pub use panel::Panel;
