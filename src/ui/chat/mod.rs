//! Chat-specific UI components.

mod input_area;
mod message_list;
mod shell;
mod system_response;

pub use input_area::ChatInputArea;
pub use message_list::{MessageBubble, MessageItems};
pub use shell::ChatShell;
pub use system_response::{ResponsePanelBody, SystemResponse};
