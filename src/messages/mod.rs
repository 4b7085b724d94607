//! Message records and conversation storage.
//!
//! A conversation is an ordered list of [`MessageRecord`]s. User turns carry
//! the typed text in `content`; system turns carry a short bubble text and,
//! optionally, a markdown payload in `data` that the UI renders separately.
//!
//! # Example
//!
//! ```rust
//! use helix::messages::{MessageRecord, MessageStore, Role};
//!
//! let store = MessageStore::new();
//! store.append(vec![
//!     MessageRecord::user("Find me a Rust engineer"),
//!     MessageRecord::system("Drafted outreach.", Some("**Hi!**".to_string())),
//! ]);
//!
//! let messages = store.list();
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[0].role, Role::User);
//! ```

mod record;
mod store;

pub use record::{MessageRecord, Role};
pub use store::MessageStore;
