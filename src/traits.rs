//! Trait definitions.

mod backend;
mod message;

pub use backend::Backend;
pub use message::Message;
