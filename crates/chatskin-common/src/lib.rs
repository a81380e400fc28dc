//! Shared types for the chatskin workspace: the error taxonomy and the
//! application event bus.

pub mod errors;
pub mod events;

pub use errors::{ConfigError, DomError, SkinError};
pub use events::{Event, EventBus};

pub type Result<T> = std::result::Result<T, SkinError>;
