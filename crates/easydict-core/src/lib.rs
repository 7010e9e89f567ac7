pub mod error;
pub mod language;
pub mod session;

pub use error::BackendError;
pub use session::SessionStateMachine;
