//! Standard navigation hooks.

pub mod guard;
pub mod logging;

pub use guard::GuardHook;
pub use logging::LoggingHook;
