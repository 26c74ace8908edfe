//! Process-level helpers: shutdown signals and telemetry setup.

pub mod sig_down;
pub mod telemetry;

pub use sig_down::*;
pub use telemetry::*;
