//! Logging utilities.
//!
//! This module centralizes logger initialization behind the standard `log`
//! facade; the engine itself only ever logs through the facade.

mod init;

pub use init::{LoggingConfig, init_logging};
