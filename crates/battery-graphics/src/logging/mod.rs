//! Logging utilities.
//!
//! The crate itself only talks to the `log` facade. This module is for
//! binaries and tests that want a ready-made `env_logger` setup.

mod init;

pub use init::{init_logging, LoggingConfig};
