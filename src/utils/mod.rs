// src/utils/mod.rs

pub mod error;
pub mod helpers;
pub mod logger;

pub use error::{ErrorKind, RelayError, RelayResult};
pub use helpers::*;
pub use logger::{init_logger, logger, LogLevel, Logger};
