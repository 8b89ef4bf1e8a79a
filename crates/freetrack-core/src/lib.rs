pub mod clock;
pub mod config;
pub mod error;
pub mod notification;
pub mod service;
pub mod storage;
pub mod view;

// Re-export common error type
pub use error::{FreetrackError, Result};
