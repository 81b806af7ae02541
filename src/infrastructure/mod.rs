//! Infrastructure layer providing external service integrations.
//!
//! This module contains the HTTP order client, startup configuration, and
//! log file setup.

pub mod config;
pub mod logging;
pub mod order_client;

pub use config::*;
pub use logging::*;
pub use order_client::*;
