//! Bloom Pizza - Terminal Order Form Library
//!
//! A terminal pizza order form with inline validation and submission to a
//! remote order service, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
