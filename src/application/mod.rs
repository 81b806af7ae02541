//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! the controlled order form, view routing, and the order submission life cycle.

pub mod gateway;
pub mod order_form;
pub mod state;

pub use gateway::*;
pub use order_form::*;
pub use state::*;
