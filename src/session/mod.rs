//! Interactive search session: state machine, user actions and async driver

pub mod actions;
pub mod controller;
pub mod driver;

pub use actions::Action;
pub use controller::{NoopHandler, Phase, SearchSession, SessionHandler};
pub use driver::{DEFAULT_DEBOUNCE, SearchDriver};
