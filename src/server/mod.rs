//! Accept loop and connection supervision.

pub mod listener;

pub use listener::Listener;
