//! Adapters - concrete implementations of the ports.

pub mod catalog;
pub mod clock;
pub mod memory;
pub mod postgres;
