//! Domain layer: pure types and rules, no IO.

pub mod access;
pub mod foundation;
