//! Deskmate - Admission control for the Deskmate assistant bot
//!
//! This crate implements the quota and trial accounting engine that decides,
//! for any given user and feature, whether an action is permitted right now:
//! daily-reset quotas for free features and a rolling trial allowance for
//! premium features, with an unconditional bypass for admins and active
//! premium subscribers.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
