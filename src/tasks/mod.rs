//! Background Tasks Module
//!
//! # Tasks
//! - Session sweep: removes idle sessions at a fixed interval

mod sweep;

pub use sweep::{spawn_session_sweeper, sweep_expired};
