//! Background Tasks Module
//!
//! # Tasks
//! - Cache cleanup: drops expired query results at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
