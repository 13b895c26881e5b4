//! Data models.

pub mod block;
pub mod config;
